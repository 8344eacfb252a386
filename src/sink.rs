use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Serialize;

use crate::error::{ExtractError, Phase, Result};
use crate::flights::FlightData;
use crate::params::SearchParameters;
use crate::results::{PricePoint, PriceSeries};
use crate::utils;

/// Persists finished runs as uniquely named JSON artifacts. The output
/// directory is an explicit constructor argument; the sink keeps no other
/// state.
pub struct ResultSink {
    output_dir: PathBuf,
}

#[derive(Debug, Serialize)]
struct ReportParameters<'a> {
    departure: &'a str,
    destination: &'a str,
    departure_date: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    return_date: Option<&'a str>,
    search_timestamp: &'a str,
}

#[derive(Debug, Serialize)]
struct HistoryReport<'a> {
    search_parameters: ReportParameters<'a>,
    price_history: &'a [PricePoint],
}

#[derive(Debug, Serialize)]
struct FlightsReport<'a> {
    search_parameters: ReportParameters<'a>,
    flights: &'a [FlightData],
}

impl ResultSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write the price series plus its search parameters.
    pub fn write_history(&self, params: &SearchParameters, series: &PriceSeries) -> Result<PathBuf> {
        let timestamp = Self::timestamp();
        let report = HistoryReport {
            search_parameters: Self::report_parameters(params, &timestamp),
            price_history: series.points(),
        };
        self.write_report("flight_results", params, &timestamp, &report)
    }

    /// Write the supplemental flight rows under a distinct prefix.
    pub fn write_flights(&self, params: &SearchParameters, flights: &[FlightData]) -> Result<PathBuf> {
        let timestamp = Self::timestamp();
        let report = FlightsReport {
            search_parameters: Self::report_parameters(params, &timestamp),
            flights,
        };
        self.write_report("flight_list", params, &timestamp, &report)
    }

    fn report_parameters<'a>(
        params: &'a SearchParameters,
        timestamp: &'a str,
    ) -> ReportParameters<'a> {
        ReportParameters {
            departure: &params.departure,
            destination: &params.destination,
            departure_date: &params.departure_date,
            return_date: params.return_date.as_deref(),
            search_timestamp: timestamp,
        }
    }

    fn write_report<T: Serialize>(
        &self,
        prefix: &str,
        params: &SearchParameters,
        timestamp: &str,
        report: &T,
    ) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir).map_err(persist)?;

        let filename = format!(
            "{}_{}_{}_{}.json",
            prefix,
            utils::sanitize_token(&params.departure),
            utils::sanitize_token(&params.destination),
            timestamp
        );
        let path = self.output_dir.join(filename);

        let content = serde_json::to_string_pretty(report).map_err(persist)?;
        fs::write(&path, content).map_err(persist)?;
        ::log::info!("wrote {}", path.display());
        Ok(path)
    }

    /// Second-resolution timestamp. Two same-route runs started within the
    /// same second collide on the same artifact name.
    fn timestamp() -> String {
        Local::now().format("%Y%m%d_%H%M%S").to_string()
    }
}

fn persist(source: impl Display) -> ExtractError {
    ExtractError::page(Phase::Persist, source.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> SearchParameters {
        SearchParameters::one_way("MIA", "SEA", "2025-03-01")
    }

    #[test]
    fn test_write_history_artifact_shape() {
        let dir = tempfile::tempdir().unwrap();
        let sink = ResultSink::new(dir.path());

        let mut series = PriceSeries::new();
        series.push(PricePoint::new("Mar 5", "$241"));
        series.push(PricePoint::new("Mar 6", "$198"));

        let path = sink.write_history(&params(), &series).unwrap();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("flight_results_MIA_SEA_"));
        assert!(name.ends_with(".json"));

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["search_parameters"]["departure"], "MIA");
        assert_eq!(written["search_parameters"]["destination"], "SEA");
        assert_eq!(written["search_parameters"]["departure_date"], "2025-03-01");
        // One-way searches carry no return date at all.
        assert!(written["search_parameters"].get("return_date").is_none());
        assert!(
            written["search_parameters"]["search_timestamp"]
                .as_str()
                .unwrap()
                .len()
                == 15
        );
        assert_eq!(written["price_history"][0]["date"], "Mar 5");
        assert_eq!(written["price_history"][1]["price"], "$198");
    }

    #[test]
    fn test_write_creates_missing_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("results").join("deep");
        let sink = ResultSink::new(&nested);

        let path = sink.write_history(&params(), &PriceSeries::new()).unwrap();
        assert!(path.exists());
        assert!(nested.is_dir());
    }

    #[test]
    fn test_write_flights_uses_distinct_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let sink = ResultSink::new(dir.path());

        let flights = vec![FlightData {
            airline: "Delta".into(),
            departure_time: "8:00 AM".into(),
            arrival_time: "11:05 AM".into(),
            duration: "3 hr 5 min".into(),
            stops: "Nonstop".into(),
            price: "$241".into(),
            co2_emissions: "102 kg CO2e".into(),
            emissions_variation: "-8% emissions".into(),
        }];

        let path = sink.write_flights(&params(), &flights).unwrap();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("flight_list_MIA_SEA_"));

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["flights"][0]["airline"], "Delta");
    }

    #[test]
    fn test_route_tokens_are_sanitized() {
        let dir = tempfile::tempdir().unwrap();
        let sink = ResultSink::new(dir.path());

        let params = SearchParameters::one_way("New York", "San Francisco", "2025-03-01");
        let path = sink.write_history(&params, &PriceSeries::new()).unwrap();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("flight_results_New_York_San_Francisco_"));
    }
}
