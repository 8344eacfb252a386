use fantoccini::error::CmdError;
use fantoccini::{Client, Locator};
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;
use crate::error::{ExtractError, Phase, Result};
use crate::results::UNAVAILABLE;
use crate::selectors;

const PHASE: Phase = Phase::ListFlights;

/// Upper bound on "more flights" expansions per page.
const MAX_EXPANSIONS: u32 = 20;

/// One row of the flight results list, fields as rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightData {
    pub airline: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub duration: String,
    pub stops: String,
    pub price: String,
    pub co2_emissions: String,
    pub emissions_variation: String,
}

/// Extract every flight row from the loaded results page.
pub async fn collect(client: &Client, config: &SessionConfig) -> Result<Vec<FlightData>> {
    client
        .wait()
        .at_most(config.element_timeout())
        .for_element(Locator::Css(selectors::RESULT_ROW))
        .await
        .map_err(|e| match e {
            CmdError::WaitTimeout => ExtractError::page(PHASE, "results list never appeared"),
            other => ExtractError::command(PHASE, other),
        })?;

    load_all(client, config).await?;

    let html = client
        .source()
        .await
        .map_err(|e| ExtractError::command(PHASE, e))?;
    let rows = parse_rows(&html)?;
    ::log::info!("extracted {} flight rows", rows.len());
    Ok(rows)
}

/// Click the "more flights" control until it is no longer offered.
async fn load_all(client: &Client, config: &SessionConfig) -> Result<()> {
    for _ in 0..MAX_EXPANSIONS {
        match client
            .wait()
            .at_most(config.control_timeout())
            .for_element(Locator::Css(selectors::MORE_FLIGHTS))
            .await
        {
            Ok(button) => {
                button
                    .click()
                    .await
                    .map_err(|e| ExtractError::command(PHASE, e))?;
                tokio::time::sleep(config.settle()).await;
            }
            Err(ref e) if matches!(e, CmdError::WaitTimeout) || e.is_no_such_element() => return Ok(()),
            Err(e) => return Err(ExtractError::command(PHASE, e)),
        }
    }
    ::log::warn!(
        "more-flights control still present after {} expansions",
        MAX_EXPANSIONS
    );
    Ok(())
}

/// Parse flight rows out of a captured page source. Missing cells read as
/// the unavailable sentinel rather than dropping the row.
pub fn parse_rows(html: &str) -> Result<Vec<FlightData>> {
    let document = Html::parse_document(html);
    let rows = parse_selector(selectors::RESULT_ROW)?;
    let airline = parse_selector(selectors::AIRLINE)?;
    let departure_time = parse_selector(selectors::DEPARTURE_TIME)?;
    let arrival_time = parse_selector(selectors::ARRIVAL_TIME)?;
    let duration = parse_selector(selectors::DURATION)?;
    let stops = parse_selector(selectors::STOPS)?;
    let price = parse_selector(selectors::PRICE)?;
    let co2_emissions = parse_selector(selectors::CO2_EMISSIONS)?;
    let emissions_variation = parse_selector(selectors::EMISSIONS_VARIATION)?;

    let mut flights = Vec::new();
    for row in document.select(&rows) {
        flights.push(FlightData {
            airline: field_text(&row, &airline),
            departure_time: field_text(&row, &departure_time),
            arrival_time: field_text(&row, &arrival_time),
            duration: field_text(&row, &duration),
            stops: field_text(&row, &stops),
            price: field_text(&row, &price),
            co2_emissions: field_text(&row, &co2_emissions),
            emissions_variation: field_text(&row, &emissions_variation),
        });
    }
    Ok(flights)
}

fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ExtractError::Selector(format!("{}: {}", css, e)))
}

fn field_text(row: &ElementRef<'_>, selector: &Selector) -> String {
    row.select(selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| UNAVAILABLE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULTS_PAGE: &str = r#"
        <html><body><ul>
          <li class="pIav2d">
            <div class="sSHqwe tPgKwe ogfYpf">Delta</div>
            <span aria-label="Departure time: 8:00 AM">8:00 AM</span>
            <span aria-label="Arrival time: 11:05 AM">11:05 AM</span>
            <div aria-label="Total duration 3 hr 5 min">3 hr 5 min</div>
            <div class="hF6lYb"><span class="rGRiKd">Nonstop</span></div>
            <div class="FpEdX"><span>$241</span></div>
            <div class="O7CXue">102 kg CO2e</div>
            <div class="N6PNV">-8% emissions</div>
          </li>
          <li class="pIav2d">
            <div class="sSHqwe tPgKwe ogfYpf">United</div>
            <div class="FpEdX"><span>$198</span></div>
          </li>
        </ul></body></html>
    "#;

    #[test]
    fn test_parse_rows_extracts_fields() {
        let flights = parse_rows(RESULTS_PAGE).unwrap();
        assert_eq!(flights.len(), 2);

        let first = &flights[0];
        assert_eq!(first.airline, "Delta");
        assert_eq!(first.departure_time, "8:00 AM");
        assert_eq!(first.arrival_time, "11:05 AM");
        assert_eq!(first.duration, "3 hr 5 min");
        assert_eq!(first.stops, "Nonstop");
        assert_eq!(first.price, "$241");
        assert_eq!(first.co2_emissions, "102 kg CO2e");
        assert_eq!(first.emissions_variation, "-8% emissions");
    }

    #[test]
    fn test_parse_rows_fills_missing_cells_with_sentinel() {
        let flights = parse_rows(RESULTS_PAGE).unwrap();
        let second = &flights[1];
        assert_eq!(second.airline, "United");
        assert_eq!(second.price, "$198");
        assert_eq!(second.departure_time, UNAVAILABLE);
        assert_eq!(second.stops, UNAVAILABLE);
    }

    #[test]
    fn test_parse_rows_without_rows_is_empty() {
        let flights = parse_rows("<html><body></body></html>").unwrap();
        assert!(flights.is_empty());
    }
}
