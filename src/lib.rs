// Re-export modules
pub mod calendar;
pub mod chart;
pub mod config;
pub mod error;
pub mod flights;
pub mod form;
pub mod params;
pub mod results;
pub mod selectors;
pub mod session;
pub mod sink;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::SessionConfig;
pub use error::{ExtractError, Phase};
pub use flights::FlightData;
pub use params::{SearchParameters, TicketType};
pub use results::{PricePoint, PriceSeries};

use std::path::PathBuf;

use session::ExtractionSession;
use sink::ResultSink;

/// Main builder for one flight-search extraction run
pub struct FlightSearch {
    params: SearchParameters,
    config: SessionConfig,
    capture_flights: bool,
    dedup: bool,
}

/// Everything a finished run produced
#[derive(Debug)]
pub struct SearchOutcome {
    /// The extracted price series (deduplicated when requested)
    pub series: PriceSeries,

    /// Flight rows, when the run was asked to capture them
    pub flights: Option<Vec<FlightData>>,

    /// Path of the persisted price-history artifact
    pub history_path: PathBuf,

    /// Path of the persisted flight-list artifact, if any
    pub flights_path: Option<PathBuf>,
}

impl FlightSearch {
    /// Create a new search with default session configuration
    pub fn new(params: SearchParameters) -> Self {
        Self {
            params,
            config: SessionConfig::default(),
            capture_flights: false,
            dedup: false,
        }
    }

    /// Replace the whole session configuration
    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the WebDriver endpoint
    pub fn with_webdriver_url(mut self, url: impl Into<String>) -> Self {
        self.config.webdriver_url = url.into();
        self
    }

    /// Set the directory result files are written to
    pub fn with_output_dir(mut self, dir: impl Into<String>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    /// Set how many times the whole session is attempted
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.config.max_attempts = attempts;
        self
    }

    /// Also capture the flight result rows
    pub fn with_flight_list(mut self, capture: bool) -> Self {
        self.capture_flights = capture;
        self
    }

    /// Drop duplicate points produced by overlapping graph pages before
    /// persisting
    pub fn with_dedup(mut self, dedup: bool) -> Self {
        self.dedup = dedup;
        self
    }

    /// Run the search: drive the browser session (with retry), then persist
    /// the results.
    pub async fn run(self) -> error::Result<SearchOutcome> {
        let mut config = self.config;

        // Override the WebDriver URL with an environment variable if provided
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                config.webdriver_url = webdriver_url;
            }
        }
        config.validate()?;

        let session = ExtractionSession::new(self.params.clone(), config.clone(), self.capture_flights);
        let session::Harvest { series, flights } = session.run().await?;

        let series = if self.dedup {
            let deduped = series.deduped();
            ::log::info!(
                "deduplicated {} points down to {}",
                series.len(),
                deduped.len()
            );
            deduped
        } else {
            series
        };

        let sink = ResultSink::new(&config.output_dir);
        let history_path = sink.write_history(&self.params, &series)?;
        let flights_path = match &flights {
            Some(flights) => Some(sink.write_flights(&self.params, flights)?),
            None => None,
        };

        Ok(SearchOutcome {
            series,
            flights,
            history_path,
            flights_path,
        })
    }
}
