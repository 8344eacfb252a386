use std::future::Future;
use std::time::Duration;

use fantoccini::{Client, ClientBuilder};
use serde_json::json;

use crate::calendar::PaginationPlan;
use crate::chart::{Paginator, PriceGraph};
use crate::config::SessionConfig;
use crate::error::{ExtractError, Phase, Result};
use crate::flights::{self, FlightData};
use crate::form;
use crate::params::SearchParameters;
use crate::results::PriceSeries;

/// What one successful attempt hands back.
#[derive(Debug)]
pub struct Harvest {
    pub series: PriceSeries,
    pub flights: Option<Vec<FlightData>>,
}

/// Owns the browser lifecycle for the whole multi-step interaction:
/// navigate, fill the search form, open the graph, paginate. Each attempt
/// gets a fresh WebDriver session which is closed on every exit path; any
/// failure discards the attempt and a new one starts from the top.
pub struct ExtractionSession {
    params: SearchParameters,
    config: SessionConfig,
    capture_flights: bool,
}

impl ExtractionSession {
    pub fn new(params: SearchParameters, config: SessionConfig, capture_flights: bool) -> Self {
        Self {
            params,
            config,
            capture_flights,
        }
    }

    /// Run the session, retrying the whole browser lifecycle on failure.
    /// A short or empty series is success; only errors trigger a retry.
    pub async fn run(&self) -> Result<Harvest> {
        retry(
            self.config.max_attempts,
            self.config.retry_delay(),
            |attempt| self.attempt(attempt),
        )
        .await
    }

    async fn attempt(&self, attempt: u32) -> Result<Harvest> {
        ::log::info!(
            "attempt {} of {}: {} -> {} on {}",
            attempt,
            self.config.max_attempts,
            self.params.departure,
            self.params.destination,
            self.params.departure_date
        );

        let client = self.connect().await?;
        let outcome = self.drive(&client).await;
        // The browser is released before the attempt ends, on every path.
        if let Err(e) = client.close().await {
            ::log::warn!("failed to close the browser session: {}", e);
        }
        outcome
    }

    async fn connect(&self) -> Result<Client> {
        let mut capabilities = serde_json::map::Map::new();
        capabilities.insert(
            "goog:chromeOptions".to_string(),
            json!({ "args": [format!("--user-agent={}", self.config.user_agent)] }),
        );

        let client = ClientBuilder::native()
            .capabilities(capabilities)
            .connect(&self.config.webdriver_url)
            .await?;
        ::log::debug!("webdriver session established at {}", self.config.webdriver_url);
        Ok(client)
    }

    async fn drive(&self, client: &Client) -> Result<Harvest> {
        self.navigate(client).await?;
        form::fill(client, &self.params, &self.config).await?;

        let flights = if self.capture_flights {
            Some(flights::collect(client, &self.config).await?)
        } else {
            None
        };

        let mut graph = PriceGraph::new(client, &self.config);
        graph.open().await?;

        let plan = PaginationPlan::for_today();
        let series = Paginator::new(plan).collect(&mut graph).await?;
        Ok(Harvest { series, flights })
    }

    async fn navigate(&self, client: &Client) -> Result<()> {
        ::log::debug!("navigating to {}", self.config.flights_url);
        match tokio::time::timeout(
            self.config.navigation_timeout(),
            client.goto(&self.config.flights_url),
        )
        .await
        {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(ExtractError::command(Phase::Navigate, e)),
            Err(_) => Err(ExtractError::page(Phase::Navigate, "page load timed out")),
        }
    }
}

/// Explicit retry loop around a fallible attempt. The attempt factory owns
/// construction and teardown of whatever resources an attempt needs, so one
/// attempt is always one resource lifetime. A fixed delay separates
/// attempts; the final error reports how many were made and what the last
/// failure was.
pub(crate) async fn retry<T, F, Fut>(max_attempts: u32, delay: Duration, mut attempt: F) -> Result<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut last: Option<ExtractError> = None;
    for n in 1..=max_attempts {
        match attempt(n).await {
            Ok(value) => return Ok(value),
            Err(e) => {
                ::log::warn!("attempt {} of {} failed: {}", n, max_attempts, e);
                last = Some(e);
                if n < max_attempts {
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
    Err(ExtractError::Exhausted {
        attempts: max_attempts,
        last: Box::new(
            last.unwrap_or_else(|| ExtractError::page(Phase::Connect, "no attempts were made")),
        ),
    })
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[tokio::test]
    async fn test_retry_succeeds_after_failed_attempts() {
        let attempts = Cell::new(0u32);
        let closed = Cell::new(0u32);

        let result = retry(3, Duration::from_millis(1), |n| {
            let attempts = &attempts;
            let closed = &closed;
            async move {
                attempts.set(attempts.get() + 1);
                let outcome = if n < 3 {
                    Err(ExtractError::page(
                        Phase::OpenGraph,
                        "price graph toggle never appeared",
                    ))
                } else {
                    Ok(PriceSeries::new())
                };
                // Teardown happens on every exit path of an attempt.
                closed.set(closed.get() + 1);
                outcome
            }
        })
        .await;

        assert!(result.is_ok());
        assert_eq!(attempts.get(), 3);
        assert_eq!(closed.get(), 3);
    }

    #[tokio::test]
    async fn test_retry_exhaustion_reports_last_phase() {
        let closed = Cell::new(0u32);

        let result: Result<PriceSeries> = retry(3, Duration::from_millis(1), |_| {
            let closed = &closed;
            async move {
                closed.set(closed.get() + 1);
                Err(ExtractError::page(Phase::Navigate, "page load timed out"))
            }
        })
        .await;

        assert_eq!(closed.get(), 3);
        match result {
            Err(ExtractError::Exhausted { attempts, last }) => {
                assert_eq!(attempts, 3);
                assert!(last.to_string().contains("navigate"));
            }
            other => panic!("expected exhaustion, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_retry_stops_at_first_success() {
        let attempts = Cell::new(0u32);

        let result = retry(3, Duration::from_millis(1), |_| {
            let attempts = &attempts;
            async move {
                attempts.set(attempts.get() + 1);
                Ok(42u32)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(attempts.get(), 1);
    }
}
