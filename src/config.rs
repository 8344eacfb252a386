use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ExtractError, Result};

/// Configuration for one extraction session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// URL of the flight-search page
    #[serde(default = "default_flights_url")]
    pub flights_url: String,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Directory result files are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// User agent the browser session identifies as
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Total attempts for the whole session before giving up
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Seconds to wait between attempts
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,

    /// Seconds allowed for the initial page load
    #[serde(default = "default_navigation_timeout_secs")]
    pub navigation_timeout_secs: u64,

    /// Seconds to wait for elements that must appear (results list, graph toggle)
    #[serde(default = "default_element_timeout_secs")]
    pub element_timeout_secs: u64,

    /// Seconds to wait for optional controls (scroll arrows, more-flights button)
    #[serde(default = "default_control_timeout_secs")]
    pub control_timeout_secs: u64,

    /// Milliseconds to let the page settle after an action with no
    /// observable post-condition
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            flights_url: default_flights_url(),
            webdriver_url: default_webdriver_url(),
            output_dir: default_output_dir(),
            user_agent: default_user_agent(),
            max_attempts: default_max_attempts(),
            retry_delay_secs: default_retry_delay_secs(),
            navigation_timeout_secs: default_navigation_timeout_secs(),
            element_timeout_secs: default_element_timeout_secs(),
            control_timeout_secs: default_control_timeout_secs(),
            settle_ms: default_settle_ms(),
        }
    }
}

impl SessionConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Check that the configured endpoints are well-formed URLs
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.flights_url)
            .map_err(|e| ExtractError::Config(format!("flights_url: {}", e)))?;
        Url::parse(&self.webdriver_url)
            .map_err(|e| ExtractError::Config(format!("webdriver_url: {}", e)))?;
        if self.max_attempts == 0 {
            return Err(ExtractError::Config(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }

    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }

    pub fn element_timeout(&self) -> Duration {
        Duration::from_secs(self.element_timeout_secs)
    }

    pub fn control_timeout(&self) -> Duration {
        Duration::from_secs(self.control_timeout_secs)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

fn default_flights_url() -> String {
    "https://www.google.com/flights".to_string()
}

fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_output_dir() -> String {
    "flight_results".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/130.0.0.0 Safari/537.36"
        .to_string()
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_delay_secs() -> u64 {
    5
}

fn default_navigation_timeout_secs() -> u64 {
    60
}

fn default_element_timeout_secs() -> u64 {
    30
}

fn default_control_timeout_secs() -> u64 {
    5
}

fn default_settle_ms() -> u64 {
    2000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SessionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.retry_delay(), Duration::from_secs(5));
        assert_eq!(config.control_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: SessionConfig =
            serde_json::from_str(r#"{"webdriver_url": "http://localhost:9515"}"#).unwrap();
        assert_eq!(config.webdriver_url, "http://localhost:9515");
        assert_eq!(config.output_dir, "flight_results");
        assert_eq!(config.settle_ms, 2000);
    }

    #[test]
    fn test_validate_rejects_bad_endpoints() {
        let config = SessionConfig {
            webdriver_url: "not a url".to_string(),
            ..SessionConfig::default()
        };
        assert!(config.validate().is_err());

        let config = SessionConfig {
            max_attempts: 0,
            ..SessionConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
