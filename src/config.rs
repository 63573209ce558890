/// Runtime settings for the background manager and the REST client

use crate::error::{Error, Result};
use std::time::Duration;
use url::Url;

/// Backend used when `SEMANT_API_BASE_URL` is not set at build time
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

pub const DEFAULT_HISTORY_LIMIT: usize = 100;
pub const DEFAULT_HISTORY_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Shortest period Chrome accepts for a repeating alarm
pub const MIN_ALARM_PERIOD_MINUTES: f64 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct ManagerConfig {
    /// Maximum number of periodic snapshots kept in `tabHistory`
    pub history_limit: usize,
    pub history_interval: Duration,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        ManagerConfig {
            history_limit: DEFAULT_HISTORY_LIMIT,
            history_interval: DEFAULT_HISTORY_INTERVAL,
        }
    }
}

impl ManagerConfig {
    /// `history_interval` as a `chrome.alarms` period, clamped to Chrome's minimum
    pub fn history_period_minutes(&self) -> f64 {
        (self.history_interval.as_secs_f64() / 60.0).max(MIN_ALARM_PERIOD_MINUTES)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    /// Validate and normalise a backend base URL (trailing slashes are dropped
    /// so endpoint paths can be appended verbatim).
    pub fn new(base_url: &str) -> Result<ApiConfig> {
        let parsed = Url::parse(base_url).map_err(|e| Error::Config {
            message: format!("invalid API base URL {:?}: {}", base_url, e),
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::Config {
                message: format!("unsupported API scheme: {}", parsed.scheme()),
            });
        }

        Ok(ApiConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        let base_url = option_env!("SEMANT_API_BASE_URL").unwrap_or(DEFAULT_API_BASE_URL);
        ApiConfig::new(base_url).unwrap_or_else(|e| {
            log::warn!("{}; falling back to {}", e, DEFAULT_API_BASE_URL);
            ApiConfig {
                base_url: DEFAULT_API_BASE_URL.to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manager_config_defaults() {
        let config = ManagerConfig::default();
        assert_eq!(config.history_limit, 100);
        assert_eq!(config.history_interval, Duration::from_secs(300));
        assert_eq!(config.history_period_minutes(), 5.0);
    }

    #[test]
    fn test_history_period_clamped_to_alarm_minimum() {
        let config = ManagerConfig {
            history_interval: Duration::from_secs(10),
            ..ManagerConfig::default()
        };
        assert_eq!(config.history_period_minutes(), 0.5);

        let hourly = ManagerConfig {
            history_interval: Duration::from_secs(3600),
            ..ManagerConfig::default()
        };
        assert_eq!(hourly.history_period_minutes(), 60.0);
    }

    #[test]
    fn test_api_config_trims_trailing_slash() {
        let config = ApiConfig::new("https://api.example.com/v1/").unwrap();
        assert_eq!(config.base_url(), "https://api.example.com/v1");
        assert_eq!(config.endpoint("/jobs"), "https://api.example.com/v1/jobs");
    }

    #[test]
    fn test_api_config_rejects_bad_urls() {
        assert!(ApiConfig::new("not a url").is_err());
        assert!(ApiConfig::new("ftp://files.example.com").is_err());
    }

    #[test]
    fn test_api_config_default_is_valid() {
        let config = ApiConfig::default();
        assert!(config.base_url().starts_with("http"));
    }
}
