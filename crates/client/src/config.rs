//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `PAPERBOY_API_BASE_URL` - Base URL of the story service (default:
//!   the fixed production endpoint)
//! - `PAPERBOY_HTTP_TIMEOUT_SECS` - Whole-request timeout in seconds
//!   (default: 30)

use std::time::Duration;

use thiserror::Error;

/// Fixed production endpoint of the story service.
const DEFAULT_BASE_URL: &str = "https://hack-or-snooze-v3.herokuapp.com";

/// Default whole-request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the story service, without a trailing slash.
    pub base_url: String,
    /// Whole-request timeout applied to every call.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `PAPERBOY_HTTP_TIMEOUT_SECS` is present
    /// but not a number.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = get_env_or_default("PAPERBOY_API_BASE_URL", DEFAULT_BASE_URL);
        let timeout_secs = get_env_or_default("PAPERBOY_HTTP_TIMEOUT_SECS", "30")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("PAPERBOY_HTTP_TIMEOUT_SECS".to_string(), e.to_string())
            })?;

        let mut config = Self::with_base_url(base_url);
        config.timeout = Duration::from_secs(timeout_secs);
        Ok(config)
    }

    /// Build a configuration pointing at an explicit base URL.
    ///
    /// Trailing slashes are stripped so paths can be appended verbatim.
    /// Used by tests to point the client at a stub service.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self {
            base_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

fn get_env_or_default(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_base_url_strips_trailing_slashes() {
        let config = ClientConfig::with_base_url("http://127.0.0.1:8080///");
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
    }

    #[test]
    fn test_default_timeout() {
        let config = ClientConfig::with_base_url("http://127.0.0.1:8080");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidEnvVar(
            "PAPERBOY_HTTP_TIMEOUT_SECS".to_string(),
            "invalid digit".to_string(),
        );
        assert_eq!(
            err.to_string(),
            "Invalid environment variable PAPERBOY_HTTP_TIMEOUT_SECS: invalid digit"
        );
    }
}
