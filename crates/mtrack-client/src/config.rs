//! Tracker API client configuration.
//!
//! Defaults point at a backend on `localhost:8000`. Override via
//! environment variables or explicit construction for other deployments
//! and tests.

use url::Url;

/// Base URL the backend serves its API under by default.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

/// Configuration for connecting to the tracker backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// API root; resource paths such as `projects/` are appended to it.
    pub api_base_url: Url,
    /// Optional request timeout in seconds. `None` waits indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            // Constant input; parsing cannot fail.
            api_base_url: Url::parse(DEFAULT_API_BASE_URL)
                .unwrap_or_else(|_| unreachable!("default API base URL is valid")),
            timeout_secs: None,
        }
    }
}

impl TrackerConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `MTRACK_API_BASE_URL` (default: `http://localhost:8000/api`)
    /// - `MTRACK_TIMEOUT_SECS` (default: unset, no timeout)
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_base_url = env_url("MTRACK_API_BASE_URL", DEFAULT_API_BASE_URL)?;
        let timeout_secs = match std::env::var("MTRACK_TIMEOUT_SECS") {
            Ok(raw) => Some(
                raw.trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?,
            ),
            Err(_) => None,
        };
        Ok(Self {
            api_base_url,
            timeout_secs,
        })
    }

    /// Replace the API root, e.g. from a command-line flag.
    pub fn with_base_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.api_base_url = Url::parse(raw)
            .map_err(|e| ConfigError::InvalidUrl("api base".to_string(), e.to_string()))?;
        Ok(self)
    }

    /// Create a configuration pointing to a local mock server (for testing).
    pub fn local_mock(port: u16) -> Result<Self, ConfigError> {
        let api_base_url = Url::parse(&format!("http://127.0.0.1:{port}/api"))
            .map_err(|e| ConfigError::InvalidUrl("localhost".to_string(), e.to_string()))?;
        Ok(Self {
            api_base_url,
            timeout_secs: Some(5),
        })
    }
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("MTRACK_TIMEOUT_SECS must be a whole number of seconds, got {0:?}")]
    InvalidTimeout(String),
}
