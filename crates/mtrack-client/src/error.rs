//! Tracker API client error types.

use serde::Deserialize;

/// Errors from tracker API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The backend returned a non-2xx status.
    #[error("{endpoint} returned {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}

/// Failure body convention of the backend: `{"detail": "..."}`.
#[derive(Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    detail: Option<String>,
}

impl ApiError {
    /// The human-readable `detail` from a failure response body, if the
    /// backend sent one.
    pub fn detail(&self) -> Option<String> {
        match self {
            ApiError::Status { body, .. } => serde_json::from_str::<ErrorEnvelope>(body)
                .ok()
                .and_then(|envelope| envelope.detail),
            _ => None,
        }
    }

    /// HTTP status of a non-2xx response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Endpoint label (`"METHOD /path/"`) of the failing call.
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            ApiError::Http { endpoint, .. }
            | ApiError::Status { endpoint, .. }
            | ApiError::Deserialization { endpoint, .. } => Some(endpoint),
            ApiError::Config(_) => None,
        }
    }
}
