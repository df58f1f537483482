//! Store action errors.

use mtrack_client::ApiError;

/// A store action that failed.
///
/// `message` is the same string the store recorded in its `error` field:
/// the backend's `detail` when present, otherwise the action's fallback
/// text (e.g. `"Failed to create project"`).
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct StoreError {
    message: String,
    #[source]
    source: ApiError,
}

impl StoreError {
    pub(crate) fn new(message: String, source: ApiError) -> Self {
        Self { message, source }
    }

    /// The user-facing message recorded in store state.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The underlying API failure.
    pub fn api_error(&self) -> &ApiError {
        &self.source
    }
}
