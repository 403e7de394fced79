//! Error type shared by every endpoint.

use thiserror::Error;

/// Why an API call produced no data.
///
/// Views usually collapse all of these into an empty or zeroed screen, but the
/// kinds stay distinct so logs and notices can tell a malformed response apart
/// from an unreachable or unhappy backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request failed with status {status}")]
    Status { status: u16 },
    #[error("malformed response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
    #[error("not signed in")]
    Unauthenticated,
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    /// The backend answered successfully but the body did not match the contract.
    pub fn is_malformed(&self) -> bool {
        matches!(self, ApiError::Decode { .. })
    }

    /// The error was raised before anything was sent.
    pub fn is_local(&self) -> bool {
        matches!(self, ApiError::Unauthenticated | ApiError::Validation(_))
    }
}
