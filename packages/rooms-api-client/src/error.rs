//! Error types for the rooms API client.

use thiserror::Error;

/// Result type for rooms API operations.
pub type Result<T> = std::result::Result<T, RoomsApiError>;

/// Rooms API client errors.
#[derive(Debug, Error)]
pub enum RoomsApiError {
    /// Configuration error (missing base URL or credential)
    #[error("configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Non-2xx API response
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Missing or rejected bearer credential
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Resource does not exist
    #[error("room not found: {id}")]
    NotFound { id: String },

    /// Response body could not be decoded
    #[error("parse error: {0}")]
    Parse(#[source] reqwest::Error),
}

impl From<reqwest::Error> for RoomsApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Parse(err)
        } else {
            Self::Network(err)
        }
    }
}
