//! Typed errors for the listings core.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so callers can match
//! on failure cases. Every operation surfaces failures as a typed `Err`;
//! logging is never the error-handling strategy.

use thiserror::Error;

use crate::types::ListingId;

/// Errors surfaced by gateway implementations.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Transport failed (connection refused, timeout, TLS, ...)
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The backend rejected or never received a bearer credential
    #[error("authentication rejected")]
    Unauthenticated,

    /// Referenced listing no longer exists
    #[error("listing not found: {id}")]
    NotFound { id: ListingId },

    /// A response arrived but could not be decoded into core types
    #[error("malformed response: {0}")]
    Decode(String),
}

/// Errors from [`ListingStore::load`](crate::store::ListingStore::load).
///
/// A failed load leaves the previous snapshot untouched; retry policy is
/// the caller's.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to load listings: {0}")]
    Gateway(#[from] GatewayError),
}

/// Errors from interest toggling.
#[derive(Debug, Error)]
pub enum InterestError {
    /// Owners cannot express interest in their own listing. Rejected
    /// before any network call.
    #[error("cannot express interest in your own listing")]
    SelfInterestForbidden,

    /// A toggle for this (listing, viewer) pair is already in flight.
    #[error("interest toggle already in progress")]
    ToggleInProgress,

    /// No authenticated viewer. No network call attempted.
    #[error("no authenticated viewer")]
    Unauthenticated,

    /// The listing is gone; it has been evicted from the store.
    #[error("listing not found: {id}")]
    ListingNotFound { id: ListingId },

    /// The gateway call failed; interest state keeps its pre-toggle values.
    #[error("interest toggle failed: {0}")]
    Network(#[source] GatewayError),
}

/// Result type alias for gateway operations.
pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

/// Result type alias for store loads.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for interest operations.
pub type InterestResult<T> = std::result::Result<T, InterestError>;
