//! Gateway implementations.
//!
//! The HTTP-backed gateway lives behind the `rooms-api` feature; tests
//! and embedders that bring their own backend use
//! [`MockGateway`](crate::testing::MockGateway) or implement
//! [`ListingGateway`](crate::traits::ListingGateway) directly.

#[cfg(feature = "rooms-api")]
mod rooms;

#[cfg(feature = "rooms-api")]
pub use rooms::RoomsGateway;
