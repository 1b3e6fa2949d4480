//! Core trait abstractions.

pub mod gateway;

pub use gateway::ListingGateway;
