//! Interest (like) state types.

use serde::{Deserialize, Serialize};

/// Confirmed interest facts for one (listing, viewer) pair, as returned
/// by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestStatus {
    /// The listing's authoritative interest count.
    pub count: u32,
    /// Whether the viewer currently has interest recorded.
    pub has_interest: bool,
}

impl InterestStatus {
    pub fn new(count: u32, has_interest: bool) -> Self {
        Self {
            count,
            has_interest,
        }
    }
}

/// Per-(listing, viewer) interest state as seen by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestState {
    pub has_interest: bool,
    /// The listing's authoritative interest count at last confirmation.
    pub count: u32,
    /// True while a toggle request is in flight.
    pub pending: bool,
}

impl InterestState {
    /// State derived from a fresh gateway confirmation.
    pub fn confirmed(status: InterestStatus) -> Self {
        Self {
            has_interest: status.has_interest,
            count: status.count,
            pending: false,
        }
    }
}
