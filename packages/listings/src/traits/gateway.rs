//! The persistence seam between the core and the remote listings API.

use async_trait::async_trait;

use crate::error::GatewayResult;
use crate::types::{InterestStatus, Listing, ListingDraft, ListingId, ListingPatch, Viewer};

/// Async boundary to the remote listings API.
///
/// The store and the interest controller reach persistence exclusively
/// through this trait. Implementations translate wire shapes into core
/// types at this boundary; nothing past it does shape-checking.
///
/// Every method is a suspension point and may fail with a transport,
/// auth or not-found error. None of them retries.
#[async_trait]
pub trait ListingGateway: Send + Sync {
    /// Fetch every listing visible to this client.
    async fn fetch_all(&self) -> GatewayResult<Vec<Listing>>;

    /// Fetch a single listing. `NotFound` if it no longer exists.
    async fn fetch_one(&self, id: &ListingId) -> GatewayResult<Listing>;

    /// Create a listing from a draft; the backend assigns the id.
    async fn create(&self, draft: &ListingDraft) -> GatewayResult<Listing>;

    /// Apply a partial update, returning the updated record.
    async fn update(&self, id: &ListingId, patch: &ListingPatch) -> GatewayResult<Listing>;

    /// Delete a listing. `NotFound` if it no longer exists.
    async fn delete(&self, id: &ListingId) -> GatewayResult<()>;

    /// Add or remove the viewer's interest, returning the confirmed state.
    async fn set_interest(
        &self,
        id: &ListingId,
        viewer: &Viewer,
        add: bool,
    ) -> GatewayResult<InterestStatus>;

    /// Read the viewer's interest state without changing it.
    async fn fetch_interest_status(
        &self,
        id: &ListingId,
        viewer: &Viewer,
    ) -> GatewayResult<InterestStatus>;
}
