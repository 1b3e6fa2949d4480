//! Testing utilities: a configurable in-memory gateway.
//!
//! Lets applications exercise the store, the filter engine and the
//! interest controller without a network. Every call is recorded so tests
//! can assert on exactly which gateway traffic an operation produced.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{GatewayError, GatewayResult};
use crate::traits::ListingGateway;
use crate::types::{
    InterestStatus, Listing, ListingDraft, ListingId, ListingPatch, UserId, Viewer,
};

/// Failure modes the mock can be armed with.
///
/// `NotFound` only makes sense for per-listing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    Transport,
    Unauthenticated,
    NotFound,
}

impl MockFailure {
    fn to_error(self, id: &ListingId) -> GatewayError {
        match self {
            Self::Transport => GatewayError::Transport(Box::new(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "simulated transport failure",
            ))),
            Self::Unauthenticated => GatewayError::Unauthenticated,
            Self::NotFound => GatewayError::NotFound { id: id.clone() },
        }
    }
}

/// Record of a call made to the mock gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    FetchAll,
    FetchOne { id: ListingId },
    Create,
    Update { id: ListingId },
    Delete { id: ListingId },
    SetInterest { id: ListingId, viewer: UserId, add: bool },
    FetchInterestStatus { id: ListingId, viewer: UserId },
}

/// A deterministic, configurable in-memory gateway.
///
/// Behaves like a tiny backend: listings are held in memory, interest is
/// a per-listing set of user ids, and each listing's `interest_count` is
/// the single authoritative tally every response reports. Failures and
/// latency can be injected per operation.
#[derive(Default)]
pub struct MockGateway {
    listings: RwLock<Vec<Listing>>,
    interested: RwLock<HashMap<ListingId, HashSet<UserId>>>,
    fetch_all_failure: RwLock<Option<MockFailure>>,
    toggle_failure: RwLock<Option<MockFailure>>,
    fetch_all_delays: RwLock<VecDeque<Duration>>,
    toggle_delay: RwLock<Option<Duration>>,
    calls: RwLock<Vec<GatewayCall>>,
}

impl MockGateway {
    /// Create an empty mock gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a listing.
    pub fn with_listing(self, listing: Listing) -> Self {
        self.listings.write().unwrap().push(listing);
        self
    }

    /// Seed several listings at once.
    pub fn with_listings(self, listings: impl IntoIterator<Item = Listing>) -> Self {
        self.listings.write().unwrap().extend(listings);
        self
    }

    /// Seed the interest state for a (listing, viewer) pair.
    ///
    /// Sets the viewer's membership and pins the listing's authoritative
    /// count, so seed the listing first.
    pub fn with_status(self, listing: &ListingId, viewer: &UserId, status: InterestStatus) -> Self {
        {
            let mut interested = self.interested.write().unwrap();
            let members = interested.entry(listing.clone()).or_default();
            if status.has_interest {
                members.insert(viewer.clone());
            } else {
                members.remove(viewer);
            }
        }
        if let Some(found) = self
            .listings
            .write()
            .unwrap()
            .iter_mut()
            .find(|candidate| &candidate.id == listing)
        {
            found.interest_count = status.count;
        }
        self
    }

    /// Make every `fetch_all` fail until cleared.
    pub fn with_fetch_all_failure(self, failure: MockFailure) -> Self {
        *self.fetch_all_failure.write().unwrap() = Some(failure);
        self
    }

    /// Make every `set_interest` fail until cleared.
    pub fn with_toggle_failure(self, failure: MockFailure) -> Self {
        *self.toggle_failure.write().unwrap() = Some(failure);
        self
    }

    /// Per-call latency for `fetch_all`, consumed front to back.
    pub fn with_fetch_all_delays(self, delays: impl IntoIterator<Item = Duration>) -> Self {
        self.fetch_all_delays.write().unwrap().extend(delays);
        self
    }

    /// Latency applied to every `set_interest` call.
    pub fn with_toggle_delay(self, delay: Duration) -> Self {
        *self.toggle_delay.write().unwrap() = Some(delay);
        self
    }

    /// Arm or clear the `fetch_all` failure after construction.
    pub fn set_fetch_all_failure(&self, failure: Option<MockFailure>) {
        *self.fetch_all_failure.write().unwrap() = failure;
    }

    /// Arm or clear the `set_interest` failure after construction.
    pub fn set_toggle_failure(&self, failure: Option<MockFailure>) {
        *self.toggle_failure.write().unwrap() = failure;
    }

    /// Add a listing to the simulated backend after construction.
    pub fn push_listing(&self, listing: Listing) {
        self.listings.write().unwrap().push(listing);
    }

    /// All calls made to this mock, in order.
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.read().unwrap().clone()
    }

    /// Clear call history.
    pub fn clear_calls(&self) {
        self.calls.write().unwrap().clear();
    }

    fn record(&self, call: GatewayCall) {
        self.calls.write().unwrap().push(call);
    }

    fn find(&self, id: &ListingId) -> GatewayResult<Listing> {
        self.listings
            .read()
            .unwrap()
            .iter()
            .find(|listing| &listing.id == id)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound { id: id.clone() })
    }

    fn is_member(&self, id: &ListingId, viewer: &UserId) -> bool {
        self.interested
            .read()
            .unwrap()
            .get(id)
            .is_some_and(|members| members.contains(viewer))
    }
}

#[async_trait]
impl ListingGateway for MockGateway {
    async fn fetch_all(&self) -> GatewayResult<Vec<Listing>> {
        self.record(GatewayCall::FetchAll);

        // Snapshot the data at call time so delayed responses carry what
        // the backend held when the request was issued.
        let listings = self.listings.read().unwrap().clone();
        let delay = self.fetch_all_delays.write().unwrap().pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(failure) = *self.fetch_all_failure.read().unwrap() {
            return Err(failure.to_error(&ListingId::from_raw("<collection>")));
        }
        Ok(listings)
    }

    async fn fetch_one(&self, id: &ListingId) -> GatewayResult<Listing> {
        self.record(GatewayCall::FetchOne { id: id.clone() });
        self.find(id)
    }

    async fn create(&self, draft: &ListingDraft) -> GatewayResult<Listing> {
        self.record(GatewayCall::Create);

        let mut listing = Listing::new(ListingId::new(), UserId::new(), draft.title.clone())
            .with_location(draft.location.clone())
            .with_description(draft.description.clone())
            .with_lifestyle(draft.lifestyle)
            .with_room_type(draft.room_type.as_str())
            .with_created_at(chrono::Utc::now());
        listing.rent_amount = draft.rent_amount;
        listing.available = draft.available;

        self.listings.write().unwrap().push(listing.clone());
        Ok(listing)
    }

    async fn update(&self, id: &ListingId, patch: &ListingPatch) -> GatewayResult<Listing> {
        self.record(GatewayCall::Update { id: id.clone() });

        let mut listings = self.listings.write().unwrap();
        let listing = listings
            .iter_mut()
            .find(|listing| &listing.id == id)
            .ok_or_else(|| GatewayError::NotFound { id: id.clone() })?;
        patch.apply_to(listing);
        Ok(listing.clone())
    }

    async fn delete(&self, id: &ListingId) -> GatewayResult<()> {
        self.record(GatewayCall::Delete { id: id.clone() });

        let mut listings = self.listings.write().unwrap();
        let before = listings.len();
        listings.retain(|listing| &listing.id != id);
        if listings.len() == before {
            return Err(GatewayError::NotFound { id: id.clone() });
        }
        self.interested.write().unwrap().remove(id);
        Ok(())
    }

    async fn set_interest(
        &self,
        id: &ListingId,
        viewer: &Viewer,
        add: bool,
    ) -> GatewayResult<InterestStatus> {
        self.record(GatewayCall::SetInterest {
            id: id.clone(),
            viewer: viewer.user_id.clone(),
            add,
        });

        let delay = *self.toggle_delay.read().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(failure) = *self.toggle_failure.read().unwrap() {
            return Err(failure.to_error(id));
        }

        self.find(id)?;
        let was_member = self.is_member(id, &viewer.user_id);
        {
            let mut interested = self.interested.write().unwrap();
            let members = interested.entry(id.clone()).or_default();
            if add {
                members.insert(viewer.user_id.clone());
            } else {
                members.remove(&viewer.user_id);
            }
        }

        let mut listings = self.listings.write().unwrap();
        let listing = listings
            .iter_mut()
            .find(|listing| &listing.id == id)
            .expect("listing vanished mid-call");
        // The count only moves when membership actually changes.
        if add && !was_member {
            listing.interest_count += 1;
        } else if !add && was_member {
            listing.interest_count = listing.interest_count.saturating_sub(1);
        }
        Ok(InterestStatus::new(listing.interest_count, add))
    }

    async fn fetch_interest_status(
        &self,
        id: &ListingId,
        viewer: &Viewer,
    ) -> GatewayResult<InterestStatus> {
        self.record(GatewayCall::FetchInterestStatus {
            id: id.clone(),
            viewer: viewer.user_id.clone(),
        });

        let listing = self.find(id)?;
        Ok(InterestStatus::new(
            listing.interest_count,
            self.is_member(id, &viewer.user_id),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewer(name: &str) -> Viewer {
        Viewer::new(
            UserId::from_raw(name),
            format!("{name}@example.com"),
            name,
            "token",
        )
    }

    #[tokio::test]
    async fn test_mock_toggle_keeps_count_consistent() {
        let listing = Listing::new(ListingId::new(), UserId::new(), "Room").with_interest_count(2);
        let id = listing.id.clone();
        let gateway = MockGateway::new().with_listing(listing);
        let alice = viewer("alice");

        let added = gateway.set_interest(&id, &alice, true).await.unwrap();
        assert_eq!(added, InterestStatus::new(3, true));

        // Adding again does not double count.
        let again = gateway.set_interest(&id, &alice, true).await.unwrap();
        assert_eq!(again, InterestStatus::new(3, true));

        let removed = gateway.set_interest(&id, &alice, false).await.unwrap();
        assert_eq!(removed, InterestStatus::new(2, false));

        let backend_copy = gateway.fetch_one(&id).await.unwrap();
        assert_eq!(backend_copy.interest_count, 2);
    }

    #[tokio::test]
    async fn test_mock_counts_distinct_viewers() {
        let listing = Listing::new(ListingId::new(), UserId::new(), "Room");
        let id = listing.id.clone();
        let gateway = MockGateway::new().with_listing(listing);

        gateway.set_interest(&id, &viewer("alice"), true).await.unwrap();
        let status = gateway.set_interest(&id, &viewer("bob"), true).await.unwrap();
        assert_eq!(status.count, 2);

        // Alice withdrawing leaves Bob's interest counted.
        let status = gateway.set_interest(&id, &viewer("alice"), false).await.unwrap();
        assert_eq!(status, InterestStatus::new(1, false));

        let bob_view = gateway
            .fetch_interest_status(&id, &viewer("bob"))
            .await
            .unwrap();
        assert_eq!(bob_view, InterestStatus::new(1, true));
    }

    #[tokio::test]
    async fn test_mock_records_calls_in_order() {
        let gateway = MockGateway::new();
        let missing = ListingId::from_raw("missing");

        let err = gateway.fetch_one(&missing).await.unwrap_err();
        assert!(matches!(err, GatewayError::NotFound { .. }));
        assert_eq!(gateway.calls(), vec![GatewayCall::FetchOne { id: missing }]);
    }
}
