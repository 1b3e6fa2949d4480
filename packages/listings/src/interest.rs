//! The like/unlike state machine.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use tracing::{debug, warn};

use crate::error::{GatewayError, InterestError, InterestResult};
use crate::store::ListingStore;
use crate::traits::ListingGateway;
use crate::types::{InterestState, InterestStatus, Listing, ListingId, UserId, Viewer};

type PairKey = (ListingId, UserId);

/// Coordinates interest toggling against the gateway.
///
/// State changes only on gateway confirmation: there is no optimistic
/// flip, and a toggle that fails leaves the pre-toggle state untouched,
/// so the UI never shows a stuck optimistic value. Re-entrancy per
/// (listing, viewer) is rejected while a toggle is in flight.
pub struct InterestController<G> {
    gateway: Arc<G>,
    store: Arc<ListingStore<G>>,
    /// Last confirmed state per (listing, viewer).
    confirmed: RwLock<HashMap<PairKey, InterestStatus>>,
    /// Pairs with a toggle currently in flight.
    in_flight: RwLock<HashSet<PairKey>>,
}

impl<G: ListingGateway> InterestController<G> {
    pub fn new(gateway: Arc<G>, store: Arc<ListingStore<G>>) -> Self {
        Self {
            gateway,
            store,
            confirmed: RwLock::new(HashMap::new()),
            in_flight: RwLock::new(HashSet::new()),
        }
    }

    /// The viewer's interest state for a listing, fetched on first use
    /// and served from the confirmed cache afterwards.
    pub async fn status(
        &self,
        listing_id: &ListingId,
        viewer: Option<&Viewer>,
    ) -> InterestResult<InterestState> {
        let viewer = viewer.ok_or(InterestError::Unauthenticated)?;
        let key = (listing_id.clone(), viewer.user_id.clone());

        let cached = self.confirmed.read().unwrap().get(&key).copied();
        let status = match cached {
            Some(status) => status,
            None => {
                let status = self
                    .gateway
                    .fetch_interest_status(listing_id, viewer)
                    .await
                    .map_err(|err| self.translate(listing_id, err))?;
                self.confirmed.write().unwrap().insert(key.clone(), status);
                status
            }
        };
        Ok(self.state_of(&key, status))
    }

    /// Toggle the viewer's interest in a listing.
    ///
    /// Rejected synchronously, before any network call: no viewer
    /// (`Unauthenticated`), the viewer owns the listing
    /// (`SelfInterestForbidden`), or a toggle for the same pair already
    /// in flight (`ToggleInProgress`). The direction comes from the last
    /// confirmed `has_interest`; on success the store's record picks up
    /// the confirmed count.
    pub async fn toggle(
        &self,
        listing_id: &ListingId,
        viewer: Option<&Viewer>,
    ) -> InterestResult<InterestState> {
        let viewer = viewer.ok_or(InterestError::Unauthenticated)?;

        let listing = self
            .store
            .get(listing_id)
            .ok_or_else(|| InterestError::ListingNotFound {
                id: listing_id.clone(),
            })?;
        if listing.owner_id == viewer.user_id {
            return Err(InterestError::SelfInterestForbidden);
        }

        let key = (listing_id.clone(), viewer.user_id.clone());
        if !self.in_flight.write().unwrap().insert(key.clone()) {
            return Err(InterestError::ToggleInProgress);
        }

        let result = self.toggle_confirmed(&key, &listing, viewer).await;
        self.in_flight.write().unwrap().remove(&key);
        result
    }

    async fn toggle_confirmed(
        &self,
        key: &PairKey,
        listing: &Listing,
        viewer: &Viewer,
    ) -> InterestResult<InterestState> {
        let cached = self.confirmed.read().unwrap().get(key).copied();
        let current = match cached {
            Some(status) => status,
            None => self
                .gateway
                .fetch_interest_status(&listing.id, viewer)
                .await
                .map_err(|err| self.translate(&listing.id, err))?,
        };

        let add = !current.has_interest;
        debug!(listing = %listing.id, add, "toggling interest");

        let status = self
            .gateway
            .set_interest(&listing.id, viewer, add)
            .await
            .map_err(|err| self.translate(&listing.id, err))?;

        self.confirmed.write().unwrap().insert(key.clone(), status);

        // Re-read the store's copy: other fields may have moved while the
        // request was in flight, and only the count is ours to reconcile.
        let mut updated = self.store.get(&listing.id).unwrap_or_else(|| listing.clone());
        updated.interest_count = status.count;
        self.store.upsert(updated);

        Ok(InterestState::confirmed(status))
    }

    fn state_of(&self, key: &PairKey, status: InterestStatus) -> InterestState {
        InterestState {
            has_interest: status.has_interest,
            count: status.count,
            pending: self.in_flight.read().unwrap().contains(key),
        }
    }

    /// Map a gateway failure, evicting listings the backend no longer has.
    fn translate(&self, listing_id: &ListingId, err: GatewayError) -> InterestError {
        match err {
            GatewayError::NotFound { .. } => {
                warn!(listing = %listing_id, "listing gone from backend, evicting");
                self.store.remove(listing_id);
                self.confirmed
                    .write()
                    .unwrap()
                    .retain(|(id, _), _| id != listing_id);
                InterestError::ListingNotFound {
                    id: listing_id.clone(),
                }
            }
            GatewayError::Unauthenticated => InterestError::Unauthenticated,
            other => InterestError::Network(other),
        }
    }
}
