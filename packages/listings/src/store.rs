//! In-memory listing collection with atomic replacement on load.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::{FetchError, FetchResult};
use crate::traits::ListingGateway;
use crate::types::{Listing, ListingId};

/// Ordered, in-memory collection of the latest known listings.
///
/// The store is the only mutable shared state in the core. Writers go
/// through [`load`](Self::load), [`upsert`](Self::upsert) and
/// [`remove`](Self::remove); readers take owned snapshots, so an
/// iteration over a snapshot is unaffected by concurrent mutation.
///
/// Locks are only held for non-suspending critical sections and never
/// across an `.await`.
pub struct ListingStore<G> {
    gateway: Arc<G>,
    listings: RwLock<Vec<Listing>>,
    /// Monotonic load generation; stale load responses are discarded.
    generation: AtomicU64,
    revision_tx: watch::Sender<u64>,
}

impl<G: ListingGateway> ListingStore<G> {
    /// Create an empty store backed by the given gateway.
    pub fn new(gateway: Arc<G>) -> Self {
        let (revision_tx, _) = watch::channel(0);
        Self {
            gateway,
            listings: RwLock::new(Vec::new()),
            generation: AtomicU64::new(0),
            revision_tx,
        }
    }

    /// Replace the whole collection from the gateway.
    ///
    /// On success the held sequence is swapped atomically; readers never
    /// observe a partial replacement. On failure the previous snapshot
    /// stays untouched and the error is returned for the caller to
    /// surface (no automatic retry).
    ///
    /// When loads overlap, only the newest issued load applies its
    /// response; a stale response is discarded and the current snapshot
    /// returned instead.
    pub async fn load(&self) -> FetchResult<Vec<Listing>> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(generation, "loading listings");

        let fetched = self.gateway.fetch_all().await.map_err(|err| {
            warn!(generation, error = %err, "listing load failed, keeping previous snapshot");
            FetchError::Gateway(err)
        })?;

        let count = fetched.len();
        {
            let mut listings = self.listings.write().unwrap();
            if self.generation.load(Ordering::SeqCst) != generation {
                debug!(generation, "discarding stale load response");
                return Ok(listings.clone());
            }
            *listings = fetched;
        }
        self.bump_revision();
        info!(count, "listing store replaced");
        Ok(self.snapshot())
    }

    /// Replace the record with a matching id, or append if absent.
    ///
    /// Used after a confirmed create, update or interest toggle.
    pub fn upsert(&self, listing: Listing) {
        {
            let mut listings = self.listings.write().unwrap();
            match listings.iter_mut().find(|existing| existing.id == listing.id) {
                Some(existing) => *existing = listing,
                None => listings.push(listing),
            }
        }
        self.bump_revision();
    }

    /// Remove a record by id after a confirmed delete.
    ///
    /// A miss is a no-op, so callers can evict unconditionally after a
    /// gateway `NotFound`.
    pub fn remove(&self, id: &ListingId) {
        let removed = {
            let mut listings = self.listings.write().unwrap();
            let before = listings.len();
            listings.retain(|listing| &listing.id != id);
            listings.len() != before
        };
        if removed {
            self.bump_revision();
        }
    }

    /// Owned point-in-time copy of the collection.
    pub fn snapshot(&self) -> Vec<Listing> {
        self.listings.read().unwrap().clone()
    }

    /// Look up a single record by id.
    pub fn get(&self, id: &ListingId) -> Option<Listing> {
        self.listings
            .read()
            .unwrap()
            .iter()
            .find(|listing| &listing.id == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.listings.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.read().unwrap().is_empty()
    }

    /// Revision channel; the observed value bumps on every mutation.
    ///
    /// Consumers re-evaluate their derived views on change instead of
    /// polling the store.
    pub fn watch(&self) -> watch::Receiver<u64> {
        self.revision_tx.subscribe()
    }

    fn bump_revision(&self) {
        self.revision_tx.send_modify(|revision| *revision += 1);
    }
}
