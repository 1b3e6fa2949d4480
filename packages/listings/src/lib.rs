//! Backend-agnostic roommate listing discovery library.
//!
//! The core of a roommate-marketplace client, independent of any UI
//! framework: an in-memory [`ListingStore`] fed by the remote API, a pure
//! [`evaluate`] engine deriving filtered and ordered views, and an
//! [`InterestController`] reconciling like/unlike toggles against server
//! truth. Persistence is reached exclusively through the
//! [`ListingGateway`] trait, so the engine runs identically against the
//! real API or an in-memory mock.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use listings::{evaluate, FilterCriteria, InterestController, ListingStore, SortKey};
//! use listings::testing::MockGateway;
//!
//! let gateway = Arc::new(MockGateway::new());
//! let store = Arc::new(ListingStore::new(gateway.clone()));
//! store.load().await?;
//!
//! let cheap_first = evaluate(
//!     &store.snapshot(),
//!     &FilterCriteria::new().with_max_rent(800.0).sorted_by(SortKey::PriceLow),
//! );
//!
//! let controller = InterestController::new(gateway, store.clone());
//! let state = controller.toggle(&cheap_first[0].id, Some(&viewer)).await?;
//! ```
//!
//! # Modules
//!
//! - [`types`] - core data types (listings, criteria, interest, viewer)
//! - [`traits`] - the [`ListingGateway`] persistence seam
//! - [`store`] - the in-memory listing collection
//! - [`filter`] - pure filtering and ordering
//! - [`interest`] - the like/unlike state machine
//! - [`gateway`] - gateway implementations (`rooms-api` feature)
//! - [`testing`] - mock gateway for tests

pub mod error;
pub mod filter;
pub mod gateway;
pub mod interest;
pub mod store;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{FetchError, GatewayError, InterestError};
pub use filter::evaluate;
pub use interest::InterestController;
pub use store::ListingStore;
pub use traits::ListingGateway;
pub use types::{
    FilterCriteria, InterestState, InterestStatus, LifestylePrefs, Listing, ListingDraft,
    ListingId, ListingPatch, RoomType, SortKey, UserId, Viewer,
};

#[cfg(feature = "rooms-api")]
pub use gateway::RoomsGateway;
