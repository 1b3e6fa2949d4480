//! Core data types.

pub mod criteria;
pub mod id;
pub mod interest;
pub mod listing;
pub mod viewer;

pub use criteria::{FilterCriteria, SortKey};
pub use id::{Id, ListingId, UserId};
pub use interest::{InterestState, InterestStatus};
pub use listing::{LifestylePrefs, Listing, ListingDraft, ListingPatch, RoomType};
pub use viewer::Viewer;
