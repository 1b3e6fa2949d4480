//! Listing records and their embedded value types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::id::{ListingId, UserId};

/// Lifestyle flags a listing advertises. Each flag is independent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifestylePrefs {
    pub pets: bool,
    pub smoking: bool,
    pub night_owl: bool,
}

/// Open-ended room category tag ("Single", "Shared", "Studio", ...).
///
/// Kept as a string rather than a closed enum: the backend grows new
/// values without coordinating with clients. Equality is case-insensitive.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomType(String);

impl RoomType {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive tag comparison.
    pub fn matches(&self, tag: &str) -> bool {
        self.0.eq_ignore_ascii_case(tag)
    }
}

impl PartialEq for RoomType {
    fn eq(&self, other: &Self) -> bool {
        self.matches(other.as_str())
    }
}

impl Eq for RoomType {}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomType {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

/// A roommate listing as known to the store.
///
/// Records are created by the gateway on fetch and mutated only via
/// confirmed gateway responses; derived views never mutate them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    /// Assigned by the persistence layer; immutable.
    pub id: ListingId,
    pub title: String,
    pub location: String,
    pub description: String,
    /// Monthly rent, currency-agnostic. Absent rent is excluded from
    /// bounded rent filters and sorts as zero.
    pub rent_amount: Option<f64>,
    pub room_type: RoomType,
    pub lifestyle: LifestylePrefs,
    /// True while the listing is open for matching.
    pub available: bool,
    pub owner_id: UserId,
    /// Distinct users who expressed interest, as last confirmed by the
    /// backend.
    pub interest_count: u32,
    /// Absent timestamps sort as oldest.
    pub created_at: Option<DateTime<Utc>>,
}

impl Listing {
    /// Create a listing with the given essentials; everything else starts
    /// empty, available, with no recorded interest.
    pub fn new(id: ListingId, owner_id: UserId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            location: String::new(),
            description: String::new(),
            rent_amount: None,
            room_type: RoomType::new(""),
            lifestyle: LifestylePrefs::default(),
            available: true,
            owner_id,
            interest_count: 0,
            created_at: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_rent(mut self, rent: f64) -> Self {
        self.rent_amount = Some(rent);
        self
    }

    pub fn with_room_type(mut self, tag: impl Into<String>) -> Self {
        self.room_type = RoomType::new(tag);
        self
    }

    pub fn with_lifestyle(mut self, lifestyle: LifestylePrefs) -> Self {
        self.lifestyle = lifestyle;
        self
    }

    pub fn with_interest_count(mut self, count: u32) -> Self {
        self.interest_count = count;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Mark the listing closed for matching.
    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }
}

/// Content of a listing before the backend has assigned it an id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingDraft {
    pub title: String,
    pub location: String,
    pub description: String,
    pub rent_amount: Option<f64>,
    pub room_type: RoomType,
    pub lifestyle: LifestylePrefs,
    pub available: bool,
}

impl ListingDraft {
    pub fn new(
        title: impl Into<String>,
        location: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            location: location.into(),
            description: description.into(),
            rent_amount: None,
            room_type: RoomType::new(""),
            lifestyle: LifestylePrefs::default(),
            available: true,
        }
    }

    pub fn with_rent(mut self, rent: f64) -> Self {
        self.rent_amount = Some(rent);
        self
    }

    pub fn with_room_type(mut self, tag: impl Into<String>) -> Self {
        self.room_type = RoomType::new(tag);
        self
    }

    pub fn with_lifestyle(mut self, lifestyle: LifestylePrefs) -> Self {
        self.lifestyle = lifestyle;
        self
    }
}

/// Partial update to a listing; unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingPatch {
    pub title: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub rent_amount: Option<f64>,
    pub room_type: Option<RoomType>,
    pub lifestyle: Option<LifestylePrefs>,
    pub available: Option<bool>,
}

impl ListingPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn rent(mut self, rent: f64) -> Self {
        self.rent_amount = Some(rent);
        self
    }

    pub fn room_type(mut self, tag: impl Into<String>) -> Self {
        self.room_type = Some(RoomType::new(tag));
        self
    }

    pub fn availability(mut self, available: bool) -> Self {
        self.available = Some(available);
        self
    }

    /// Apply the patch to a record, leaving unset fields alone.
    pub fn apply_to(&self, listing: &mut Listing) {
        if let Some(title) = &self.title {
            listing.title = title.clone();
        }
        if let Some(location) = &self.location {
            listing.location = location.clone();
        }
        if let Some(description) = &self.description {
            listing.description = description.clone();
        }
        if let Some(rent) = self.rent_amount {
            listing.rent_amount = Some(rent);
        }
        if let Some(room_type) = &self.room_type {
            listing.room_type = room_type.clone();
        }
        if let Some(lifestyle) = self.lifestyle {
            listing.lifestyle = lifestyle;
        }
        if let Some(available) = self.available {
            listing.available = available;
        }
    }
}
