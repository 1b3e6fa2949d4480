//! Filter criteria for deriving listing views.

use serde::{Deserialize, Serialize};

use super::listing::Listing;

/// Sort orders for derived listing views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Most recently created first. Missing timestamps sort as oldest.
    #[default]
    Newest,
    /// Oldest first.
    Oldest,
    /// Highest interest count first.
    MostInterest,
    /// Lowest interest count first.
    LeastInterest,
    /// Cheapest first. Missing rent sorts as zero.
    PriceLow,
    /// Most expensive first.
    PriceHigh,
}

/// Filter, sort and limit configuration for a single evaluation.
///
/// A criteria value is immutable per evaluation: user changes produce a
/// new value rather than mutating one mid-flight.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Case-insensitive substring over title, location and description.
    pub search_text: Option<String>,

    /// Case-insensitive substring on location only.
    pub location: Option<String>,

    /// Exact (case-insensitive) room type tag.
    pub room_type: Option<String>,

    /// Inclusive lower rent bound. Listings without a rent are excluded
    /// whenever a bound is set.
    pub min_rent: Option<f64>,

    /// Inclusive upper rent bound.
    pub max_rent: Option<f64>,

    pub sort_key: SortKey,

    /// Cap on the number of results, applied after sorting.
    pub limit: Option<usize>,
}

impl FilterCriteria {
    /// Criteria with no predicates: the full snapshot, newest first.
    pub fn new() -> Self {
        Self::default()
    }

    /// Featured view: newest first, capped.
    pub fn featured(limit: usize) -> Self {
        Self::new().with_limit(limit)
    }

    pub fn with_search_text(mut self, text: impl Into<String>) -> Self {
        self.search_text = Some(text.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_room_type(mut self, tag: impl Into<String>) -> Self {
        self.room_type = Some(tag.into());
        self
    }

    pub fn with_min_rent(mut self, min: f64) -> Self {
        self.min_rent = Some(min);
        self
    }

    pub fn with_max_rent(mut self, max: f64) -> Self {
        self.max_rent = Some(max);
        self
    }

    pub fn sorted_by(mut self, key: SortKey) -> Self {
        self.sort_key = key;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// True when every active predicate admits the listing.
    pub fn matches(&self, listing: &Listing) -> bool {
        self.matches_search(listing)
            && self.matches_location(listing)
            && self.matches_room_type(listing)
            && self.matches_rent(listing)
    }

    fn matches_search(&self, listing: &Listing) -> bool {
        let Some(needle) = active(&self.search_text) else {
            return true;
        };
        let needle = needle.to_lowercase();
        listing.title.to_lowercase().contains(&needle)
            || listing.location.to_lowercase().contains(&needle)
            || listing.description.to_lowercase().contains(&needle)
    }

    fn matches_location(&self, listing: &Listing) -> bool {
        let Some(needle) = active(&self.location) else {
            return true;
        };
        listing.location.to_lowercase().contains(&needle.to_lowercase())
    }

    fn matches_room_type(&self, listing: &Listing) -> bool {
        let Some(wanted) = active(&self.room_type) else {
            return true;
        };
        listing.room_type.matches(wanted)
    }

    fn matches_rent(&self, listing: &Listing) -> bool {
        if self.min_rent.is_none() && self.max_rent.is_none() {
            return true;
        }
        // A bound is set; listings without a rent never match.
        let Some(rent) = listing.rent_amount else {
            return false;
        };
        if self.min_rent.is_some_and(|min| rent < min) {
            return false;
        }
        !self.max_rent.is_some_and(|max| rent > max)
    }
}

/// Treat empty or whitespace-only text predicates as inactive.
fn active(text: &Option<String>) -> Option<&str> {
    text.as_deref().map(str::trim).filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::id::{ListingId, UserId};

    fn listing() -> Listing {
        Listing::new(ListingId::new(), UserId::new(), "Sunny loft room")
            .with_location("Minneapolis")
            .with_description("Near the greenway, big windows")
            .with_room_type("Single")
            .with_rent(650.0)
    }

    #[test]
    fn test_search_matches_any_text_field() {
        let listing = listing();
        assert!(FilterCriteria::new().with_search_text("LOFT").matches(&listing));
        assert!(FilterCriteria::new().with_search_text("minneap").matches(&listing));
        assert!(FilterCriteria::new().with_search_text("greenway").matches(&listing));
        assert!(!FilterCriteria::new().with_search_text("garage").matches(&listing));
    }

    #[test]
    fn test_blank_predicates_are_inactive() {
        let listing = listing();
        assert!(FilterCriteria::new().with_search_text("   ").matches(&listing));
        assert!(FilterCriteria::new().with_room_type("").matches(&listing));
    }

    #[test]
    fn test_room_type_exact_case_insensitive() {
        let listing = listing();
        assert!(FilterCriteria::new().with_room_type("single").matches(&listing));
        // Substrings are not enough for the type tag.
        assert!(!FilterCriteria::new().with_room_type("sing").matches(&listing));
    }

    #[test]
    fn test_rent_bounds_inclusive() {
        let listing = listing();
        let bounded = FilterCriteria::new().with_min_rent(650.0).with_max_rent(650.0);
        assert!(bounded.matches(&listing));
        assert!(!FilterCriteria::new().with_max_rent(600.0).matches(&listing));
        assert!(!FilterCriteria::new().with_min_rent(700.0).matches(&listing));
    }

    #[test]
    fn test_missing_rent_excluded_when_bounded() {
        let no_rent = Listing::new(ListingId::new(), UserId::new(), "Flexible room");
        assert!(FilterCriteria::new().matches(&no_rent));
        assert!(!FilterCriteria::new().with_min_rent(0.0).matches(&no_rent));
        assert!(!FilterCriteria::new().with_max_rent(10_000.0).matches(&no_rent));
    }
}
