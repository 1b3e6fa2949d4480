//! Typed ID wrappers for the domain's entities.
//!
//! `Id<T>` wraps the opaque identifier string assigned by the persistence
//! layer, with a marker type that makes ids of different entities
//! incompatible at compile time:
//!
//! ```compile_fail
//! use listings::types::id::{ListingId, UserId};
//!
//! let listing_id = ListingId::new();
//! let wrong: UserId = listing_id; // Compile error!
//! ```
//!
//! Backed by a string rather than a `Uuid` because the external API owns
//! the id format; `Id::new` still mints UUIDs for locally created values.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt::{self, Debug, Display};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use uuid::Uuid;

/// Marker type for listing entities.
pub struct Listing;

/// Marker type for user entities (owners and viewers).
pub struct User;

/// Typed ID for listings.
pub type ListingId = Id<Listing>;

/// Typed ID for users.
pub type UserId = Id<User>;

/// A typed wrapper around an opaque identifier string.
pub struct Id<T>(String, PhantomData<fn() -> T>);

impl<T> Id<T> {
    /// Mint a fresh random id (UUID v4).
    #[inline]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string(), PhantomData)
    }

    /// Wrap an identifier received from the persistence layer.
    #[inline]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into(), PhantomData)
    }

    /// The raw identifier string.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unwrap into the raw identifier string.
    #[inline]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl<T> Default for Id<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Id<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self(self.0.clone(), PhantomData)
    }
}

impl<T> Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple(&format!("Id<{}>", std::any::type_name::<T>()))
            .field(&self.0)
            .finish()
    }
}

impl<T> Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<T> PartialEq for Id<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T> Hash for Id<T> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> AsRef<str> for Id<T> {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<T> From<String> for Id<T> {
    #[inline]
    fn from(raw: String) -> Self {
        Self(raw, PhantomData)
    }
}

impl<T> From<&str> for Id<T> {
    #[inline]
    fn from(raw: &str) -> Self {
        Self(raw.to_string(), PhantomData)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(ListingId::new(), ListingId::new());
    }

    #[test]
    fn test_round_trips_raw_value() {
        let id = ListingId::from_raw("5f1e7a2b9c");
        assert_eq!(id.as_str(), "5f1e7a2b9c");
        assert_eq!(id, ListingId::from("5f1e7a2b9c"));
    }

    #[test]
    fn test_serde_as_plain_string() {
        let id = UserId::from_raw("u-42");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""u-42""#);

        let back: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
