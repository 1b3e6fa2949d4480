use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The interest tally as it has historically appeared on the wire.
///
/// The backend has served this field as a plain integer, an array of
/// interested user ids, a wrapped `{"count": n}` object, and a numeric
/// string. All shapes are normalized through [`InterestField::count`];
/// no other code inspects the raw shape.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum InterestField {
    /// Plain integer count.
    Count(u32),
    /// Count wrapped in an object, e.g. `{"count": 4}`.
    Wrapped { count: u32 },
    /// Array of interested user ids; the count is its length.
    Users(Vec<serde_json::Value>),
    /// Count serialized as a string.
    Text(String),
}

impl InterestField {
    /// Normalize to a single integer. Unparseable text counts as zero.
    pub fn count(&self) -> u32 {
        match self {
            Self::Count(n) => *n,
            Self::Wrapped { count } => *count,
            Self::Users(users) => users.len() as u32,
            Self::Text(text) => text.trim().parse().unwrap_or(0),
        }
    }
}

/// Lifestyle flags advertised on a room.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesDto {
    #[serde(default)]
    pub pets: bool,
    #[serde(default)]
    pub smoking: bool,
    #[serde(default)]
    pub night_owl: bool,
}

/// A room listing as returned by the API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDto {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    pub rent_amount: Option<f64>,
    pub room_type: Option<String>,
    #[serde(default)]
    pub preferences: PreferencesDto,
    #[serde(default = "default_availability")]
    pub availability: bool,
    #[serde(alias = "user", alias = "createdBy")]
    pub owner_id: String,
    #[serde(
        default,
        alias = "likes",
        alias = "likeCount",
        alias = "interestedUsers",
        alias = "interestCount"
    )]
    pub interest: Option<InterestField>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl RoomDto {
    /// Normalized interest count; a missing field counts as zero.
    pub fn interest_count(&self) -> u32 {
        self.interest.as_ref().map_or(0, InterestField::count)
    }
}

fn default_availability() -> bool {
    true
}

/// Like status for a room as seen by the authenticated caller.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeStatusDto {
    #[serde(default, alias = "likes", alias = "likesCount")]
    pub count: Option<InterestField>,
    #[serde(default, alias = "liked", alias = "isLiked")]
    pub has_interest: bool,
}

impl LikeStatusDto {
    /// Normalized interest count; a missing field counts as zero.
    pub fn count(&self) -> u32 {
        self.count.as_ref().map_or(0, InterestField::count)
    }
}

/// Body for creating a room.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomBody {
    pub title: String,
    pub location: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rent_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_type: Option<String>,
    pub preferences: PreferencesDto,
    pub availability: bool,
}

/// Body for partially updating a room. Unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rent_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<PreferencesDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<bool>,
}

/// Query options for the room list endpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListRoomsQuery {
    /// Only rooms still open for matching.
    pub available: Option<bool>,
    /// Cap on the number of rooms returned.
    pub limit: Option<u32>,
}

impl ListRoomsQuery {
    /// Query with no refinements (all rooms).
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by availability.
    pub fn available(mut self, available: bool) -> Self {
        self.available = Some(available);
        self
    }

    /// Cap the number of results.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub(crate) fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(available) = self.available {
            pairs.push(("available", available.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interest_field_shapes() {
        let n: InterestField = serde_json::from_str("7").unwrap();
        assert_eq!(n.count(), 7);

        let wrapped: InterestField = serde_json::from_str(r#"{"count": 4}"#).unwrap();
        assert_eq!(wrapped.count(), 4);

        let users: InterestField =
            serde_json::from_str(r#"["u1", {"id": "u2"}, "u3"]"#).unwrap();
        assert_eq!(users.count(), 3);

        let text: InterestField = serde_json::from_str(r#""12""#).unwrap();
        assert_eq!(text.count(), 12);

        let garbage: InterestField = serde_json::from_str(r#""a lot""#).unwrap();
        assert_eq!(garbage.count(), 0);
    }

    #[test]
    fn test_room_dto_camel_case() {
        let json = r#"{
            "_id": "abc123",
            "title": "Sunny room near campus",
            "location": "Minneapolis",
            "description": "South-facing window",
            "rentAmount": 650.0,
            "roomType": "Single",
            "preferences": {"pets": true, "smoking": false, "nightOwl": true},
            "availability": true,
            "ownerId": "owner-1",
            "interestedUsers": ["u1", "u2"],
            "createdAt": "2024-03-01T12:00:00Z"
        }"#;

        let room: RoomDto = serde_json::from_str(json).unwrap();
        assert_eq!(room.id, "abc123");
        assert_eq!(room.rent_amount, Some(650.0));
        assert_eq!(room.room_type.as_deref(), Some("Single"));
        assert!(room.preferences.pets);
        assert!(room.preferences.night_owl);
        assert_eq!(room.interest_count(), 2);
        assert!(room.created_at.is_some());
    }

    #[test]
    fn test_room_dto_sparse_fields() {
        let json = r#"{"id": "r1", "title": "Spare room", "ownerId": "o1"}"#;

        let room: RoomDto = serde_json::from_str(json).unwrap();
        assert_eq!(room.rent_amount, None);
        assert!(room.availability);
        assert_eq!(room.interest_count(), 0);
        assert!(room.created_at.is_none());
    }

    #[test]
    fn test_like_status_aliases() {
        let status: LikeStatusDto =
            serde_json::from_str(r#"{"likesCount": 5, "liked": false}"#).unwrap();
        assert_eq!(status.count(), 5);
        assert!(!status.has_interest);

        let status: LikeStatusDto =
            serde_json::from_str(r#"{"count": {"count": 6}, "hasInterest": true}"#).unwrap();
        assert_eq!(status.count(), 6);
        assert!(status.has_interest);
    }

    #[test]
    fn test_update_body_skips_unset_fields() {
        let body = UpdateRoomBody {
            rent_amount: Some(700.0),
            ..Default::default()
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"rentAmount": 700.0}));
    }

    #[test]
    fn test_list_query_pairs() {
        let query = ListRoomsQuery::new().available(true).limit(6);
        assert_eq!(
            query.to_pairs(),
            vec![
                ("available", "true".to_string()),
                ("limit", "6".to_string())
            ]
        );
        assert!(ListRoomsQuery::new().to_pairs().is_empty());
    }
}
