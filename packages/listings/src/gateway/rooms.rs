//! `ListingGateway` over the rooms REST API.
//!
//! Adapts [`rooms_api_client::RoomsClient`] to the core gateway trait.
//! All wire-shape tolerance (camelCase fields, interest-count drift)
//! stays inside the client crate; this module only converts between DTOs
//! and core types and maps errors.

use async_trait::async_trait;
use rooms_api_client::{
    CreateRoomBody, LikeStatusDto, ListRoomsQuery, PreferencesDto, RoomDto, RoomsApiError,
    RoomsClient, UpdateRoomBody,
};

use crate::error::{GatewayError, GatewayResult};
use crate::traits::ListingGateway;
use crate::types::{
    InterestStatus, LifestylePrefs, Listing, ListingDraft, ListingId, ListingPatch, RoomType,
    UserId, Viewer,
};

/// Gateway backed by the rooms REST API.
pub struct RoomsGateway {
    client: RoomsClient,
    available_only: bool,
}

impl RoomsGateway {
    pub fn new(client: RoomsClient) -> Self {
        Self {
            client,
            available_only: false,
        }
    }

    /// Restrict `fetch_all` to listings still open for matching.
    pub fn available_only(mut self) -> Self {
        self.available_only = true;
        self
    }
}

#[async_trait]
impl ListingGateway for RoomsGateway {
    async fn fetch_all(&self) -> GatewayResult<Vec<Listing>> {
        let mut query = ListRoomsQuery::new();
        if self.available_only {
            query = query.available(true);
        }
        let rooms = self.client.list_rooms(&query).await.map_err(map_err)?;
        Ok(rooms.into_iter().map(listing_from_dto).collect())
    }

    async fn fetch_one(&self, id: &ListingId) -> GatewayResult<Listing> {
        let room = self.client.get_room(id.as_str()).await.map_err(map_err)?;
        Ok(listing_from_dto(room))
    }

    async fn create(&self, draft: &ListingDraft) -> GatewayResult<Listing> {
        let room = self
            .client
            .create_room(&draft_to_body(draft))
            .await
            .map_err(map_err)?;
        Ok(listing_from_dto(room))
    }

    async fn update(&self, id: &ListingId, patch: &ListingPatch) -> GatewayResult<Listing> {
        let room = self
            .client
            .update_room(id.as_str(), &patch_to_body(patch))
            .await
            .map_err(map_err)?;
        Ok(listing_from_dto(room))
    }

    async fn delete(&self, id: &ListingId) -> GatewayResult<()> {
        self.client.delete_room(id.as_str()).await.map_err(map_err)
    }

    async fn set_interest(
        &self,
        id: &ListingId,
        viewer: &Viewer,
        add: bool,
    ) -> GatewayResult<InterestStatus> {
        let status = if add {
            self.client.like_room(id.as_str(), &viewer.bearer_token).await
        } else {
            self.client.unlike_room(id.as_str(), &viewer.bearer_token).await
        }
        .map_err(map_err)?;
        Ok(status_from_dto(status))
    }

    async fn fetch_interest_status(
        &self,
        id: &ListingId,
        viewer: &Viewer,
    ) -> GatewayResult<InterestStatus> {
        let status = self
            .client
            .like_status(id.as_str(), &viewer.bearer_token)
            .await
            .map_err(map_err)?;
        Ok(status_from_dto(status))
    }
}

fn listing_from_dto(dto: RoomDto) -> Listing {
    let interest_count = dto.interest_count();
    Listing {
        id: ListingId::from_raw(dto.id),
        title: dto.title,
        location: dto.location,
        description: dto.description,
        rent_amount: dto.rent_amount,
        room_type: RoomType::new(dto.room_type.unwrap_or_default()),
        lifestyle: LifestylePrefs {
            pets: dto.preferences.pets,
            smoking: dto.preferences.smoking,
            night_owl: dto.preferences.night_owl,
        },
        available: dto.availability,
        owner_id: UserId::from_raw(dto.owner_id),
        interest_count,
        created_at: dto.created_at,
    }
}

fn status_from_dto(dto: LikeStatusDto) -> InterestStatus {
    InterestStatus::new(dto.count(), dto.has_interest)
}

fn draft_to_body(draft: &ListingDraft) -> CreateRoomBody {
    CreateRoomBody {
        title: draft.title.clone(),
        location: draft.location.clone(),
        description: draft.description.clone(),
        rent_amount: draft.rent_amount,
        room_type: non_empty(draft.room_type.as_str()),
        preferences: prefs_to_dto(draft.lifestyle),
        availability: draft.available,
    }
}

fn patch_to_body(patch: &ListingPatch) -> UpdateRoomBody {
    UpdateRoomBody {
        title: patch.title.clone(),
        location: patch.location.clone(),
        description: patch.description.clone(),
        rent_amount: patch.rent_amount,
        room_type: patch.room_type.as_ref().map(|t| t.as_str().to_string()),
        preferences: patch.lifestyle.map(prefs_to_dto),
        availability: patch.available,
    }
}

fn prefs_to_dto(lifestyle: LifestylePrefs) -> PreferencesDto {
    PreferencesDto {
        pets: lifestyle.pets,
        smoking: lifestyle.smoking,
        night_owl: lifestyle.night_owl,
    }
}

fn non_empty(tag: &str) -> Option<String> {
    if tag.is_empty() {
        None
    } else {
        Some(tag.to_string())
    }
}

fn map_err(err: RoomsApiError) -> GatewayError {
    match err {
        RoomsApiError::NotFound { id } => GatewayError::NotFound {
            id: ListingId::from_raw(id),
        },
        RoomsApiError::Unauthorized(_) => GatewayError::Unauthenticated,
        RoomsApiError::Parse(err) => GatewayError::Decode(err.to_string()),
        other => GatewayError::Transport(Box::new(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dto_conversion_normalizes_interest() {
        let json = r#"{
            "_id": "r9",
            "title": "Corner room",
            "location": "Duluth",
            "description": "Lake view",
            "rentAmount": 720.0,
            "roomType": "Shared",
            "preferences": {"pets": true, "smoking": false, "nightOwl": false},
            "availability": false,
            "ownerId": "o7",
            "likes": ["a", "b", "c"],
            "createdAt": "2024-05-10T08:00:00Z"
        }"#;
        let dto: RoomDto = serde_json::from_str(json).unwrap();

        let listing = listing_from_dto(dto);
        assert_eq!(listing.id, ListingId::from_raw("r9"));
        assert_eq!(listing.owner_id, UserId::from_raw("o7"));
        assert_eq!(listing.interest_count, 3);
        assert!(listing.room_type.matches("shared"));
        assert!(listing.lifestyle.pets);
        assert!(!listing.available);
    }

    #[test]
    fn test_error_mapping() {
        let not_found = map_err(RoomsApiError::NotFound { id: "r1".into() });
        assert!(matches!(not_found, GatewayError::NotFound { id } if id.as_str() == "r1"));

        let unauthorized = map_err(RoomsApiError::Unauthorized("expired".into()));
        assert!(matches!(unauthorized, GatewayError::Unauthenticated));

        let api = map_err(RoomsApiError::Api {
            status: 500,
            message: "boom".into(),
        });
        assert!(matches!(api, GatewayError::Transport(_)));
    }
}
