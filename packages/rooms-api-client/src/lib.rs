//! Pure roommate-listings REST API client.
//!
//! A minimal client for the rooms marketplace API. Supports listing,
//! fetching, creating, updating and deleting rooms, plus the like/unlike
//! sub-resource and its status endpoint.
//!
//! # Example
//!
//! ```rust,ignore
//! use rooms_api_client::{ListRoomsQuery, RoomsClient};
//!
//! let client = RoomsClient::new("https://api.roomshare.dev/api/v1")
//!     .with_token("eyJhbGci...");
//!
//! let rooms = client
//!     .list_rooms(&ListRoomsQuery::new().available(true).limit(6))
//!     .await?;
//! for room in &rooms {
//!     println!("{} ({})", room.title, room.location);
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{Result, RoomsApiError};
pub use types::{
    CreateRoomBody, InterestField, LikeStatusDto, ListRoomsQuery, PreferencesDto, RoomDto,
    UpdateRoomBody,
};

/// Client for the rooms REST API.
///
/// Cheap to clone; the inner `reqwest::Client` is shared.
#[derive(Clone)]
pub struct RoomsClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl RoomsClient {
    /// Create a client for the given API base URL (no trailing slash needed).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            base_url,
            token: None,
        }
    }

    /// Create from the `ROOMS_API_URL` and (optional) `ROOMS_API_TOKEN`
    /// environment variables.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("ROOMS_API_URL")
            .map_err(|_| RoomsApiError::Config("ROOMS_API_URL not set".into()))?;
        let mut client = Self::new(base_url);
        if let Ok(token) = std::env::var("ROOMS_API_TOKEN") {
            client.token = Some(token);
        }
        Ok(client)
    }

    /// Set the bearer credential used for authenticated endpoints.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set a custom HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// The configured API base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn bearer(&self) -> Result<&str> {
        self.token
            .as_deref()
            .ok_or_else(|| RoomsApiError::Unauthorized("no bearer token configured".into()))
    }

    fn rooms_url(&self) -> String {
        format!("{}/rooms", self.base_url)
    }

    fn room_url(&self, id: &str) -> String {
        format!("{}/rooms/{}", self.base_url, id)
    }

    /// List rooms, optionally filtered by availability and capped.
    pub async fn list_rooms(&self, query: &ListRoomsQuery) -> Result<Vec<RoomDto>> {
        let resp = self
            .client
            .get(self.rooms_url())
            .query(&query.to_pairs())
            .send()
            .await?;

        let resp = check_status(resp, None).await?;
        let rooms: Vec<RoomDto> = resp.json().await?;
        tracing::debug!(count = rooms.len(), "Fetched room list");
        Ok(rooms)
    }

    /// Fetch a single room by id.
    pub async fn get_room(&self, id: &str) -> Result<RoomDto> {
        let resp = self.client.get(self.room_url(id)).send().await?;
        let resp = check_status(resp, Some(id)).await?;
        Ok(resp.json().await?)
    }

    /// Create a room. Requires a bearer token.
    pub async fn create_room(&self, body: &CreateRoomBody) -> Result<RoomDto> {
        let resp = self
            .client
            .post(self.rooms_url())
            .bearer_auth(self.bearer()?)
            .json(body)
            .send()
            .await?;

        let resp = check_status(resp, None).await?;
        let room: RoomDto = resp.json().await?;
        tracing::info!(room_id = %room.id, "Created room");
        Ok(room)
    }

    /// Partially update a room. Requires a bearer token.
    pub async fn update_room(&self, id: &str, body: &UpdateRoomBody) -> Result<RoomDto> {
        let resp = self
            .client
            .put(self.room_url(id))
            .bearer_auth(self.bearer()?)
            .json(body)
            .send()
            .await?;

        let resp = check_status(resp, Some(id)).await?;
        Ok(resp.json().await?)
    }

    /// Delete a room. Requires a bearer token.
    pub async fn delete_room(&self, id: &str) -> Result<()> {
        let resp = self
            .client
            .delete(self.room_url(id))
            .bearer_auth(self.bearer()?)
            .send()
            .await?;

        check_status(resp, Some(id)).await?;
        tracing::info!(room_id = %id, "Deleted room");
        Ok(())
    }

    /// Express interest in a room on behalf of the given credential.
    pub async fn like_room(&self, id: &str, bearer: &str) -> Result<LikeStatusDto> {
        let resp = self
            .client
            .post(format!("{}/like", self.room_url(id)))
            .bearer_auth(bearer)
            .send()
            .await?;

        let resp = check_status(resp, Some(id)).await?;
        Ok(resp.json().await?)
    }

    /// Withdraw interest in a room on behalf of the given credential.
    pub async fn unlike_room(&self, id: &str, bearer: &str) -> Result<LikeStatusDto> {
        let resp = self
            .client
            .delete(format!("{}/like", self.room_url(id)))
            .bearer_auth(bearer)
            .send()
            .await?;

        let resp = check_status(resp, Some(id)).await?;
        Ok(resp.json().await?)
    }

    /// Read the caller's like status for a room without changing it.
    pub async fn like_status(&self, id: &str, bearer: &str) -> Result<LikeStatusDto> {
        let resp = self
            .client
            .get(format!("{}/like-status", self.room_url(id)))
            .bearer_auth(bearer)
            .send()
            .await?;

        let resp = check_status(resp, Some(id)).await?;
        Ok(resp.json().await?)
    }
}

/// Map non-2xx responses to typed errors, passing 2xx responses through.
async fn check_status(
    resp: reqwest::Response,
    room_id: Option<&str>,
) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let message = resp.text().await.unwrap_or_default();
    tracing::warn!(status = status.as_u16(), %message, "Rooms API request failed");

    match status.as_u16() {
        401 | 403 => Err(RoomsApiError::Unauthorized(message)),
        404 => Err(RoomsApiError::NotFound {
            id: room_id.unwrap_or("<collection>").to_string(),
        }),
        code => Err(RoomsApiError::Api {
            status: code,
            message,
        }),
    }
}
