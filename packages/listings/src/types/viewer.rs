//! The authenticated viewer, as supplied by the external auth provider.

use std::fmt;

use super::id::UserId;

/// The user on whose behalf the core acts.
///
/// Supplied by the auth collaborator; the core only ever reads this tuple.
/// Operations that need one and receive none fail with `Unauthenticated`.
#[derive(Clone)]
pub struct Viewer {
    pub user_id: UserId,
    pub email: String,
    pub display_name: String,
    /// Credential attached to gateway calls that require auth.
    pub bearer_token: String,
}

impl Viewer {
    pub fn new(
        user_id: UserId,
        email: impl Into<String>,
        display_name: impl Into<String>,
        bearer_token: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            email: email.into(),
            display_name: display_name.into(),
            bearer_token: bearer_token.into(),
        }
    }
}

// Manual Debug so the credential never lands in logs.
impl fmt::Debug for Viewer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Viewer")
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("display_name", &self.display_name)
            .field("bearer_token", &"<redacted>")
            .finish()
    }
}
