//! Request context carrying the authenticated caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use lockin_entity::profile::Profile;

/// Context for the current authenticated request.
///
/// Built by the API layer from the resolved profile and passed into
/// service methods so that every operation knows who is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The caller's profile ID.
    pub user_id: Uuid,
    /// The caller's email.
    pub email: String,
    /// The caller's display name.
    pub display_name: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a context for `profile`.
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            user_id: profile.id,
            email: profile.email.clone(),
            display_name: profile.display_name.clone(),
            request_time: Utc::now(),
        }
    }

    /// Name shown to other users.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.email)
    }
}
