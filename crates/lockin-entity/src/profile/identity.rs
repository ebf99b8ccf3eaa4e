//! External identity link.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Maps an identity provider subject to a local profile.
///
/// `(provider, subject)` is unique.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuthIdentity {
    /// Unique row identifier.
    pub id: Uuid,
    /// Identity provider label (e.g. `cognito`).
    pub provider: String,
    /// Subject (`sub` claim) issued by the provider.
    pub subject: String,
    /// The profile this identity resolves to.
    pub profile_id: Uuid,
}
