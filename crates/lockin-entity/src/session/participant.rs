//! Session participant entities.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Role of a user within a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "participant_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ParticipantRole {
    /// The session creator.
    Host,
    /// Anyone else associated with the session.
    #[default]
    Participant,
}

impl ParticipantRole {
    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Host => "host",
            Self::Participant => "participant",
        }
    }
}

impl fmt::Display for ParticipantRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ParticipantRole {
    type Err = lockin_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "host" => Ok(Self::Host),
            "participant" => Ok(Self::Participant),
            _ => Err(lockin_core::AppError::validation(format!(
                "Invalid participant role: '{s}'. Expected one of: host, participant"
            ))),
        }
    }
}

/// Join row between a session and a user. Unique per `(session_id, user_id)`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SessionParticipant {
    /// Unique participant identifier.
    pub id: Uuid,
    /// The session.
    pub session_id: Uuid,
    /// The participant's profile id.
    pub user_id: Uuid,
    /// Role within the session.
    pub role: ParticipantRole,
}
