//! Session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::SessionStatus;

/// One focus-tracking occasion, optionally tied to a group.
///
/// `ended_at` is only set when `started_at` is, and never precedes it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    /// Unique session identifier.
    pub id: Uuid,
    /// Owning group, if any. Advisory: survives group deletion as `NULL`.
    pub group_id: Option<Uuid>,
    /// The profile that created the session.
    pub creator_id: Uuid,
    /// Current status.
    pub status: SessionStatus,
    /// Start instant (provisional while scheduled).
    pub started_at: Option<DateTime<Utc>>,
    /// End instant.
    pub ended_at: Option<DateTime<Utc>>,
    /// Optimistic concurrency counter, bumped on every status write.
    pub version: i32,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Whether `user_id` created this session.
    pub fn is_creator(&self, user_id: Uuid) -> bool {
        self.creator_id == user_id
    }
}
