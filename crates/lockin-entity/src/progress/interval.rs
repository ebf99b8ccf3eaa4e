//! Logged interval attributed to a user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A time log flattened to the user it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct LoggedInterval {
    /// Owner of the log (the participant's user id).
    pub user_id: Uuid,
    /// Interval start.
    pub started_at: DateTime<Utc>,
    /// Interval end.
    pub ended_at: DateTime<Utc>,
}
