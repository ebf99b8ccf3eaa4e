//! Time log entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An immutable interval of tracked focus time. `ended_at >= started_at`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TimeLog {
    /// Unique log identifier.
    pub id: Uuid,
    /// The participant row this interval belongs to.
    pub participant_id: Uuid,
    /// Interval start.
    pub started_at: DateTime<Utc>,
    /// Interval end.
    pub ended_at: DateTime<Utc>,
    /// When the log was recorded.
    pub created_at: DateTime<Utc>,
}

impl TimeLog {
    /// Length of the interval in whole seconds.
    pub fn duration_seconds(&self) -> i64 {
        (self.ended_at - self.started_at).num_seconds()
    }
}
