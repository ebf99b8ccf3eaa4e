//! Per-member progress summary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One member's tracked time within the group's current goal period.
///
/// Computed on every query, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRow {
    /// The group.
    pub group_id: Uuid,
    /// The member.
    pub user_id: Uuid,
    /// Inclusive window start.
    pub period_start: DateTime<Utc>,
    /// Exclusive window end.
    pub period_end: DateTime<Utc>,
    /// Whole seconds of logged time inside the window.
    pub seconds_done: i64,
    /// Effective target for this member.
    pub target_minutes: i32,
    /// `seconds_done >= target_minutes * 60`.
    pub goal_met: bool,
}
