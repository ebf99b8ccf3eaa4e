//! Group entity model.

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use lockin_core::{AppError, AppResult};

use super::period::GoalPeriod;
use super::status::GroupStatus;

/// A time-boxed accountability circle.
///
/// `end_at` is always strictly after `start_at`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Group {
    /// Unique group identifier.
    pub id: Uuid,
    /// The owning profile.
    pub owner_id: Uuid,
    /// Group name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// When the group starts. Anchors weekly periods.
    pub start_at: DateTime<Utc>,
    /// When the group ends.
    pub end_at: DateTime<Utc>,
    /// IANA timezone name used for daily windows.
    pub timezone: String,
    /// Goal period kind.
    pub period: GoalPeriod,
    /// Minutes each member must accumulate per period.
    pub period_target_minutes: i32,
    /// Lifecycle status.
    pub status: GroupStatus,
    /// When the group was created.
    pub created_at: DateTime<Utc>,
    /// When the group was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Group {
    /// Parse the stored timezone name.
    pub fn tz(&self) -> AppResult<Tz> {
        parse_timezone(&self.timezone)
    }

    /// Total span of the group.
    pub fn duration(&self) -> Duration {
        self.end_at - self.start_at
    }
}

/// Data required to create a new group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGroup {
    /// The owning profile.
    pub owner_id: Uuid,
    /// Group name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Start instant.
    pub start_at: DateTime<Utc>,
    /// End instant.
    pub end_at: DateTime<Utc>,
    /// IANA timezone name.
    pub timezone: String,
    /// Goal period kind.
    pub period: GoalPeriod,
    /// Minutes per period.
    pub period_target_minutes: i32,
}

impl CreateGroup {
    /// Check the invariants the database would otherwise reject.
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("Group name must not be empty"));
        }
        if self.end_at <= self.start_at {
            return Err(AppError::validation("end_at must be after start_at"));
        }
        if self.period_target_minutes <= 0 {
            return Err(AppError::validation(
                "period_target_minutes must be positive",
            ));
        }
        parse_timezone(&self.timezone)?;
        Ok(())
    }
}

/// Parse an IANA timezone name.
pub fn parse_timezone(name: &str) -> AppResult<Tz> {
    name.parse::<Tz>()
        .map_err(|_| AppError::validation(format!("Unknown timezone: '{name}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(start_offset_hours: i64, target: i32, timezone: &str) -> CreateGroup {
        let start = Utc::now();
        CreateGroup {
            owner_id: Uuid::new_v4(),
            name: "Morning crew".to_string(),
            description: None,
            start_at: start,
            end_at: start + Duration::hours(start_offset_hours),
            timezone: timezone.to_string(),
            period: GoalPeriod::Daily,
            period_target_minutes: target,
        }
    }

    #[test]
    fn test_valid_group_passes() {
        assert!(create(24, 60, "America/New_York").validate().is_ok());
    }

    #[test]
    fn test_end_must_follow_start() {
        assert!(create(0, 60, "UTC").validate().is_err());
        assert!(create(-1, 60, "UTC").validate().is_err());
    }

    #[test]
    fn test_target_must_be_positive() {
        assert!(create(24, 0, "UTC").validate().is_err());
    }

    #[test]
    fn test_unknown_timezone_rejected() {
        let err = create(24, 60, "Mars/Olympus").validate().unwrap_err();
        assert!(err.message.contains("Mars/Olympus"));
    }
}
