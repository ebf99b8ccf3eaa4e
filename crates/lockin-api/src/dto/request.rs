//! Request DTOs with validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::Validate;

use lockin_entity::group::{GoalPeriod, GroupStatus, MemberRole};
use lockin_entity::profile::UpdateProfile;
use lockin_entity::session::SessionStatus;
use lockin_service::group::{AddMemberRequest, CreateGroupRequest, UpdateMemberRequest};

/// Update own profile request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProfileBody {
    /// Display name.
    #[validate(length(min = 1, max = 100))]
    pub display_name: Option<String>,
    /// Avatar image URL.
    #[validate(url)]
    pub avatar_url: Option<String>,
}

impl From<UpdateProfileBody> for UpdateProfile {
    fn from(body: UpdateProfileBody) -> Self {
        Self {
            display_name: body.display_name,
            avatar_url: body.avatar_url,
        }
    }
}

/// Group list filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupListQuery {
    /// Only groups in this status.
    pub status: Option<GroupStatus>,
}

/// Create group request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateGroupBody {
    /// Group name.
    #[validate(length(min = 1, max = 120, message = "Name must be 1-120 characters"))]
    pub name: String,
    /// Free-form description.
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    /// Start instant.
    pub start_at: DateTime<Utc>,
    /// End instant; must be after `start_at`.
    pub end_at: DateTime<Utc>,
    /// IANA timezone name.
    #[serde(default = "default_timezone")]
    #[validate(length(min = 1, max = 64))]
    pub timezone: String,
    /// Goal period kind.
    #[serde(default)]
    pub period: GoalPeriod,
    /// Minutes per period.
    #[serde(default = "default_target_minutes")]
    #[validate(range(min = 1, max = 10080))]
    pub period_target_minutes: i32,
}

fn default_timezone() -> String {
    "America/New_York".to_string()
}

fn default_target_minutes() -> i32 {
    60
}

impl From<CreateGroupBody> for CreateGroupRequest {
    fn from(body: CreateGroupBody) -> Self {
        Self {
            name: body.name,
            description: body.description,
            start_at: body.start_at,
            end_at: body.end_at,
            timezone: body.timezone,
            period: body.period,
            period_target_minutes: body.period_target_minutes,
        }
    }
}

/// Add member request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddMemberBody {
    /// Profile to enroll.
    pub user_id: Uuid,
    /// Role to grant (default `member`).
    #[serde(default = "default_member_role")]
    pub role: MemberRole,
    /// Per-member target override.
    #[validate(range(min = 1))]
    pub override_period_target_minutes: Option<i32>,
}

fn default_member_role() -> MemberRole {
    MemberRole::Member
}

impl From<AddMemberBody> for AddMemberRequest {
    fn from(body: AddMemberBody) -> Self {
        Self {
            user_id: body.user_id,
            role: body.role,
            override_period_target_minutes: body.override_period_target_minutes,
        }
    }
}

/// Update member request. An explicit `null` override clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMemberBody {
    /// New role.
    pub role: Option<MemberRole>,
    /// New override.
    #[serde(default, deserialize_with = "present")]
    pub override_period_target_minutes: Option<Option<i32>>,
}

/// Distinguishes a field set to `null` from an absent one.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl From<UpdateMemberBody> for UpdateMemberRequest {
    fn from(body: UpdateMemberBody) -> Self {
        Self {
            role: body.role,
            override_period_target_minutes: body.override_period_target_minutes,
        }
    }
}

/// Invite request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InviteBody {
    /// Profile to invite.
    pub user_id: Uuid,
}

/// Create session request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateSessionBody {
    /// Owning group, if any.
    pub group_id: Option<Uuid>,
    /// Planned start, stored as the provisional `started_at`.
    pub scheduled_start: Option<DateTime<Utc>>,
}

/// Status change request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetStatusBody {
    /// Target status.
    pub status: SessionStatus,
    /// Transition instant; defaults to the request time.
    pub at: Option<DateTime<Utc>>,
    /// Version the caller last saw.
    pub expected_version: Option<i32>,
}

/// Time log request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppendLogBody {
    /// Whose time this is; defaults to the caller.
    pub user_id: Option<Uuid>,
    /// Interval start.
    pub started_at: DateTime<Utc>,
    /// Interval end.
    pub ended_at: DateTime<Utc>,
}

/// Notification list filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationFilter {
    /// `true` for pending only, `false` for everything else.
    pub unread: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_member_distinguishes_null_from_absent() {
        let absent: UpdateMemberBody = serde_json::from_str(r#"{"role":"admin"}"#).unwrap();
        assert_eq!(absent.override_period_target_minutes, None);
        assert_eq!(absent.role, Some(MemberRole::Admin));

        let cleared: UpdateMemberBody =
            serde_json::from_str(r#"{"override_period_target_minutes":null}"#).unwrap();
        assert_eq!(cleared.override_period_target_minutes, Some(None));

        let set: UpdateMemberBody =
            serde_json::from_str(r#"{"override_period_target_minutes":45}"#).unwrap();
        assert_eq!(set.override_period_target_minutes, Some(Some(45)));
    }

    #[test]
    fn test_create_group_defaults() {
        let body: CreateGroupBody = serde_json::from_str(
            r#"{"name":"Mornings","start_at":"2025-01-01T00:00:00Z",
                "end_at":"2025-02-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(body.timezone, "America/New_York");
        assert_eq!(body.period_target_minutes, 60);
        assert_eq!(body.period, GoalPeriod::Daily);
        assert!(body.validate().is_ok());
    }

    #[test]
    fn test_create_group_rules() {
        let body = CreateGroupBody {
            name: String::new(),
            description: None,
            start_at: Utc::now(),
            end_at: Utc::now(),
            timezone: "UTC".into(),
            period: GoalPeriod::Weekly,
            period_target_minutes: 0,
        };
        let errors = body.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("period_target_minutes"));
    }

    #[test]
    fn test_avatar_must_be_url() {
        let body = UpdateProfileBody {
            display_name: None,
            avatar_url: Some("not a url".into()),
        };
        assert!(body.validate().is_err());
    }
}
