//! Group membership entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Role of a user within a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "member_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    /// Created the group. Exactly one per group at creation.
    Owner,
    /// Manages members alongside the owner.
    Admin,
    /// Regular participant.
    Member,
}

impl MemberRole {
    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MemberRole {
    type Err = lockin_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "owner" => Ok(Self::Owner),
            "admin" => Ok(Self::Admin),
            "member" => Ok(Self::Member),
            _ => Err(lockin_core::AppError::validation(format!(
                "Invalid member role: '{s}'. Expected one of: owner, admin, member"
            ))),
        }
    }
}

/// Join row between a user and a group. Unique per `(group_id, user_id)`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GroupMember {
    /// Unique membership identifier.
    pub id: Uuid,
    /// The group.
    pub group_id: Uuid,
    /// The member's profile id.
    pub user_id: Uuid,
    /// Role within the group.
    pub role: MemberRole,
    /// Per-member replacement for the group's target minutes.
    pub override_period_target_minutes: Option<i32>,
    /// When the membership was created.
    pub created_at: DateTime<Utc>,
}

impl GroupMember {
    /// The target minutes that apply to this member.
    pub fn effective_target_minutes(&self, group_target: i32) -> i32 {
        self.override_period_target_minutes.unwrap_or(group_target)
    }
}
