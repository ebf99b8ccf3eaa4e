//! Notification kind enumeration.

use serde::{Deserialize, Serialize};

/// What a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Invitation to join a group. Accepting it creates a membership.
    GroupInvite,
    /// A member reached their period goal.
    MilestoneMember,
    /// The whole group reached its period goal.
    MilestoneGroup,
    /// Reminder for an upcoming session.
    SessionReminder,
    /// Anything else.
    Generic,
}

impl NotificationKind {
    /// Return the kind as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GroupInvite => "group_invite",
            Self::MilestoneMember => "milestone_member",
            Self::MilestoneGroup => "milestone_group",
            Self::SessionReminder => "session_reminder",
            Self::Generic => "generic",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
