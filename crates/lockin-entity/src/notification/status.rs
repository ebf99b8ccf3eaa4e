//! Notification status enumeration.

use serde::{Deserialize, Serialize};

/// Delivery and response state of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    /// Not yet seen.
    Pending,
    /// Invite accepted.
    Accepted,
    /// Invite declined.
    Declined,
    /// Seen.
    Read,
}

impl NotificationStatus {
    /// Whether an invite in this status can still be answered.
    pub fn is_answerable(&self) -> bool {
        matches!(self, Self::Pending | Self::Read)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
            Self::Read => "read",
        }
    }
}

impl std::fmt::Display for NotificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
