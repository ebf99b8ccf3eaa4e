//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::kind::NotificationKind;
use super::status::NotificationStatus;

/// An asynchronous message to a user, optionally referencing a group.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: Uuid,
    /// The recipient profile.
    pub recipient_id: Uuid,
    /// What the notification is about.
    pub kind: NotificationKind,
    /// Response state.
    pub status: NotificationStatus,
    /// Short title.
    pub title: Option<String>,
    /// Body text.
    pub body: Option<String>,
    /// Referenced group (set for invites).
    pub group_id: Option<Uuid>,
    /// When the notification was read.
    pub read_at: Option<DateTime<Utc>>,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Check if the notification has not been read or answered.
    pub fn is_unread(&self) -> bool {
        self.status == NotificationStatus::Pending
    }

    /// Whether this is an invite that can still be accepted or declined.
    pub fn is_open_invite(&self) -> bool {
        self.kind == NotificationKind::GroupInvite && self.status.is_answerable()
    }
}

/// Data required to create a notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNotification {
    /// The recipient profile.
    pub recipient_id: Uuid,
    /// What the notification is about.
    pub kind: NotificationKind,
    /// Short title.
    pub title: Option<String>,
    /// Body text.
    pub body: Option<String>,
    /// Referenced group.
    pub group_id: Option<Uuid>,
}
