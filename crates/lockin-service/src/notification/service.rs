//! Notification listing, read receipts and invite answers.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use lockin_core::error::AppError;
use lockin_core::result::AppResult;
use lockin_core::types::{Cursor, CursorRequest};
use lockin_database::connection::commit;
use lockin_database::repositories::{GroupRepository, MemberRepository, NotificationRepository};
use lockin_database::{DatabasePool, DbTransaction};
use lockin_entity::group::{GroupStatus, MemberRole};
use lockin_entity::notification::{Notification, NotificationStatus};

use crate::context::RequestContext;

/// One page of notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationPage {
    /// Notifications, newest first.
    pub notifications: Vec<Notification>,
    /// Pass back to fetch the next page. `None` on the last page.
    pub next_cursor: Option<Cursor>,
}

impl NotificationPage {
    fn new(notifications: Vec<Notification>, limit: u32) -> Self {
        let next_cursor = if notifications.len() == limit as usize {
            notifications.last().map(|n| Cursor {
                created_at: n.created_at,
                id: n.id,
            })
        } else {
            None
        };
        Self {
            notifications,
            next_cursor,
        }
    }
}

/// Manages a user's notifications.
#[derive(Debug, Clone)]
pub struct NotificationService {
    /// Database pool for transactions.
    db: DatabasePool,
    /// Notification repository.
    notifications: Arc<NotificationRepository>,
    /// Group repository.
    groups: Arc<GroupRepository>,
    /// Member repository.
    members: Arc<MemberRepository>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(
        db: DatabasePool,
        notifications: Arc<NotificationRepository>,
        groups: Arc<GroupRepository>,
        members: Arc<MemberRepository>,
    ) -> Self {
        Self {
            db,
            notifications,
            groups,
            members,
        }
    }

    /// Lists the caller's notifications newest first.
    pub async fn list_notifications(
        &self,
        ctx: &RequestContext,
        unread: Option<bool>,
        page: CursorRequest,
    ) -> AppResult<NotificationPage> {
        let rows = self
            .notifications
            .find_by_recipient(ctx.user_id, unread, &page)
            .await?;
        Ok(NotificationPage::new(rows, page.limit))
    }

    /// Gets one of the caller's notifications.
    pub async fn get_notification(
        &self,
        ctx: &RequestContext,
        notification_id: Uuid,
    ) -> AppResult<Notification> {
        self.notifications
            .find_for_recipient(notification_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Notification not found"))
    }

    /// Marks a notification as read.
    pub async fn mark_read(
        &self,
        ctx: &RequestContext,
        notification_id: Uuid,
    ) -> AppResult<Notification> {
        self.notifications
            .mark_read(notification_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Notification not found"))
    }

    /// Accepts a group invite, joining the group as a member.
    ///
    /// Already being a member is not an error.
    pub async fn accept_invite(
        &self,
        ctx: &RequestContext,
        notification_id: Uuid,
    ) -> AppResult<Notification> {
        let mut tx = self.db.begin().await?;
        let invite = self.lock_open_invite(&mut tx, ctx, notification_id).await?;
        let group_id = invite
            .group_id
            .ok_or_else(|| AppError::gone("The group for this invite no longer exists"))?;

        let group = self.groups.find_by_id_in(&mut tx, group_id).await?;
        match group {
            None => return Err(AppError::gone("The group for this invite no longer exists")),
            Some(g) if g.status == GroupStatus::Archived => {
                return Err(AppError::gone("The group for this invite has been archived"));
            }
            Some(_) => {}
        }

        let joined = self
            .members
            .create_if_absent(&mut tx, group_id, ctx.user_id, MemberRole::Member)
            .await?;
        let updated = self
            .notifications
            .update_status(&mut tx, notification_id, NotificationStatus::Accepted)
            .await?;
        commit(tx).await?;

        info!(
            notification_id = %notification_id,
            group_id = %group_id,
            user_id = %ctx.user_id,
            joined,
            "Invite accepted"
        );
        Ok(updated)
    }

    /// Declines a group invite.
    pub async fn decline_invite(
        &self,
        ctx: &RequestContext,
        notification_id: Uuid,
    ) -> AppResult<Notification> {
        let mut tx = self.db.begin().await?;
        self.lock_open_invite(&mut tx, ctx, notification_id).await?;
        let updated = self
            .notifications
            .update_status(&mut tx, notification_id, NotificationStatus::Declined)
            .await?;
        commit(tx).await?;

        info!(
            notification_id = %notification_id,
            user_id = %ctx.user_id,
            "Invite declined"
        );
        Ok(updated)
    }

    async fn lock_open_invite(
        &self,
        tx: &mut DbTransaction,
        ctx: &RequestContext,
        notification_id: Uuid,
    ) -> AppResult<Notification> {
        let notification = self
            .notifications
            .lock_for_recipient(tx, notification_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Notification not found"))?;

        if !notification.is_open_invite() {
            return Err(AppError::validation(format!(
                "Notification is not an open group invite (status {})",
                notification.status
            )));
        }
        Ok(notification)
    }
}
