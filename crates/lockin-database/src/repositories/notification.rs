//! Notification repository implementation.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use lockin_core::result::AppResult;
use lockin_core::types::CursorRequest;
use lockin_entity::notification::{CreateNotification, Notification, NotificationStatus};

use crate::error::map_db_error;

/// Repository for notification CRUD operations.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List a recipient's notifications newest first, continuing after the
    /// cursor when one is given.
    ///
    /// `unread = Some(true)` keeps only `pending` rows, `Some(false)` keeps
    /// everything else.
    pub async fn find_by_recipient(
        &self,
        recipient_id: Uuid,
        unread: Option<bool>,
        page: &CursorRequest,
    ) -> AppResult<Vec<Notification>> {
        let (cursor_created_at, cursor_id) = match page.after {
            Some(cursor) => (Some(cursor.created_at), Some(cursor.id)),
            None => (None, None),
        };

        sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE recipient_id = $1 \
             AND ($2::boolean IS NULL OR ($2 AND status = 'pending') OR (NOT $2 AND status <> 'pending')) \
             AND ($3::timestamptz IS NULL OR (created_at, id) < ($3, $4)) \
             ORDER BY created_at DESC, id DESC LIMIT $5",
        )
        .bind(recipient_id)
        .bind(unread)
        .bind(cursor_created_at)
        .bind(cursor_id)
        .bind(page.sql_limit())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Failed to list notifications"))
    }

    /// Find a notification owned by `recipient_id`.
    pub async fn find_for_recipient(
        &self,
        id: Uuid,
        recipient_id: Uuid,
    ) -> AppResult<Option<Notification>> {
        sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE id = $1 AND recipient_id = $2",
        )
        .bind(id)
        .bind(recipient_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Failed to find notification"))
    }

    /// Lock a notification owned by `recipient_id` for the rest of the
    /// transaction.
    pub async fn lock_for_recipient(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
        recipient_id: Uuid,
    ) -> AppResult<Option<Notification>> {
        sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE id = $1 AND recipient_id = $2 FOR UPDATE",
        )
        .bind(id)
        .bind(recipient_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| map_db_error(e, "Failed to lock notification"))
    }

    /// Insert a `pending` notification.
    pub async fn create(
        &self,
        conn: &mut PgConnection,
        data: &CreateNotification,
    ) -> AppResult<Notification> {
        sqlx::query_as::<_, Notification>(
            "INSERT INTO notifications (recipient_id, kind, status, title, body, group_id) \
             VALUES ($1, $2, 'pending', $3, $4, $5) RETURNING *",
        )
        .bind(data.recipient_id)
        .bind(data.kind)
        .bind(data.title.as_deref())
        .bind(data.body.as_deref())
        .bind(data.group_id)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| map_db_error(e, "Failed to create notification"))
    }

    /// Move `pending` to `read` and stamp `read_at`. Answered invites keep
    /// their status.
    pub async fn mark_read(&self, id: Uuid, recipient_id: Uuid) -> AppResult<Option<Notification>> {
        sqlx::query_as::<_, Notification>(
            "UPDATE notifications SET \
             status = CASE WHEN status = 'pending' THEN 'read'::notification_status ELSE status END, \
             read_at = NOW() \
             WHERE id = $1 AND recipient_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(recipient_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Failed to mark notification read"))
    }

    /// Set the status of a notification.
    pub async fn update_status(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
        status: NotificationStatus,
    ) -> AppResult<Notification> {
        sqlx::query_as::<_, Notification>(
            "UPDATE notifications SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| map_db_error(e, "Failed to update notification status"))
    }
}
