//! Group repository implementation.

use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use lockin_core::result::AppResult;
use lockin_entity::group::{CreateGroup, Group, GroupStatus};

use crate::error::map_db_error;

/// Repository for group CRUD operations.
#[derive(Debug, Clone)]
pub struct GroupRepository {
    pool: PgPool,
}

impl GroupRepository {
    /// Create a new group repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a group by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Group>> {
        sqlx::query_as::<_, Group>("SELECT * FROM groups WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error(e, "Failed to find group"))
    }

    /// Find a group by ID on a transaction connection.
    pub async fn find_by_id_in(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
    ) -> AppResult<Option<Group>> {
        sqlx::query_as::<_, Group>("SELECT * FROM groups WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| map_db_error(e, "Failed to find group"))
    }

    /// List groups the user belongs to, newest first.
    pub async fn find_for_user(
        &self,
        user_id: Uuid,
        status: Option<GroupStatus>,
    ) -> AppResult<Vec<Group>> {
        sqlx::query_as::<_, Group>(
            "SELECT g.* FROM groups g \
             JOIN group_members gm ON gm.group_id = g.id \
             WHERE gm.user_id = $1 AND ($2::group_status IS NULL OR g.status = $2) \
             ORDER BY g.created_at DESC, g.id DESC",
        )
        .bind(user_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Failed to list groups"))
    }

    /// Insert a new `active` group.
    pub async fn create(&self, conn: &mut PgConnection, data: &CreateGroup) -> AppResult<Group> {
        sqlx::query_as::<_, Group>(
            "INSERT INTO groups (owner_id, name, description, start_at, end_at, timezone, \
             period, period_target_minutes, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'active') RETURNING *",
        )
        .bind(data.owner_id)
        .bind(&data.name)
        .bind(data.description.as_deref())
        .bind(data.start_at)
        .bind(data.end_at)
        .bind(&data.timezone)
        .bind(data.period)
        .bind(data.period_target_minutes)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| map_db_error(e, "Failed to create group"))
    }

    /// Set the status of a single group.
    pub async fn set_status(&self, id: Uuid, status: GroupStatus) -> AppResult<Option<Group>> {
        sqlx::query_as::<_, Group>(
            "UPDATE groups SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Failed to update group status"))
    }

    /// Archive every non-archived group whose end instant is at or before `now`.
    pub async fn archive_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE groups SET status = 'archived', updated_at = NOW() \
             WHERE status <> 'archived' AND end_at <= $1",
        )
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Failed to archive expired groups"))?;
        Ok(result.rows_affected())
    }
}
