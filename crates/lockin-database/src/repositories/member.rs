//! Group membership repository implementation.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use lockin_core::result::AppResult;
use lockin_entity::group::{GroupMember, MemberRole};

use crate::error::map_db_error;

/// Repository for group membership rows.
#[derive(Debug, Clone)]
pub struct MemberRepository {
    pool: PgPool,
}

impl MemberRepository {
    /// Create a new member repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the membership of `user_id` in `group_id`.
    pub async fn find(&self, group_id: Uuid, user_id: Uuid) -> AppResult<Option<GroupMember>> {
        sqlx::query_as::<_, GroupMember>(
            "SELECT * FROM group_members WHERE group_id = $1 AND user_id = $2",
        )
        .bind(group_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Failed to find membership"))
    }

    /// Find a membership by its own ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<GroupMember>> {
        sqlx::query_as::<_, GroupMember>("SELECT * FROM group_members WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error(e, "Failed to find membership"))
    }

    /// List all members of a group in join order.
    pub async fn find_by_group(&self, group_id: Uuid) -> AppResult<Vec<GroupMember>> {
        sqlx::query_as::<_, GroupMember>(
            "SELECT * FROM group_members WHERE group_id = $1 ORDER BY created_at, id",
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Failed to list members"))
    }

    /// List all members of a group on a transaction connection.
    pub async fn find_by_group_in(
        &self,
        conn: &mut PgConnection,
        group_id: Uuid,
    ) -> AppResult<Vec<GroupMember>> {
        sqlx::query_as::<_, GroupMember>(
            "SELECT * FROM group_members WHERE group_id = $1 ORDER BY created_at, id",
        )
        .bind(group_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| map_db_error(e, "Failed to list members"))
    }

    /// Insert a membership. A duplicate `(group, user)` yields `AlreadyExists`.
    pub async fn create(
        &self,
        conn: &mut PgConnection,
        group_id: Uuid,
        user_id: Uuid,
        role: MemberRole,
        override_minutes: Option<i32>,
    ) -> AppResult<GroupMember> {
        sqlx::query_as::<_, GroupMember>(
            "INSERT INTO group_members (group_id, user_id, role, override_period_target_minutes) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(group_id)
        .bind(user_id)
        .bind(role)
        .bind(override_minutes)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| map_db_error(e, "Failed to add member"))
    }

    /// Insert a membership unless one already exists. Returns `true` when a
    /// row was inserted.
    pub async fn create_if_absent(
        &self,
        conn: &mut PgConnection,
        group_id: Uuid,
        user_id: Uuid,
        role: MemberRole,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "INSERT INTO group_members (group_id, user_id, role) VALUES ($1, $2, $3) \
             ON CONFLICT (group_id, user_id) DO NOTHING",
        )
        .bind(group_id)
        .bind(user_id)
        .bind(role)
        .execute(&mut *conn)
        .await
        .map_err(|e| map_db_error(e, "Failed to add member"))?;
        Ok(result.rows_affected() == 1)
    }

    /// Update role and override. `override_minutes` of `Some(None)` clears it.
    pub async fn update(
        &self,
        id: Uuid,
        role: Option<MemberRole>,
        override_minutes: Option<Option<i32>>,
    ) -> AppResult<Option<GroupMember>> {
        sqlx::query_as::<_, GroupMember>(
            "UPDATE group_members SET role = COALESCE($2, role), \
             override_period_target_minutes = CASE WHEN $3 THEN $4 ELSE override_period_target_minutes END \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(role)
        .bind(override_minutes.is_some())
        .bind(override_minutes.flatten())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Failed to update member"))
    }

    /// Delete a membership.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM group_members WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error(e, "Failed to remove member"))?;
        Ok(result.rows_affected() > 0)
    }
}
