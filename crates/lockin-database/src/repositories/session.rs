//! Session and participant repository implementation.

use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use lockin_core::result::AppResult;
use lockin_entity::session::{ParticipantRole, Session, SessionParticipant, SessionStatus};

use crate::error::map_db_error;

/// Repository for focus sessions and their participants.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Create a new session repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a session by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Session>> {
        sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error(e, "Failed to find session"))
    }

    /// Find a session by ID on a transaction connection.
    pub async fn find_by_id_in(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
    ) -> AppResult<Option<Session>> {
        sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| map_db_error(e, "Failed to find session"))
    }

    /// Insert a `scheduled` session.
    pub async fn create(
        &self,
        conn: &mut PgConnection,
        creator_id: Uuid,
        group_id: Option<Uuid>,
        started_at: Option<DateTime<Utc>>,
    ) -> AppResult<Session> {
        sqlx::query_as::<_, Session>(
            "INSERT INTO sessions (creator_id, group_id, status, started_at) \
             VALUES ($1, $2, 'scheduled', $3) RETURNING *",
        )
        .bind(creator_id)
        .bind(group_id)
        .bind(started_at)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| map_db_error(e, "Failed to create session"))
    }

    /// Write a new status and timestamps if the row is still at
    /// `expected_version`. Returns `None` when the version moved on.
    pub async fn update_status(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
        expected_version: i32,
        status: SessionStatus,
        started_at: Option<DateTime<Utc>>,
        ended_at: Option<DateTime<Utc>>,
    ) -> AppResult<Option<Session>> {
        sqlx::query_as::<_, Session>(
            "UPDATE sessions SET status = $3, started_at = $4, ended_at = $5, version = version + 1 \
             WHERE id = $1 AND version = $2 RETURNING *",
        )
        .bind(id)
        .bind(expected_version)
        .bind(status)
        .bind(started_at)
        .bind(ended_at)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| map_db_error(e, "Failed to update session status"))
    }

    /// List the participants of a session, host first.
    pub async fn find_participants(&self, session_id: Uuid) -> AppResult<Vec<SessionParticipant>> {
        sqlx::query_as::<_, SessionParticipant>(
            "SELECT * FROM session_participants WHERE session_id = $1 ORDER BY role, id",
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Failed to list participants"))
    }

    /// List the participants of a session on a transaction connection.
    pub async fn find_participants_in(
        &self,
        conn: &mut PgConnection,
        session_id: Uuid,
    ) -> AppResult<Vec<SessionParticipant>> {
        sqlx::query_as::<_, SessionParticipant>(
            "SELECT * FROM session_participants WHERE session_id = $1 ORDER BY role, id",
        )
        .bind(session_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| map_db_error(e, "Failed to list participants"))
    }

    /// Return the participant row for `(session_id, user_id)`, inserting it
    /// with `role` if absent. Concurrent callers converge on one row.
    pub async fn ensure_participant(
        &self,
        conn: &mut PgConnection,
        session_id: Uuid,
        user_id: Uuid,
        role: ParticipantRole,
    ) -> AppResult<SessionParticipant> {
        sqlx::query(
            "INSERT INTO session_participants (session_id, user_id, role) VALUES ($1, $2, $3) \
             ON CONFLICT (session_id, user_id) DO NOTHING",
        )
        .bind(session_id)
        .bind(user_id)
        .bind(role)
        .execute(&mut *conn)
        .await
        .map_err(|e| map_db_error(e, "Failed to add participant"))?;

        sqlx::query_as::<_, SessionParticipant>(
            "SELECT * FROM session_participants WHERE session_id = $1 AND user_id = $2",
        )
        .bind(session_id)
        .bind(user_id)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| map_db_error(e, "Failed to load participant"))
    }
}
