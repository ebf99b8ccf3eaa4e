//! Time log repository implementation.

use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use lockin_core::result::AppResult;
use lockin_entity::progress::LoggedInterval;
use lockin_entity::session::TimeLog;

use crate::error::map_db_error;

/// Repository for the append-only time log ledger.
#[derive(Debug, Clone)]
pub struct TimeLogRepository {
    pool: PgPool,
}

impl TimeLogRepository {
    /// Create a new time log repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append a log. Logs are never updated afterwards.
    pub async fn create(
        &self,
        conn: &mut PgConnection,
        participant_id: Uuid,
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
    ) -> AppResult<TimeLog> {
        sqlx::query_as::<_, TimeLog>(
            "INSERT INTO time_logs (participant_id, started_at, ended_at) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(participant_id)
        .bind(started_at)
        .bind(ended_at)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| map_db_error(e, "Failed to append time log"))
    }

    /// List the logs of one participant in chronological order.
    pub async fn find_by_participant(&self, participant_id: Uuid) -> AppResult<Vec<TimeLog>> {
        sqlx::query_as::<_, TimeLog>(
            "SELECT * FROM time_logs WHERE participant_id = $1 ORDER BY started_at, id",
        )
        .bind(participant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Failed to list time logs"))
    }

    /// Users with at least one log in any session of the group.
    pub async fn users_with_logs_in_group(
        &self,
        conn: &mut PgConnection,
        group_id: Uuid,
    ) -> AppResult<Vec<Uuid>> {
        sqlx::query_scalar::<_, Uuid>(
            "SELECT DISTINCT sp.user_id FROM time_logs tl \
             JOIN session_participants sp ON sp.id = tl.participant_id \
             JOIN sessions s ON s.id = sp.session_id \
             WHERE s.group_id = $1",
        )
        .bind(group_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| map_db_error(e, "Failed to list logged users"))
    }

    /// Logs of the group's sessions whose interval overlaps `[start, end)`.
    pub async fn intervals_in_window(
        &self,
        conn: &mut PgConnection,
        group_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<LoggedInterval>> {
        sqlx::query_as::<_, LoggedInterval>(
            "SELECT sp.user_id, tl.started_at, tl.ended_at FROM time_logs tl \
             JOIN session_participants sp ON sp.id = tl.participant_id \
             JOIN sessions s ON s.id = sp.session_id \
             WHERE s.group_id = $1 AND tl.started_at < $3 AND tl.ended_at > $2",
        )
        .bind(group_id)
        .bind(start)
        .bind(end)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| map_db_error(e, "Failed to load time logs for progress"))
    }
}
