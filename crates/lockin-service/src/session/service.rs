//! Session creation, participation, status transitions and time logging.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use lockin_auth::rbac::{GroupPermission, RbacEnforcer, SessionPermission};
use lockin_core::config::TransitionMode;
use lockin_core::error::AppError;
use lockin_core::result::AppResult;
use lockin_database::connection::commit;
use lockin_database::repositories::{SessionRepository, TimeLogRepository};
use lockin_database::DatabasePool;
use lockin_entity::session::{
    ParticipantRole, Session, SessionParticipant, SessionStatus, TimeLog,
};

use super::transition::plan_transition;
use crate::context::RequestContext;
use crate::group::GroupAccess;

/// A session together with its participants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDetail {
    /// The session row.
    #[serde(flatten)]
    pub session: Session,
    /// Participants, host first.
    pub participants: Vec<SessionParticipant>,
}

/// The Session Lifecycle Manager.
#[derive(Debug, Clone)]
pub struct SessionService {
    /// Database pool for transactions.
    db: DatabasePool,
    /// Session repository.
    sessions: Arc<SessionRepository>,
    /// Time log repository.
    time_logs: Arc<TimeLogRepository>,
    /// Group access checks.
    access: Arc<GroupAccess>,
    /// RBAC enforcer.
    rbac: Arc<RbacEnforcer>,
    /// State machine strictness.
    mode: TransitionMode,
}

impl SessionService {
    /// Creates a new session service.
    pub fn new(
        db: DatabasePool,
        sessions: Arc<SessionRepository>,
        time_logs: Arc<TimeLogRepository>,
        access: Arc<GroupAccess>,
        rbac: Arc<RbacEnforcer>,
        mode: TransitionMode,
    ) -> Self {
        Self {
            db,
            sessions,
            time_logs,
            access,
            rbac,
            mode,
        }
    }

    /// Creates a `scheduled` session with the caller as its host.
    ///
    /// A `scheduled_start` is stored as the provisional `started_at`.
    pub async fn create_session(
        &self,
        ctx: &RequestContext,
        group_id: Option<Uuid>,
        scheduled_start: Option<DateTime<Utc>>,
    ) -> AppResult<SessionDetail> {
        if let Some(group_id) = group_id {
            self.access
                .require(ctx, group_id, GroupPermission::CreateSession)
                .await?;
        }

        let mut tx = self.db.begin().await?;
        let session = self
            .sessions
            .create(&mut tx, ctx.user_id, group_id, scheduled_start)
            .await?;
        let host = self
            .sessions
            .ensure_participant(&mut tx, session.id, ctx.user_id, ParticipantRole::Host)
            .await?;
        commit(tx).await?;

        info!(
            session_id = %session.id,
            creator_id = %ctx.user_id,
            group_id = ?group_id,
            "Session created"
        );

        Ok(SessionDetail {
            session,
            participants: vec![host],
        })
    }

    /// Returns a session with its participants.
    ///
    /// Group sessions are visible to group members only.
    pub async fn get_session(
        &self,
        ctx: &RequestContext,
        session_id: Uuid,
    ) -> AppResult<SessionDetail> {
        let session = self.load(session_id).await?;
        self.require_visible(ctx, &session).await?;
        let participants = self.sessions.find_participants(session_id).await?;
        Ok(SessionDetail {
            session,
            participants,
        })
    }

    /// Adds the caller as a participant. Idempotent.
    pub async fn join_session(
        &self,
        ctx: &RequestContext,
        session_id: Uuid,
    ) -> AppResult<SessionParticipant> {
        let session = self.load(session_id).await?;
        self.require_visible(ctx, &session).await?;

        self.ensure_participant(session_id, ctx.user_id, ParticipantRole::Participant)
            .await
    }

    /// Returns the participant row for `(session_id, user_id)`, creating it
    /// with `role` when absent. Calling it twice yields the same row.
    pub async fn ensure_participant(
        &self,
        session_id: Uuid,
        user_id: Uuid,
        role: ParticipantRole,
    ) -> AppResult<SessionParticipant> {
        let mut tx = self.db.begin().await?;
        let participant = self
            .sessions
            .ensure_participant(&mut tx, session_id, user_id, role)
            .await?;
        commit(tx).await?;

        debug!(
            session_id = %session_id,
            user_id = %user_id,
            participant_id = %participant.id,
            "Participant ensured"
        );
        Ok(participant)
    }

    /// Moves a session to `target`. Creator only.
    ///
    /// The row is written only if its version still equals `expected_version`
    /// (or the version read in this transaction when none is given);
    /// otherwise the call fails with `Conflict`.
    pub async fn set_status(
        &self,
        ctx: &RequestContext,
        session_id: Uuid,
        target: SessionStatus,
        at: Option<DateTime<Utc>>,
        expected_version: Option<i32>,
    ) -> AppResult<SessionDetail> {
        let mut tx = self.db.begin().await?;

        let session = self
            .sessions
            .find_by_id_in(&mut tx, session_id)
            .await?
            .ok_or_else(|| AppError::not_found("Session not found"))?;

        self.rbac
            .require_session(caller_role(&session, ctx), SessionPermission::ChangeStatus)
            .map_err(|_| AppError::forbidden("Only the session creator can change its status"))?;

        let version = expected_version.unwrap_or(session.version);
        if version != session.version {
            return Err(version_conflict(session_id));
        }

        let change = plan_transition(self.mode, &session, target, at)?;

        let updated = self
            .sessions
            .update_status(
                &mut tx,
                session_id,
                version,
                change.status,
                change.started_at,
                change.ended_at,
            )
            .await?
            .ok_or_else(|| version_conflict(session_id))?;
        let participants = self
            .sessions
            .find_participants_in(&mut tx, session_id)
            .await?;
        commit(tx).await?;

        info!(
            session_id = %session_id,
            from = %session.status,
            to = %updated.status,
            version = updated.version,
            "Session status changed"
        );

        Ok(SessionDetail {
            session: updated,
            participants,
        })
    }

    /// Appends an immutable time log for `user_id`, enrolling them as a
    /// participant on first use.
    ///
    /// The caller must be `user_id` or the session creator, and a member of
    /// the session's group if it has one.
    pub async fn append_time_log(
        &self,
        ctx: &RequestContext,
        session_id: Uuid,
        user_id: Uuid,
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
    ) -> AppResult<TimeLog> {
        if ended_at < started_at {
            return Err(AppError::invalid_interval(
                "ended_at must not precede started_at",
            ));
        }

        let session = self.load(session_id).await?;
        self.require_visible(ctx, &session).await?;
        if user_id != ctx.user_id {
            self.rbac
                .require_session(caller_role(&session, ctx), SessionPermission::LogForOthers)
                .map_err(|_| {
                    AppError::forbidden("Only the session creator can log time for another user")
                })?;
        }

        let mut tx = self.db.begin().await?;
        let participant = self
            .sessions
            .ensure_participant(&mut tx, session_id, user_id, ParticipantRole::Participant)
            .await?;
        let log = self
            .time_logs
            .create(&mut tx, participant.id, started_at, ended_at)
            .await?;
        commit(tx).await?;

        info!(
            session_id = %session_id,
            user_id = %user_id,
            seconds = log.duration_seconds(),
            "Time logged"
        );
        Ok(log)
    }

    async fn load(&self, session_id: Uuid) -> AppResult<Session> {
        self.sessions
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| AppError::not_found("Session not found"))
    }

    async fn require_visible(&self, ctx: &RequestContext, session: &Session) -> AppResult<()> {
        if let Some(group_id) = session.group_id {
            self.access
                .require(ctx, group_id, GroupPermission::ViewGroup)
                .await?;
        }
        Ok(())
    }
}

/// Role the caller holds in the session, derived from authorship.
fn caller_role(session: &Session, ctx: &RequestContext) -> ParticipantRole {
    if session.is_creator(ctx.user_id) {
        ParticipantRole::Host
    } else {
        ParticipantRole::Participant
    }
}

fn version_conflict(session_id: Uuid) -> AppError {
    AppError::conflict(format!(
        "Session {session_id} was modified concurrently; reload and retry"
    ))
}
