//! Session status state machine.
//!
//! Pure planning of a status write: given the current row, the requested
//! status and an optional timestamp, decide the new `(status, started_at,
//! ended_at)` triple or reject the request.

use chrono::{DateTime, Utc};

use lockin_core::config::TransitionMode;
use lockin_core::error::AppError;
use lockin_core::result::AppResult;
use lockin_entity::session::{Session, SessionStatus};

/// The column values to persist for a status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    /// New status.
    pub status: SessionStatus,
    /// New `started_at`.
    pub started_at: Option<DateTime<Utc>>,
    /// New `ended_at`.
    pub ended_at: Option<DateTime<Utc>>,
}

/// Whether `from -> to` is an edge of the strict state machine.
pub fn is_allowed_edge(from: SessionStatus, to: SessionStatus) -> bool {
    use SessionStatus::*;
    matches!(
        (from, to),
        (Scheduled, Running)
            | (Scheduled, Cancelled)
            | (Running, Paused)
            | (Running, Ended)
            | (Running, Cancelled)
            | (Paused, Running)
            | (Paused, Ended)
            | (Paused, Cancelled)
    )
}

/// Plan the write for moving `session` to `target`.
///
/// Side effects on the timestamps:
/// - into `running`: `started_at` becomes `at` when given;
/// - into `ended`/`cancelled`: `ended_at` becomes `at` when given. A
///   cancelled session that never ran (including one with a provisional
///   `scheduled_start`) keeps `ended_at` empty;
/// - into `paused`: none.
///
/// `scheduled` is never a valid target. In [`TransitionMode::Strict`] only
/// the edges of [`is_allowed_edge`] are accepted; [`TransitionMode::Permissive`]
/// accepts any other overwrite.
pub fn plan_transition(
    mode: TransitionMode,
    session: &Session,
    target: SessionStatus,
    at: Option<DateTime<Utc>>,
) -> AppResult<StatusChange> {
    if target == SessionStatus::Scheduled {
        return Err(AppError::validation(
            "Status must be one of: running, paused, ended, cancelled",
        ));
    }

    if mode == TransitionMode::Strict && !is_allowed_edge(session.status, target) {
        return Err(if session.status.is_terminal() {
            AppError::conflict(format!("Session is already {}", session.status))
        } else {
            AppError::conflict(format!(
                "Cannot move session from {} to {}",
                session.status, target
            ))
        });
    }

    let mut started_at = session.started_at;
    let mut ended_at = session.ended_at;

    match target {
        SessionStatus::Running => {
            if let Some(at) = at {
                started_at = Some(at);
            }
        }
        SessionStatus::Ended => {
            if let Some(at) = at {
                ended_at = Some(at);
            }
        }
        SessionStatus::Cancelled => {
            // A scheduled session's start is only provisional.
            let started = session.status != SessionStatus::Scheduled && started_at.is_some();
            if let Some(at) = at.filter(|_| started) {
                ended_at = Some(at);
            }
        }
        SessionStatus::Paused | SessionStatus::Scheduled => {}
    }

    match (started_at, ended_at) {
        (None, Some(_)) => Err(AppError::invalid_interval(
            "Session cannot end before it has started",
        )),
        (Some(start), Some(end)) if end < start => Err(AppError::invalid_interval(format!(
            "ended_at {end} precedes started_at {start}"
        ))),
        _ => Ok(StatusChange {
            status: target,
            started_at,
            ended_at,
        }),
    }
}
