//! Focus session handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use lockin_entity::session::SessionParticipant;
use lockin_service::session::SessionDetail;

use crate::dto::request::{AppendLogBody, CreateSessionBody, SetStatusBody};
use crate::dto::response::{ApiResponse, TimeLogResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/sessions
pub async fn create_session(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateSessionBody>,
) -> Result<(StatusCode, Json<ApiResponse<SessionDetail>>), ApiError> {
    let detail = state
        .session_service
        .create_session(&auth, req.group_id, req.scheduled_start)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(detail))))
}

/// GET /api/sessions/{id}
pub async fn get_session(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<SessionDetail>>, ApiError> {
    let detail = state.session_service.get_session(&auth, id).await?;
    Ok(Json(ApiResponse::ok(detail)))
}

/// POST /api/sessions/{id}/status
///
/// A missing `at` means "now".
pub async fn set_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<SetStatusBody>,
) -> Result<Json<ApiResponse<SessionDetail>>, ApiError> {
    let at = req.at.unwrap_or(auth.request_time);
    let detail = state
        .session_service
        .set_status(&auth, id, req.status, Some(at), req.expected_version)
        .await?;
    Ok(Json(ApiResponse::ok(detail)))
}

/// POST /api/sessions/{id}/participants
pub async fn join_session(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<SessionParticipant>>, ApiError> {
    let participant = state.session_service.join_session(&auth, id).await?;
    Ok(Json(ApiResponse::ok(participant)))
}

/// POST /api/sessions/{id}/logs
pub async fn append_log(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<AppendLogBody>,
) -> Result<(StatusCode, Json<ApiResponse<TimeLogResponse>>), ApiError> {
    let user_id = req.user_id.unwrap_or(auth.user_id);
    let log = state
        .session_service
        .append_time_log(&auth, id, user_id, req.started_at, req.ended_at)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(TimeLogResponse {
            status: "logged".to_string(),
            time_log: log,
        })),
    ))
}
