//! Group membership handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use lockin_entity::group::GroupMember;
use lockin_entity::notification::Notification;

use crate::dto::request::{AddMemberBody, InviteBody, UpdateMemberBody};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/groups/{id}/members
pub async fn list_members(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<GroupMember>>>, ApiError> {
    let members = state.member_service.list_members(&auth, id).await?;
    Ok(Json(ApiResponse::ok(members)))
}

/// POST /api/groups/{id}/members
pub async fn add_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<AddMemberBody>,
) -> Result<(StatusCode, Json<ApiResponse<GroupMember>>), ApiError> {
    let member = state.member_service.add_member(&auth, id, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(member))))
}

/// PATCH /api/groups/{id}/members/{mid}
pub async fn update_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, mid)): Path<(Uuid, Uuid)>,
    Json(req): Json<UpdateMemberBody>,
) -> Result<Json<ApiResponse<GroupMember>>, ApiError> {
    let member = state
        .member_service
        .update_member(&auth, id, mid, req.into())
        .await?;
    Ok(Json(ApiResponse::ok(member)))
}

/// DELETE /api/groups/{id}/members/{mid}
pub async fn remove_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, mid)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.member_service.remove_member(&auth, id, mid).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Member removed".to_string(),
    })))
}

/// POST /api/groups/{id}/invite
pub async fn invite_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<InviteBody>,
) -> Result<(StatusCode, Json<ApiResponse<Notification>>), ApiError> {
    let invite = state
        .member_service
        .invite_member(&auth, id, req.user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(invite))))
}
