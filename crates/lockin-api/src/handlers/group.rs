//! Group handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use lockin_entity::group::Group;
use lockin_entity::progress::ProgressRow;
use lockin_service::group::GroupDetail;

use crate::dto::request::{CreateGroupBody, GroupListQuery};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/groups
pub async fn list_groups(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<GroupListQuery>,
) -> Result<Json<ApiResponse<Vec<Group>>>, ApiError> {
    let groups = state.group_service.list_groups(&auth, query.status).await?;
    Ok(Json(ApiResponse::ok(groups)))
}

/// POST /api/groups
pub async fn create_group(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateGroupBody>,
) -> Result<(StatusCode, Json<ApiResponse<GroupDetail>>), ApiError> {
    let detail = state.group_service.create_group(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(detail))))
}

/// GET /api/groups/{id}
pub async fn get_group(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<GroupDetail>>, ApiError> {
    let detail = state.group_service.get_group(&auth, id).await?;
    Ok(Json(ApiResponse::ok(detail)))
}

/// POST /api/groups/{id}/clone
pub async fn clone_group(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<ApiResponse<GroupDetail>>), ApiError> {
    let detail = state.group_service.clone_group(&auth, id).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(detail))))
}

/// POST /api/groups/{id}/archive
pub async fn archive_group(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Group>>, ApiError> {
    let group = state.group_service.archive_group(&auth, id).await?;
    Ok(Json(ApiResponse::ok(group)))
}

/// GET /api/groups/{id}/progress/current
pub async fn current_progress(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<ProgressRow>>>, ApiError> {
    let rows = state.progress_service.group_progress(&auth, id).await?;
    Ok(Json(ApiResponse::ok(rows)))
}
