//! Notification handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use lockin_entity::notification::Notification;
use lockin_service::notification::NotificationPage;

use crate::dto::request::NotificationFilter;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, CursorParams};
use crate::state::AppState;

/// GET /api/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(filter): Query<NotificationFilter>,
    Query(params): Query<CursorParams>,
) -> Result<Json<ApiResponse<NotificationPage>>, ApiError> {
    let page = state
        .notification_service
        .list_notifications(&auth, filter.unread, params.into_cursor_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/notifications/{id}
pub async fn get_notification(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Notification>>, ApiError> {
    let notification = state.notification_service.get_notification(&auth, id).await?;
    Ok(Json(ApiResponse::ok(notification)))
}

/// POST /api/notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Notification>>, ApiError> {
    let notification = state.notification_service.mark_read(&auth, id).await?;
    Ok(Json(ApiResponse::ok(notification)))
}

/// POST /api/notifications/{id}/accept
pub async fn accept_invite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Notification>>, ApiError> {
    let notification = state.notification_service.accept_invite(&auth, id).await?;
    Ok(Json(ApiResponse::ok(notification)))
}

/// POST /api/notifications/{id}/decline
pub async fn decline_invite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Notification>>, ApiError> {
    let notification = state.notification_service.decline_invite(&auth, id).await?;
    Ok(Json(ApiResponse::ok(notification)))
}
