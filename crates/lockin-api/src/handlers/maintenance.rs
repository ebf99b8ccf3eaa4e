//! Maintenance handlers.

use axum::Json;
use axum::extract::State;
use chrono::Utc;

use crate::dto::response::{ApiResponse, ArchiveSweepResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/maintenance/archive-expired-groups
pub async fn archive_expired_groups(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<ArchiveSweepResponse>>, ApiError> {
    let archived = state
        .maintenance_service
        .archive_expired_groups(Utc::now())
        .await?;
    tracing::info!(user_id = %auth.user_id, archived, "Manual archive sweep");
    Ok(Json(ApiResponse::ok(ArchiveSweepResponse { archived })))
}
