//! Own profile handlers.

use axum::Json;
use axum::extract::State;

use lockin_entity::profile::Profile;

use crate::dto::request::UpdateProfileBody;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Profile>>, ApiError> {
    let profile = state.profile_service.me(&auth).await?;
    Ok(Json(ApiResponse::ok(profile)))
}

/// PATCH /api/me
pub async fn update_me(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<UpdateProfileBody>,
) -> Result<Json<ApiResponse<Profile>>, ApiError> {
    let profile = state.profile_service.update_me(&auth, req.into()).await?;
    Ok(Json(ApiResponse::ok(profile)))
}
