//! Profile read and update.

use std::sync::Arc;

use tracing::info;

use lockin_core::error::AppError;
use lockin_core::result::AppResult;
use lockin_database::repositories::ProfileRepository;
use lockin_entity::profile::{Profile, UpdateProfile};

use crate::context::RequestContext;

/// Reads and edits the caller's profile.
#[derive(Debug, Clone)]
pub struct ProfileService {
    /// Profile repository.
    profiles: Arc<ProfileRepository>,
}

impl ProfileService {
    /// Creates a new profile service.
    pub fn new(profiles: Arc<ProfileRepository>) -> Self {
        Self { profiles }
    }

    /// The caller's profile.
    pub async fn me(&self, ctx: &RequestContext) -> AppResult<Profile> {
        self.profiles
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Profile not found"))
    }

    /// Updates display name and avatar. Absent fields are left unchanged.
    pub async fn update_me(&self, ctx: &RequestContext, data: UpdateProfile) -> AppResult<Profile> {
        let data = normalize(data)?;
        let profile = self
            .profiles
            .update(ctx.user_id, &data)
            .await?
            .ok_or_else(|| AppError::not_found("Profile not found"))?;

        info!(user_id = %ctx.user_id, "Profile updated");
        Ok(profile)
    }
}

fn normalize(mut data: UpdateProfile) -> AppResult<UpdateProfile> {
    if let Some(name) = data.display_name.as_mut() {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(AppError::validation("Display name must not be blank"));
        }
        *name = trimmed.to_string();
    }
    Ok(data)
}
