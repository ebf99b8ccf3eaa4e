//! Profile and auth identity repository implementation.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use lockin_core::result::AppResult;
use lockin_entity::profile::{AuthIdentity, Profile, UpdateProfile};

use crate::error::map_db_error;

/// Repository for profile and identity operations.
#[derive(Debug, Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    /// Create a new profile repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a profile by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Profile>> {
        sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error(e, "Failed to find profile"))
    }

    /// Find the profile linked to `(provider, subject)`.
    pub async fn find_by_identity(
        &self,
        conn: &mut PgConnection,
        provider: &str,
        subject: &str,
    ) -> AppResult<Option<Profile>> {
        sqlx::query_as::<_, Profile>(
            "SELECT p.* FROM profiles p \
             JOIN auth_identities ai ON ai.profile_id = p.id \
             WHERE ai.provider = $1 AND ai.subject = $2",
        )
        .bind(provider)
        .bind(subject)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| map_db_error(e, "Failed to find profile by identity"))
    }

    /// Insert a profile. The email is stored lower-cased.
    pub async fn create(
        &self,
        conn: &mut PgConnection,
        email: &str,
        display_name: Option<&str>,
    ) -> AppResult<Profile> {
        sqlx::query_as::<_, Profile>(
            "INSERT INTO profiles (email, display_name) VALUES (LOWER($1), $2) RETURNING *",
        )
        .bind(email)
        .bind(display_name)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| map_db_error(e, "Failed to create profile"))
    }

    /// Link an external identity to a profile.
    pub async fn link_identity(
        &self,
        conn: &mut PgConnection,
        provider: &str,
        subject: &str,
        profile_id: Uuid,
    ) -> AppResult<AuthIdentity> {
        sqlx::query_as::<_, AuthIdentity>(
            "INSERT INTO auth_identities (provider, subject, profile_id) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(provider)
        .bind(subject)
        .bind(profile_id)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| map_db_error(e, "Failed to link identity"))
    }

    /// Update the caller-editable profile fields. `None` leaves a field as is.
    pub async fn update(&self, id: Uuid, data: &UpdateProfile) -> AppResult<Option<Profile>> {
        sqlx::query_as::<_, Profile>(
            "UPDATE profiles SET display_name = COALESCE($2, display_name), \
             avatar_url = COALESCE($3, avatar_url), updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(data.display_name.as_deref())
        .bind(data.avatar_url.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Failed to update profile"))
    }
}
