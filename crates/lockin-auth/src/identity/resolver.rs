//! Maps a bearer token (or its absence) to a local profile.

use std::sync::Arc;

use tracing::{debug, info};

use lockin_core::config::AuthConfig;
use lockin_core::error::{AppError, ErrorKind};
use lockin_core::result::AppResult;
use lockin_database::connection::commit;
use lockin_database::repositories::ProfileRepository;
use lockin_database::DatabasePool;
use lockin_entity::profile::Profile;

use crate::jwt::JwtDecoder;

/// Provider label for the demo identity.
pub const ANONYMOUS_PROVIDER: &str = "demo";
/// Subject of the demo identity.
pub const ANONYMOUS_SUBJECT: &str = "anonymous";
/// Email of the demo profile.
pub const ANONYMOUS_EMAIL: &str = "anonymous@lockin.demo";
/// Display name of the demo profile.
pub const ANONYMOUS_NAME: &str = "Demo User";

/// An external identity ready to be looked up or provisioned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIdentity {
    /// Identity provider label.
    pub provider: String,
    /// Provider subject.
    pub subject: String,
    /// Email claim, if any.
    pub email: Option<String>,
    /// Display name claim, if any.
    pub display_name: Option<String>,
}

impl ResolvedIdentity {
    /// The fixed demo identity used in anonymous mode.
    pub fn anonymous() -> Self {
        Self {
            provider: ANONYMOUS_PROVIDER.to_string(),
            subject: ANONYMOUS_SUBJECT.to_string(),
            email: Some(ANONYMOUS_EMAIL.to_string()),
            display_name: Some(ANONYMOUS_NAME.to_string()),
        }
    }

    /// Email stored for a new profile: the claim, else
    /// `{subject}@{provider}.lockin`, lower-cased.
    pub fn profile_email(&self) -> String {
        self.email
            .as_deref()
            .filter(|e| !e.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}@{}.lockin", self.subject, self.provider))
            .to_lowercase()
    }
}

/// Resolves callers to profiles, creating the profile on first sight.
#[derive(Debug, Clone)]
pub struct IdentityResolver {
    /// Database pool for the get-or-create transaction.
    db: DatabasePool,
    /// Profile repository.
    profiles: Arc<ProfileRepository>,
    /// Bearer token decoder.
    decoder: JwtDecoder,
    /// Provider label for token identities.
    provider: String,
    /// Whether a missing token resolves to the demo profile.
    allow_anonymous: bool,
}

impl IdentityResolver {
    /// Creates a new resolver.
    pub fn new(db: DatabasePool, profiles: Arc<ProfileRepository>, config: &AuthConfig) -> Self {
        Self {
            db,
            profiles,
            decoder: JwtDecoder::new(config),
            provider: config.provider.clone(),
            allow_anonymous: config.allow_anonymous,
        }
    }

    /// Turn an optional bearer token into an identity without touching the
    /// database.
    pub fn identify(&self, bearer: Option<&str>) -> AppResult<ResolvedIdentity> {
        match bearer {
            Some(token) => {
                let claims = self.decoder.decode(token)?;
                Ok(ResolvedIdentity {
                    provider: self.provider.clone(),
                    display_name: claims.display_name().map(str::to_string),
                    email: claims.email,
                    subject: claims.sub,
                })
            }
            None if self.allow_anonymous => Ok(ResolvedIdentity::anonymous()),
            None => Err(AppError::authentication("Not authenticated")),
        }
    }

    /// Resolve a caller to their profile.
    pub async fn resolve(&self, bearer: Option<&str>) -> AppResult<Profile> {
        let identity = self.identify(bearer)?;
        self.get_or_create(&identity).await
    }

    /// Look up the profile linked to `identity`, provisioning profile and
    /// identity rows in one transaction when absent.
    pub async fn get_or_create(&self, identity: &ResolvedIdentity) -> AppResult<Profile> {
        let mut tx = self.db.begin().await?;

        if let Some(profile) = self
            .profiles
            .find_by_identity(&mut tx, &identity.provider, &identity.subject)
            .await?
        {
            return Ok(profile);
        }

        let created = async {
            let profile = self
                .profiles
                .create(&mut tx, &identity.profile_email(), identity.display_name.as_deref())
                .await?;
            self.profiles
                .link_identity(&mut tx, &identity.provider, &identity.subject, profile.id)
                .await?;
            Ok::<_, AppError>(profile)
        }
        .await;

        match created {
            Ok(profile) => {
                commit(tx).await?;
                info!(
                    profile_id = %profile.id,
                    provider = %identity.provider,
                    "Provisioned profile for new identity"
                );
                Ok(profile)
            }
            Err(e) if e.is(ErrorKind::AlreadyExists) => {
                // Lost a first-login race; the winner's rows are visible now.
                drop(tx);
                debug!(provider = %identity.provider, "Identity provisioned concurrently");
                let mut retry = self.db.begin().await?;
                self.profiles
                    .find_by_identity(&mut retry, &identity.provider, &identity.subject)
                    .await?
                    .ok_or(e)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_falls_back_to_subject_at_provider() {
        let identity = ResolvedIdentity {
            provider: "cognito".to_string(),
            subject: "ABC-123".to_string(),
            email: None,
            display_name: None,
        };
        assert_eq!(identity.profile_email(), "abc-123@cognito.lockin");
    }

    #[test]
    fn test_email_claim_is_lowercased() {
        let identity = ResolvedIdentity {
            provider: "cognito".to_string(),
            subject: "abc".to_string(),
            email: Some("Sam@Example.COM".to_string()),
            display_name: None,
        };
        assert_eq!(identity.profile_email(), "sam@example.com");
    }

    #[test]
    fn test_anonymous_identity() {
        let identity = ResolvedIdentity::anonymous();
        assert_eq!(identity.provider, "demo");
        assert_eq!(identity.subject, "anonymous");
        assert_eq!(identity.profile_email(), "anonymous@lockin.demo");
        assert_eq!(identity.display_name.as_deref(), Some("Demo User"));
    }
}
