//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Bearer-token decoding and identity resolution configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared secret used to verify HS256-signed tokens.
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Expected `iss` claim, if any.
    #[serde(default)]
    pub issuer: Option<String>,
    /// Expected `aud` claim, if any.
    #[serde(default)]
    pub audience: Option<String>,
    /// Clock-skew leeway in seconds applied to `exp`/`nbf`.
    #[serde(default = "default_leeway")]
    pub leeway_seconds: u64,
    /// Label stored with every resolved identity (`auth_identities.provider`).
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Resolve requests without a bearer token to the demo profile.
    #[serde(default)]
    pub allow_anonymous: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            issuer: None,
            audience: None,
            leeway_seconds: default_leeway(),
            provider: default_provider(),
            allow_anonymous: false,
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_leeway() -> u64 {
    5
}

fn default_provider() -> String {
    "cognito".to_string()
}
