//! Claims issued by the external identity provider.

use serde::{Deserialize, Serialize};

/// The subset of identity-provider claims LockIN reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Subject: the provider's stable user identifier.
    pub sub: String,
    /// Email address, if the provider shares it.
    #[serde(default)]
    pub email: Option<String>,
    /// Full name.
    #[serde(default)]
    pub name: Option<String>,
    /// Cognito user pool username.
    #[serde(default, rename = "cognito:username")]
    pub cognito_username: Option<String>,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Issued-at timestamp (seconds since epoch).
    #[serde(default)]
    pub iat: Option<i64>,
}

impl IdentityClaims {
    /// Display name: `name`, else the provider username.
    pub fn display_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .or(self.cognito_username.as_deref())
            .filter(|n| !n.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cognito_username_is_fallback_name() {
        let claims: IdentityClaims = serde_json::from_value(serde_json::json!({
            "sub": "abc-123",
            "cognito:username": "river",
            "exp": 2_000_000_000_i64,
        }))
        .unwrap();
        assert_eq!(claims.display_name(), Some("river"));
        assert!(claims.email.is_none());
    }

    #[test]
    fn test_name_wins_over_username() {
        let claims: IdentityClaims = serde_json::from_value(serde_json::json!({
            "sub": "abc-123",
            "name": "River Song",
            "cognito:username": "river",
            "exp": 2_000_000_000_i64,
        }))
        .unwrap();
        assert_eq!(claims.display_name(), Some("River Song"));
    }
}
