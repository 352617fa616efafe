//! HS256 session-token verification.
//!
//! The hosted auth service signs access tokens with a project-wide shared
//! secret. A token that verifies becomes an authenticated identity; anything
//! else (absent, malformed, expired, wrong signature, wrong audience) means
//! there is no valid session and resolves to `Anonymous`.

use async_trait::async_trait;
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use tracing::debug;

use clubhouse_contracts::{
    error::{ClubError, ClubResult},
    identity::{CallerIdentity, SessionCredentials},
};
use clubhouse_core::traits::IdentityProvider;

/// Audience the hosted auth service puts on signed-in users' tokens.
pub const DEFAULT_AUDIENCE: &str = "authenticated";

/// Claims read from an access token. Everything else is ignored.
#[derive(Debug, Deserialize)]
struct SessionClaims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
}

/// Verifies session tokens locally with the shared secret.
pub struct JwtIdentityProvider {
    key: DecodingKey,
    validation: Validation,
}

impl JwtIdentityProvider {
    /// Build a provider for `secret`.
    ///
    /// `audience = None` disables the `aud` check. Returns `ConfigError` for
    /// an empty secret.
    pub fn new(secret: &str, audience: Option<&str>) -> ClubResult<Self> {
        if secret.trim().is_empty() {
            return Err(ClubError::ConfigError {
                reason: "jwt secret is empty".to_string(),
            });
        }

        let mut validation = Validation::new(Algorithm::HS256);
        match audience {
            Some(aud) => validation.set_audience(&[aud]),
            None => validation.validate_aud = false,
        }

        Ok(Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }
}

#[async_trait]
impl IdentityProvider for JwtIdentityProvider {
    async fn resolve(&self, credentials: &SessionCredentials) -> ClubResult<CallerIdentity> {
        let Some(token) = credentials.token() else {
            return Ok(CallerIdentity::Anonymous);
        };

        match decode::<SessionClaims>(token, &self.key, &self.validation) {
            Ok(data) => Ok(CallerIdentity::authenticated(data.claims.sub, data.claims.email)),
            Err(e) => {
                let reason = match e.kind() {
                    ErrorKind::ExpiredSignature => "expired",
                    ErrorKind::InvalidSignature => "bad signature",
                    ErrorKind::InvalidAudience => "wrong audience",
                    _ => "malformed",
                };
                debug!(reason, "session token rejected; caller is anonymous");
                Ok(CallerIdentity::Anonymous)
            }
        }
    }
}

/// Stand-in used when no secret is configured.
///
/// Every resolve is a provider failure, so the access gate treats every
/// caller as anonymous and all protected operations are denied.
#[derive(Debug, Default)]
pub struct UnconfiguredIdentityProvider;

#[async_trait]
impl IdentityProvider for UnconfiguredIdentityProvider {
    async fn resolve(&self, _credentials: &SessionCredentials) -> ClubResult<CallerIdentity> {
        Err(ClubError::upstream("identity provider is not configured"))
    }
}
