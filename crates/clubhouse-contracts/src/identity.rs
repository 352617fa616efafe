//! Caller identity and the raw session credentials it is resolved from.

use serde::{Deserialize, Serialize};

/// The principal behind one request, or the anonymous sentinel.
///
/// Produced per request by an `IdentityProvider` and dropped when the
/// request finishes. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CallerIdentity {
    /// No session could be resolved.
    Anonymous,

    /// A signed-in principal.
    Authenticated {
        /// Opaque identifier issued by the auth provider (the token subject).
        principal_id: String,
        /// Verified email address, when the provider supplied one.
        email: Option<String>,
    },
}

impl CallerIdentity {
    /// Build an authenticated identity. Blank emails are discarded.
    pub fn authenticated(principal_id: impl Into<String>, email: Option<String>) -> Self {
        let email = email
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());
        Self::Authenticated {
            principal_id: principal_id.into(),
            email,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous)
    }

    /// The verified email attribute, if any.
    pub fn email(&self) -> Option<&str> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated { email, .. } => email.as_deref(),
        }
    }

    /// The principal id, or `"anonymous"`. Used in logs and access records.
    pub fn principal(&self) -> &str {
        match self {
            Self::Anonymous => "anonymous",
            Self::Authenticated { principal_id, .. } => principal_id,
        }
    }
}

/// Raw credentials carried by an inbound request.
///
/// The HTTP layer fills this from the `Authorization` header and the session
/// cookie; the identity provider decides what they mean.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionCredentials {
    /// Token from `Authorization: Bearer <token>`.
    pub bearer: Option<String>,
    /// Token from the session cookie.
    pub cookie: Option<String>,
}

impl SessionCredentials {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            bearer: Some(token.into()),
            cookie: None,
        }
    }

    /// The token to verify. A bearer token wins over the cookie.
    pub fn token(&self) -> Option<&str> {
        self.bearer
            .as_deref()
            .or(self.cookie.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}
