//! The authorization policy value and the decision the gate produces.
//!
//! The gate consumes an `AuthorizationPolicy` and produces an
//! `AccessDecision`. The policy is deny-by-default: an empty allow-list
//! admits nobody to allow-listed operations.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{ClubError, ClubResult};

/// The outcome of evaluating one request against the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessDecision {
    /// The request may proceed to the resource store.
    Allow,
    /// No session; the caller must sign in. Maps to HTTP 401.
    DenyUnauthenticated,
    /// Signed in, but not allowed. Maps to HTTP 403.
    DenyForbidden,
}

impl AccessDecision {
    /// Turn a deny into the matching `ClubError`.
    pub fn into_result(self, principal: &str, operation: &str) -> ClubResult<()> {
        match self {
            AccessDecision::Allow => Ok(()),
            AccessDecision::DenyUnauthenticated => Err(ClubError::Unauthenticated {
                operation: operation.to_string(),
            }),
            AccessDecision::DenyForbidden => Err(ClubError::Forbidden {
                principal: principal.to_string(),
                operation: operation.to_string(),
            }),
        }
    }
}

/// The set of principals allowed to perform allow-listed operations.
///
/// Loaded once at startup and never mutated afterwards. Entries are emails,
/// normalized to trimmed lowercase so membership is case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorizationPolicy {
    allowed_principals: BTreeSet<String>,
}

impl AuthorizationPolicy {
    /// Build a policy from raw email strings. Blank entries are dropped.
    pub fn new<I, S>(principals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed_principals = principals
            .into_iter()
            .map(|p| normalize_email(p.as_ref()))
            .filter(|p| !p.is_empty())
            .collect();
        Self { allowed_principals }
    }

    /// A policy that admits nobody. Used whenever loading fails.
    pub fn deny_all() -> Self {
        Self::default()
    }

    /// Pure membership test.
    pub fn allows(&self, email: &str) -> bool {
        let email = normalize_email(email);
        !email.is_empty() && self.allowed_principals.contains(&email)
    }

    pub fn is_empty(&self) -> bool {
        self.allowed_principals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.allowed_principals.len()
    }

    pub fn principals(&self) -> impl Iterator<Item = &str> {
        self.allowed_principals.iter().map(String::as_str)
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}
