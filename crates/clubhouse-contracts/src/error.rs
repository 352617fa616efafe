//! Error types shared by every Clubhouse crate.
//!
//! All fallible operations return `ClubResult<T>`. The HTTP layer maps each
//! variant to exactly one status code, so variants are split by what the
//! caller should see rather than by where the failure happened.

use thiserror::Error;

/// The unified error type for the Clubhouse site.
#[derive(Debug, Error)]
pub enum ClubError {
    /// No identity could be resolved for a request that requires one.
    #[error("authentication required for '{operation}'")]
    Unauthenticated { operation: String },

    /// The caller is signed in but not allowed to perform the operation.
    #[error("'{principal}' is not permitted to perform '{operation}'")]
    Forbidden { principal: String, operation: String },

    /// A required field is missing or malformed. Raised before any store call.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// The addressed resource does not exist.
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    /// The resource store, identity provider or activity log failed.
    ///
    /// The `reason` is for server-side logs only and never reaches clients.
    #[error("upstream failure: {reason}")]
    UpstreamFailure { reason: String },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },
}

impl ClubError {
    /// Shorthand for `InvalidInput` with a formatted reason.
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Shorthand for `UpstreamFailure` with a formatted reason.
    pub fn upstream(reason: impl Into<String>) -> Self {
        Self::UpstreamFailure {
            reason: reason.into(),
        }
    }
}

/// Convenience alias used throughout the Clubhouse crates.
pub type ClubResult<T> = Result<T, ClubError>;
