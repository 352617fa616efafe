//! Server configuration.
//!
//! Read from an optional TOML file, then overridden field by field from the
//! environment:
//!
//! | variable                | field        |
//! |-------------------------|--------------|
//! | `CLUBHOUSE_BIND_ADDR`   | `bind_addr`  |
//! | `CLUBHOUSE_JWT_SECRET`  | `jwt_secret` |
//!
//! The allow-list has its own variable, handled by `clubhouse-policy`.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use clubhouse_audit::DEFAULT_CAPACITY;
use clubhouse_auth::DEFAULT_AUDIENCE;
use clubhouse_contracts::error::{ClubError, ClubResult};

pub const BIND_ADDR_ENV: &str = "CLUBHOUSE_BIND_ADDR";
pub const JWT_SECRET_ENV: &str = "CLUBHOUSE_JWT_SECRET";

/// Cookie the hosted auth service's browser client stores the access token in.
pub const DEFAULT_SESSION_COOKIE: &str = "sb-access-token";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// TOML policy file. Without one the allow-list comes from the
    /// environment or is empty.
    pub policy_path: Option<PathBuf>,
    /// JSON seed for the in-memory store.
    pub seed_path: Option<PathBuf>,
    pub session_cookie: String,
    /// Shared HS256 secret. Without one every caller is anonymous.
    pub jwt_secret: Option<String>,
    pub jwt_audience: String,
    /// When false, tokens are accepted whatever their `aud` claim.
    pub verify_audience: bool,
    /// Identifier stamped on every activity-log event.
    pub activity_log_id: String,
    /// Most recent activity-log events kept in memory.
    pub activity_log_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            policy_path: None,
            seed_path: None,
            session_cookie: DEFAULT_SESSION_COOKIE.to_string(),
            jwt_secret: None,
            jwt_audience: DEFAULT_AUDIENCE.to_string(),
            verify_audience: true,
            activity_log_id: "clubhouse".to_string(),
            activity_log_capacity: DEFAULT_CAPACITY,
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(s: &str) -> ClubResult<Self> {
        toml::from_str(s).map_err(|e| ClubError::ConfigError {
            reason: format!("failed to parse server config TOML: {}", e),
        })
    }

    pub fn from_file(path: &Path) -> ClubResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ClubError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Apply overrides from `lookup`, usually `|k| std::env::var(k).ok()`.
    ///
    /// Blank values are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(addr) = non_blank(BIND_ADDR_ENV) {
            self.bind_addr = addr.trim().to_string();
        }
        if let Some(secret) = non_blank(JWT_SECRET_ENV) {
            self.jwt_secret = Some(secret);
        }
        self
    }

    /// The audience the identity provider should require, if any.
    pub fn audience(&self) -> Option<&str> {
        self.verify_audience.then_some(self.jwt_audience.as_str())
    }
}
