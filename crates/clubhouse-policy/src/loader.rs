//! Policy loading with a fail-closed fallback.
//!
//! Loading order:
//!
//! 1. If a policy file is configured, parse it (allow-list + overrides).
//! 2. If `CLUBHOUSE_ADMIN_EMAILS` is set and not blank, its list replaces
//!    the file's allow-list. Overrides from the file are kept. A blank value
//!    is ignored with a warning.
//! 3. If neither exists, the allow-list is empty.
//!
//! Any error in steps 1–2 surfaces as `ClubError::ConfigError`. Callers that
//! must keep serving use `load_or_deny_all`, which turns the error into
//! `PolicyBundle::fail_closed`: an empty allow-list and a catalog in which
//! every operation needing a session is allow-listed. Overrides the broken
//! file may have held can therefore never be loosened by the fallback.

use std::path::Path;

use tracing::{debug, error, info, warn};

use clubhouse_contracts::{
    error::{ClubError, ClubResult},
    operation::{Operation, OperationCatalog},
    policy::AuthorizationPolicy,
};

use crate::config::{parse_principal_list, PolicyConfig};

/// Environment variable holding a comma-separated allow-list.
pub const ADMIN_EMAILS_ENV: &str = "CLUBHOUSE_ADMIN_EMAILS";

/// The immutable authorization inputs the access gate is built from.
#[derive(Debug, Clone, Default)]
pub struct PolicyBundle {
    pub policy: AuthorizationPolicy,
    pub catalog: OperationCatalog,
}

impl PolicyBundle {
    /// Empty allow-list, built-in requirements.
    pub fn deny_all() -> Self {
        Self::default()
    }

    /// Empty allow-list and `OperationCatalog::locked_down`. Only public
    /// reads are allowed.
    pub fn fail_closed() -> Self {
        Self {
            policy: AuthorizationPolicy::deny_all(),
            catalog: OperationCatalog::locked_down(),
        }
    }

    /// Parse `s` as TOML and build a bundle.
    ///
    /// Returns `ClubError::ConfigError` if the TOML is malformed, names an
    /// unknown operation, or would make a mutating operation public.
    pub fn from_toml_str(s: &str) -> ClubResult<Self> {
        let config: PolicyConfig = toml::from_str(s).map_err(|e| ClubError::ConfigError {
            reason: format!("failed to parse policy TOML: {}", e),
        })?;
        Self::from_config(config)
    }

    /// Read the file at `path` and parse it as a TOML policy.
    pub fn from_file(path: &Path) -> ClubResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ClubError::ConfigError {
            reason: format!("failed to read policy file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_config(config: PolicyConfig) -> ClubResult<Self> {
        let mut catalog = OperationCatalog::default();
        for (name, requirement) in &config.operations {
            let operation: Operation = name.parse()?;
            catalog.set(operation, *requirement)?;
            debug!(operation = %operation, requirement = ?requirement, "operation requirement overridden");
        }
        Ok(Self {
            policy: AuthorizationPolicy::new(&config.allowed_principals),
            catalog,
        })
    }

    /// Replace the allow-list with the comma-separated `raw` list.
    pub fn with_allow_list(self, raw: &str) -> Self {
        Self {
            policy: AuthorizationPolicy::new(parse_principal_list(raw)),
            catalog: self.catalog,
        }
    }
}

/// Load the policy from an optional file and an optional env-sourced list.
///
/// `env_list` is the raw value of `ADMIN_EMAILS_ENV`, passed in so the
/// loader stays a function of its arguments.
pub fn load(path: Option<&Path>, env_list: Option<&str>) -> ClubResult<PolicyBundle> {
    let bundle = match path {
        Some(path) => PolicyBundle::from_file(path)?,
        None => PolicyBundle::deny_all(),
    };

    let bundle = match env_list {
        Some(raw) if raw.trim().is_empty() => {
            warn!(env = ADMIN_EMAILS_ENV, "allow-list variable is blank; ignoring it");
            bundle
        }
        Some(raw) => {
            debug!(env = ADMIN_EMAILS_ENV, "allow-list taken from environment");
            bundle.with_allow_list(raw)
        }
        None => bundle,
    };

    if bundle.policy.is_empty() {
        warn!("allow-list is empty; allow-listed operations are denied for everyone");
    } else {
        info!(principals = bundle.policy.len(), "authorization policy loaded");
    }

    Ok(bundle)
}

/// `load`, but a failure yields `PolicyBundle::fail_closed()` instead of an error.
pub fn load_or_deny_all(path: Option<&Path>, env_list: Option<&str>) -> PolicyBundle {
    match load(path, env_list) {
        Ok(bundle) => bundle,
        Err(e) => {
            error!(error = %e, "policy failed to load; only public operations are allowed");
            PolicyBundle::fail_closed()
        }
    }
}
