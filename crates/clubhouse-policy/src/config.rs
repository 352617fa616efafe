//! Policy file schema.
//!
//! A `PolicyConfig` is deserialized from TOML. It carries the allow-list and
//! optional per-operation requirement overrides; operations not listed keep
//! their built-in requirement.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use clubhouse_contracts::operation::AccessRequirement;

/// The top-level structure deserialized from a TOML policy file.
///
/// Example:
/// ```toml
/// allowed_principals = ["coach@club.example", "secretary@club.example"]
///
/// [operations]
/// create_fixture = "allow-listed"
/// list_galleries = "public"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyConfig {
    /// Emails allowed to perform allow-listed operations.
    #[serde(default)]
    pub allowed_principals: Vec<String>,

    /// Operation name → requirement. Names must match `Operation::name()`.
    #[serde(default)]
    pub operations: BTreeMap<String, AccessRequirement>,
}

/// Split a comma-separated allow-list, as found in an environment variable.
pub fn parse_principal_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
