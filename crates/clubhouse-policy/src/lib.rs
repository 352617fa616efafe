//! # clubhouse-policy
//!
//! Loads the authorization policy and operation catalog for the Clubhouse
//! site from TOML and the environment.
//!
//! ## Overview
//!
//! The allow-list is read once at startup and never reloaded. When loading
//! fails, [`load_or_deny_all`] falls back to an empty allow-list and a
//! catalog in which everything but the public reads is allow-listed, so a
//! broken policy can never let a caller through that a valid one would
//! stop.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use clubhouse_policy::{load_or_deny_all, ADMIN_EMAILS_ENV};
//!
//! let env = std::env::var(ADMIN_EMAILS_ENV).ok();
//! let bundle = load_or_deny_all(Some(Path::new("policy.toml")), env.as_deref());
//! ```

pub mod config;
pub mod loader;

pub use config::{parse_principal_list, PolicyConfig};
pub use loader::{load, load_or_deny_all, PolicyBundle, ADMIN_EMAILS_ENV};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use clubhouse_contracts::{
        error::ClubError,
        identity::CallerIdentity,
        operation::{AccessRequirement, Operation},
        policy::AccessDecision,
    };
    use clubhouse_core::evaluate;

    use crate::{load, load_or_deny_all, parse_principal_list, PolicyBundle};

    const CLUB_POLICY: &str = r#"
        allowed_principals = ["coach@club.example", "Secretary@Club.Example"]

        [operations]
        create_fixture = "allow-listed"
        list_galleries = "authenticated"
    "#;

    fn signed_in(email: &str) -> CallerIdentity {
        CallerIdentity::authenticated("user-1", Some(email.to_string()))
    }

    /// Write `contents` to a per-test file under the temp dir.
    fn policy_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "clubhouse-policy-{}-{}.toml",
            std::process::id(),
            name
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    // ── 1. parsing ────────────────────────────────────────────────────────────

    #[test]
    fn test_allow_list_and_overrides_parse() {
        let bundle = PolicyBundle::from_toml_str(CLUB_POLICY).unwrap();

        assert_eq!(bundle.policy.len(), 2);
        assert!(bundle.policy.allows("secretary@club.example"));
        assert_eq!(
            bundle.catalog.requirement(Operation::CreateFixture),
            AccessRequirement::AllowListed
        );
        assert_eq!(
            bundle.catalog.requirement(Operation::ListGalleries),
            AccessRequirement::Authenticated
        );
        // Untouched operations keep their built-in requirement.
        assert_eq!(
            bundle.catalog.requirement(Operation::CreateGallery),
            AccessRequirement::Authenticated
        );
    }

    #[test]
    fn test_empty_document_is_deny_all() {
        let bundle = PolicyBundle::from_toml_str("").unwrap();
        assert!(bundle.policy.is_empty());
    }

    // ── 2. rejected configuration ─────────────────────────────────────────────

    #[test]
    fn test_toml_parse_error() {
        let result = PolicyBundle::from_toml_str("this is not valid toml ][[[");

        match result {
            Err(ClubError::ConfigError { reason }) => {
                assert!(
                    reason.contains("failed to parse policy TOML"),
                    "expected parse error message, got: {reason}"
                );
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_operation_rejected() {
        let toml = r#"
            [operations]
            sell_clubhouse = "public"
        "#;
        match PolicyBundle::from_toml_str(toml) {
            Err(ClubError::ConfigError { reason }) => assert!(reason.contains("sell_clubhouse")),
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_public_mutating_override_rejected() {
        let toml = r#"
            [operations]
            delete_fixture = "public"
        "#;
        assert!(matches!(
            PolicyBundle::from_toml_str(toml),
            Err(ClubError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_unknown_top_level_key_rejected() {
        let toml = r#"
            admins = ["coach@club.example"]
        "#;
        assert!(PolicyBundle::from_toml_str(toml).is_err());
    }

    // ── 3. environment allow-list ─────────────────────────────────────────────

    #[test]
    fn test_principal_list_parsing() {
        assert_eq!(
            parse_principal_list(" coach@club.example, ,captain@club.example,"),
            vec!["coach@club.example", "captain@club.example"]
        );
        assert!(parse_principal_list("").is_empty());
    }

    #[test]
    fn test_env_list_replaces_file_list_but_keeps_overrides() {
        let bundle = PolicyBundle::from_toml_str(CLUB_POLICY)
            .unwrap()
            .with_allow_list("treasurer@club.example");

        assert!(bundle.policy.allows("treasurer@club.example"));
        assert!(!bundle.policy.allows("coach@club.example"));
        assert_eq!(
            bundle.catalog.requirement(Operation::CreateFixture),
            AccessRequirement::AllowListed
        );
    }

    #[test]
    fn test_load_without_sources_is_deny_all() {
        let bundle = load(None, None).unwrap();
        assert!(bundle.policy.is_empty());
    }

    #[test]
    fn test_blank_env_list_keeps_file_list() {
        let path = policy_file("blank-env", CLUB_POLICY);

        for blank in ["", "   "] {
            let bundle = load(Some(path.as_path()), Some(blank)).unwrap();
            assert!(bundle.policy.allows("coach@club.example"), "{blank:?}");
            assert_eq!(bundle.policy.len(), 2);
        }

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_from_env_only() {
        let bundle = load(None, Some("coach@club.example")).unwrap();
        assert!(bundle.policy.allows("coach@club.example"));
    }

    // ── 4. fail-closed ────────────────────────────────────────────────────────

    #[test]
    fn test_missing_file_is_config_error() {
        let result = load(Some(Path::new("/nonexistent/clubhouse/policy.toml")), None);
        match result {
            Err(ClubError::ConfigError { reason }) => {
                assert!(reason.contains("failed to read policy file"));
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    /// A policy that fails to load must never allow an allow-listed
    /// operation, not even for an address that the env list would admit.
    #[test]
    fn test_failed_load_denies_allow_listed_operations() {
        let bundle = load_or_deny_all(
            Some(Path::new("/nonexistent/clubhouse/policy.toml")),
            Some("coach@club.example"),
        );
        assert!(bundle.policy.is_empty());

        for operation in Operation::ALL {
            let protected = bundle.catalog.protect(operation);
            if !protected.requires_allow_list() {
                continue;
            }
            for identity in [CallerIdentity::Anonymous, signed_in("coach@club.example")] {
                let decision = evaluate(&identity, &protected, &bundle.policy);
                assert_ne!(decision, AccessDecision::Allow, "{} for {:?}", operation, identity);
            }
        }
    }

    /// An operation the file tightened to allow-listed stays closed to
    /// ordinary signed-in callers when the same file fails to parse.
    #[test]
    fn test_broken_file_never_loosens_tightened_operation() {
        let path = policy_file(
            "broken",
            r#"
                admins = 1

                [operations]
                create_fixture = "allow-listed"
            "#,
        );

        let bundle = load_or_deny_all(Some(path.as_path()), None);
        std::fs::remove_file(&path).ok();

        let decision = evaluate(
            &signed_in("random@x.com"),
            &bundle.catalog.protect(Operation::CreateFixture),
            &bundle.policy,
        );
        assert_eq!(decision, AccessDecision::DenyForbidden);

        for operation in Operation::ALL {
            let protected = bundle.catalog.protect(operation);
            let decision = evaluate(&signed_in("random@x.com"), &protected, &bundle.policy);
            if protected.requires_auth() {
                assert_ne!(decision, AccessDecision::Allow, "{}", operation);
            } else {
                assert_eq!(decision, AccessDecision::Allow, "public {} stays open", operation);
            }
        }
    }
}
