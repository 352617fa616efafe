//! # clubhouse-api
//!
//! axum REST API for the Clubhouse rugby club site.
//!
//! Public reads (home, fixtures, training, galleries) and the admin
//! back-office share one router. Each handler asks the access gate before
//! touching the store, so the route table carries no auth middleware.
//!
//! ```rust,ignore
//! let state = Arc::new(AppState::new(&config, bundle, identity, store));
//! let app = build_router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;
pub mod state;

pub use config::ServerConfig;
pub use error::AppError;
pub use router::build_router;
pub use state::AppState;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::http::{header, HeaderMap, HeaderValue, StatusCode};

    use clubhouse_contracts::error::ClubError;

    use super::config::{ServerConfig, BIND_ADDR_ENV, DEFAULT_SESSION_COOKIE, JWT_SECRET_ENV};
    use super::error::AppError;
    use super::extract::credentials_from_headers;

    // ── Config ────────────────────────────────────────────────────────────────

    #[test]
    fn defaults_apply_when_file_is_empty() {
        let config = ServerConfig::from_toml_str("").unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:3000");
        assert_eq!(config.session_cookie, DEFAULT_SESSION_COOKIE);
        assert_eq!(config.audience(), Some("authenticated"));
        assert!(config.jwt_secret.is_none());
    }

    #[test]
    fn toml_fields_are_read() {
        let config = ServerConfig::from_toml_str(
            r#"
            bind_addr = "0.0.0.0:8080"
            policy_path = "config/policy.toml"
            verify_audience = false
            "#,
        )
        .unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(
            config.policy_path.as_deref(),
            Some(std::path::Path::new("config/policy.toml"))
        );
        assert_eq!(config.audience(), None);
    }

    #[test]
    fn unknown_config_key_is_rejected() {
        assert!(matches!(
            ServerConfig::from_toml_str("admin_emails = \"a@b.c\""),
            Err(ClubError::ConfigError { .. })
        ));
    }

    #[test]
    fn environment_overrides_file_values() {
        let env: HashMap<&str, &str> =
            [(BIND_ADDR_ENV, " 0.0.0.0:9000 "), (JWT_SECRET_ENV, "s3cret")].into();

        let config = ServerConfig::default().with_overrides(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.bind_addr, "0.0.0.0:9000");
        assert_eq!(config.jwt_secret.as_deref(), Some("s3cret"));
    }

    #[test]
    fn blank_environment_values_are_ignored() {
        let config = ServerConfig::default().with_overrides(|_| Some("  ".to_string()));
        assert_eq!(config.bind_addr, "127.0.0.1:3000");
        assert!(config.jwt_secret.is_none());
    }

    // ── Credentials ───────────────────────────────────────────────────────────

    fn headers(pairs: &[(header::HeaderName, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(name.clone(), HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn bearer_and_cookie_are_both_read() {
        let map = headers(&[
            (header::AUTHORIZATION, "Bearer header-token"),
            (header::COOKIE, "theme=dark; sb-access-token=cookie-token"),
        ]);
        let creds = credentials_from_headers(&map, DEFAULT_SESSION_COOKIE);

        assert_eq!(creds.bearer.as_deref(), Some("header-token"));
        assert_eq!(creds.cookie.as_deref(), Some("cookie-token"));
        assert_eq!(creds.token(), Some("header-token"));
    }

    #[test]
    fn non_bearer_schemes_and_other_cookies_are_ignored() {
        let map = headers(&[
            (header::AUTHORIZATION, "Basic dXNlcjpwYXNz"),
            (header::COOKIE, "sb-refresh-token=r"),
            (header::COOKIE, "session=x"),
        ]);
        let creds = credentials_from_headers(&map, DEFAULT_SESSION_COOKIE);

        assert!(creds.bearer.is_none());
        assert!(creds.cookie.is_none());
        assert!(creds.token().is_none());
    }

    #[test]
    fn bearer_scheme_is_case_insensitive() {
        let map = headers(&[(header::AUTHORIZATION, "bearer abc")]);
        assert_eq!(
            credentials_from_headers(&map, DEFAULT_SESSION_COOKIE).bearer.as_deref(),
            Some("abc")
        );
    }

    // ── Error mapping ─────────────────────────────────────────────────────────

    #[test]
    fn each_error_maps_to_one_status() {
        let cases = [
            (
                ClubError::Unauthenticated {
                    operation: "create_gallery".into(),
                },
                StatusCode::UNAUTHORIZED,
            ),
            (
                ClubError::Forbidden {
                    principal: "u".into(),
                    operation: "delete_fixture".into(),
                },
                StatusCode::FORBIDDEN,
            ),
            (ClubError::invalid("bad"), StatusCode::BAD_REQUEST),
            (
                ClubError::NotFound {
                    kind: "gallery",
                    id: "g1".into(),
                },
                StatusCode::NOT_FOUND,
            ),
            (ClubError::upstream("db down"), StatusCode::INTERNAL_SERVER_ERROR),
            (
                ClubError::ConfigError {
                    reason: "x".into(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(AppError::from(error).status(), status);
        }
    }
}
