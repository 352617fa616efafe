//! # clubhouse-auth
//!
//! Identity providers for the Clubhouse site.
//!
//! [`JwtIdentityProvider`] verifies the hosted auth service's HS256 access
//! tokens locally; [`UnconfiguredIdentityProvider`] is installed when no
//! secret is available and fails every lookup, which the access gate turns
//! into "unauthenticated".

pub mod jwt;

pub use jwt::{JwtIdentityProvider, UnconfiguredIdentityProvider, DEFAULT_AUDIENCE};

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde::Serialize;

    use clubhouse_contracts::{
        error::ClubError,
        identity::{CallerIdentity, SessionCredentials},
    };
    use clubhouse_core::traits::IdentityProvider;

    use super::{JwtIdentityProvider, UnconfiguredIdentityProvider, DEFAULT_AUDIENCE};

    const SECRET: &str = "test-secret-for-unit-tests";

    #[derive(Serialize)]
    struct TestClaims<'a> {
        sub: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        email: Option<&'a str>,
        aud: &'a str,
        exp: i64,
    }

    fn token(secret: &str, email: Option<&str>, aud: &str, exp_offset_secs: i64) -> String {
        let claims = TestClaims {
            sub: "user-coach",
            email,
            aud,
            exp: Utc::now().timestamp() + exp_offset_secs,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn provider() -> JwtIdentityProvider {
        JwtIdentityProvider::new(SECRET, Some(DEFAULT_AUDIENCE)).unwrap()
    }

    #[tokio::test]
    async fn valid_token_resolves_to_authenticated_identity() {
        let creds = SessionCredentials::bearer(token(
            SECRET,
            Some("coach@club.example"),
            DEFAULT_AUDIENCE,
            3600,
        ));

        let identity = provider().resolve(&creds).await.unwrap();

        assert_eq!(
            identity,
            CallerIdentity::authenticated("user-coach", Some("coach@club.example".to_string()))
        );
    }

    #[tokio::test]
    async fn cookie_token_is_accepted() {
        let creds = SessionCredentials {
            bearer: None,
            cookie: Some(token(SECRET, None, DEFAULT_AUDIENCE, 3600)),
        };

        let identity = provider().resolve(&creds).await.unwrap();
        assert_eq!(identity.principal(), "user-coach");
        assert_eq!(identity.email(), None);
    }

    #[tokio::test]
    async fn missing_token_is_anonymous_not_an_error() {
        let identity = provider()
            .resolve(&SessionCredentials::default())
            .await
            .unwrap();
        assert!(identity.is_anonymous());
    }

    #[tokio::test]
    async fn rejected_tokens_are_anonymous() {
        let cases = [
            ("expired", token(SECRET, Some("coach@club.example"), DEFAULT_AUDIENCE, -3600)),
            ("wrong secret", token("other-secret", Some("coach@club.example"), DEFAULT_AUDIENCE, 3600)),
            ("wrong audience", token(SECRET, Some("coach@club.example"), "service_role", 3600)),
            ("garbage", "not.a.jwt".to_string()),
        ];

        for (label, raw) in cases {
            let identity = provider()
                .resolve(&SessionCredentials::bearer(raw))
                .await
                .unwrap();
            assert!(identity.is_anonymous(), "{label} token must not authenticate");
        }
    }

    #[tokio::test]
    async fn audience_check_can_be_disabled() {
        let provider = JwtIdentityProvider::new(SECRET, None).unwrap();
        let creds = SessionCredentials::bearer(token(SECRET, None, "anything", 3600));

        assert!(!provider.resolve(&creds).await.unwrap().is_anonymous());
    }

    #[test]
    fn empty_secret_is_config_error() {
        assert!(matches!(
            JwtIdentityProvider::new("  ", None),
            Err(ClubError::ConfigError { .. })
        ));
    }

    #[tokio::test]
    async fn unconfigured_provider_always_fails() {
        let result = UnconfiguredIdentityProvider
            .resolve(&SessionCredentials::bearer("anything"))
            .await;
        assert!(matches!(result, Err(ClubError::UpstreamFailure { .. })));
    }
}
