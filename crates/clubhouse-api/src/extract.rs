//! Session credential extraction.
//!
//! The token is taken from `Authorization: Bearer …` or, failing that, from
//! the session cookie. Both are passed through untouched; verification is
//! the identity provider's job.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};

use clubhouse_contracts::identity::SessionCredentials;

use crate::state::AppState;

/// Raw credentials of the current request. Never rejects.
#[derive(Debug, Clone, Default)]
pub struct Credentials(pub SessionCredentials);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for Credentials {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        Ok(Credentials(credentials_from_headers(
            &parts.headers,
            &state.session_cookie,
        )))
    }
}

pub fn credentials_from_headers(headers: &HeaderMap, cookie_name: &str) -> SessionCredentials {
    SessionCredentials {
        bearer: bearer_token(headers),
        cookie: cookie_value(headers, cookie_name),
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}

fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
