//! Admin area.
//!
//! GET /api/admin/activity  recent activity (`?limit=N`, default 100) and
//!                          whether the retained chain holds
//! GET /admin               browser entry point; redirects instead of failing

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use clubhouse_audit::ActivityLog;
use clubhouse_contracts::{operation::Operation, policy::AccessDecision};

use crate::{error::AppError, extract::Credentials, state::AppState};

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

/// Events returned when no `limit` is given.
pub const DEFAULT_ACTIVITY_LIMIT: usize = 100;

#[derive(Debug, Default, Deserialize)]
pub struct ActivityParams {
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ActivityResponse {
    /// False if any retained event was altered or removed.
    pub intact: bool,
    #[serde(flatten)]
    pub log: ActivityLog,
}

pub async fn activity(
    State(state): State<Arc<AppState>>,
    Credentials(creds): Credentials,
    params: Result<Query<ActivityParams>, QueryRejection>,
) -> Result<Json<ActivityResponse>, AppError> {
    state.gate.authorize(&creds, Operation::ViewActivity).await?;
    let Query(params) = params?;

    let limit = params.limit.unwrap_or(DEFAULT_ACTIVITY_LIMIT);
    let intact = state.activity.verify_integrity()?;
    let log = state.activity.export_recent(limit)?;
    Ok(Json(ActivityResponse { intact, log }))
}

pub async fn admin_area(
    State(state): State<Arc<AppState>>,
    Credentials(creds): Credentials,
) -> Result<Response, AppError> {
    let (identity, decision) = state.gate.check(&creds, Operation::AdminArea).await?;

    let response = match decision {
        AccessDecision::Allow => Html(format!(
            "<!doctype html><title>Club admin</title>\
             <h1>Club admin</h1><p>Signed in as {}</p>",
            escape(identity.email().unwrap_or(identity.principal()))
        ))
        .into_response(),
        AccessDecision::DenyUnauthenticated => Redirect::to(LOGIN_PATH).into_response(),
        AccessDecision::DenyForbidden => Redirect::to(HOME_PATH).into_response(),
    };
    Ok(response)
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
