//! Fixture listing and administration.
//!
//! GET    /api/fixtures?filter=upcoming|past|all&limit=N
//! POST   /api/admin/fixtures
//! PATCH  /api/admin/fixtures/:id
//! DELETE /api/admin/fixtures/:id

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use clubhouse_contracts::{
    operation::Operation,
    resource::{Fixture, FixtureFilter, FixturePatch, FixtureQuery, NewFixture},
};

use crate::{error::AppError, extract::Credentials, state::AppState};

#[derive(Debug, Default, Deserialize)]
pub struct FixtureParams {
    #[serde(default)]
    pub filter: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl FixtureParams {
    fn into_query(self) -> Result<FixtureQuery, AppError> {
        let filter: FixtureFilter = self.filter.as_deref().unwrap_or_default().parse()?;
        Ok(FixtureQuery {
            filter,
            limit: self.limit,
        })
    }
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    Credentials(creds): Credentials,
    params: Result<Query<FixtureParams>, QueryRejection>,
) -> Result<Json<Vec<Fixture>>, AppError> {
    state.gate.authorize(&creds, Operation::ListFixtures).await?;
    let Query(params) = params?;
    let query = params.into_query()?;

    Ok(Json(state.store.list_fixtures(query).await?))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Credentials(creds): Credentials,
    body: Result<Json<NewFixture>, JsonRejection>,
) -> Result<(StatusCode, Json<Fixture>), AppError> {
    state.gate.authorize(&creds, Operation::CreateFixture).await?;
    let Json(input) = body?;
    input.validate()?;

    let fixture = state.store.create_fixture(input).await?;
    Ok((StatusCode::CREATED, Json(fixture)))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Credentials(creds): Credentials,
    Path(id): Path<String>,
    body: Result<Json<FixturePatch>, JsonRejection>,
) -> Result<Json<Fixture>, AppError> {
    state.gate.authorize(&creds, Operation::UpdateFixture).await?;
    let Json(patch) = body?;
    patch.validate()?;

    Ok(Json(state.store.update_fixture(&id, patch).await?))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Credentials(creds): Credentials,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.gate.authorize(&creds, Operation::DeleteFixture).await?;
    state.store.delete_fixture(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
