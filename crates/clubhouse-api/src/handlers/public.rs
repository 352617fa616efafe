//! Unguarded and public read endpoints.
//!
//! GET /api/health         liveness, no gate
//! GET /api/home           home page summary
//! GET /api/training       weekly training schedule
//! GET /api/galleries      galleries, newest first
//! GET /api/galleries/:id  one gallery with its images

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use clubhouse_contracts::{
    operation::Operation,
    resource::{Gallery, GalleryWithImages, HomeSummary, TrainingSession},
};

use crate::{error::AppError, extract::Credentials, state::AppState};

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn home(
    State(state): State<Arc<AppState>>,
    Credentials(creds): Credentials,
) -> Result<Json<HomeSummary>, AppError> {
    state.gate.authorize(&creds, Operation::ViewHome).await?;
    Ok(Json(state.store.home_summary().await?))
}

pub async fn list_training(
    State(state): State<Arc<AppState>>,
    Credentials(creds): Credentials,
) -> Result<Json<Vec<TrainingSession>>, AppError> {
    state
        .gate
        .authorize(&creds, Operation::ListTrainingSessions)
        .await?;
    Ok(Json(state.store.list_training_sessions().await?))
}

pub async fn list_galleries(
    State(state): State<Arc<AppState>>,
    Credentials(creds): Credentials,
) -> Result<Json<Vec<Gallery>>, AppError> {
    state.gate.authorize(&creds, Operation::ListGalleries).await?;
    Ok(Json(state.store.list_galleries().await?))
}

pub async fn get_gallery(
    State(state): State<Arc<AppState>>,
    Credentials(creds): Credentials,
    Path(id): Path<String>,
) -> Result<Json<GalleryWithImages>, AppError> {
    state.gate.authorize(&creds, Operation::GetGallery).await?;
    Ok(Json(state.store.get_gallery(&id).await?))
}
