//! Training schedule administration.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use clubhouse_contracts::{
    operation::Operation,
    resource::{NewTrainingSession, TrainingSession, TrainingSessionPatch},
};

use crate::{error::AppError, extract::Credentials, state::AppState};

pub async fn create(
    State(state): State<Arc<AppState>>,
    Credentials(creds): Credentials,
    body: Result<Json<NewTrainingSession>, JsonRejection>,
) -> Result<(StatusCode, Json<TrainingSession>), AppError> {
    state
        .gate
        .authorize(&creds, Operation::CreateTrainingSession)
        .await?;
    let Json(input) = body?;
    input.validate()?;

    let session = state.store.create_training_session(input).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// The merged start/end window is re-checked by the store.
pub async fn update(
    State(state): State<Arc<AppState>>,
    Credentials(creds): Credentials,
    Path(id): Path<String>,
    body: Result<Json<TrainingSessionPatch>, JsonRejection>,
) -> Result<Json<TrainingSession>, AppError> {
    state
        .gate
        .authorize(&creds, Operation::UpdateTrainingSession)
        .await?;
    let Json(patch) = body?;
    patch.validate()?;

    Ok(Json(state.store.update_training_session(&id, patch).await?))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Credentials(creds): Credentials,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state
        .gate
        .authorize(&creds, Operation::DeleteTrainingSession)
        .await?;
    state.store.delete_training_session(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
