//! Gallery administration.
//!
//! POST   /api/admin/galleries      create (authenticated)
//! PATCH  /api/admin/galleries/:id  update (authenticated)
//! DELETE /api/admin/galleries/:id  delete with its images (allow-listed)

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use clubhouse_contracts::{
    operation::Operation,
    resource::{Gallery, GalleryPatch, NewGallery},
};

use crate::{error::AppError, extract::Credentials, state::AppState};

pub async fn create(
    State(state): State<Arc<AppState>>,
    Credentials(creds): Credentials,
    body: Result<Json<NewGallery>, JsonRejection>,
) -> Result<(StatusCode, Json<Gallery>), AppError> {
    state.gate.authorize(&creds, Operation::CreateGallery).await?;
    let Json(input) = body?;
    input.validate()?;

    let gallery = state.store.create_gallery(input).await?;
    Ok((StatusCode::CREATED, Json(gallery)))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Credentials(creds): Credentials,
    Path(id): Path<String>,
    body: Result<Json<GalleryPatch>, JsonRejection>,
) -> Result<Json<Gallery>, AppError> {
    state.gate.authorize(&creds, Operation::UpdateGallery).await?;
    let Json(patch) = body?;
    patch.validate()?;

    Ok(Json(state.store.update_gallery(&id, patch).await?))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Credentials(creds): Credentials,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.gate.authorize(&creds, Operation::DeleteGallery).await?;
    state.store.delete_gallery(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
