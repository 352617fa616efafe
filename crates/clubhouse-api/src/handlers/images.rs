//! Gallery image administration.
//!
//! Image bytes live in the external blob store; these endpoints only manage
//! the records pointing at them.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use clubhouse_contracts::{
    operation::Operation,
    resource::{GalleryImage, GalleryImagePatch, NewGalleryImage},
};

use crate::{error::AppError, extract::Credentials, state::AppState};

/// POST /api/admin/galleries/:id/images
pub async fn add(
    State(state): State<Arc<AppState>>,
    Credentials(creds): Credentials,
    Path(gallery_id): Path<String>,
    body: Result<Json<NewGalleryImage>, JsonRejection>,
) -> Result<(StatusCode, Json<GalleryImage>), AppError> {
    state.gate.authorize(&creds, Operation::AddGalleryImage).await?;
    let Json(input) = body?;
    input.validate()?;

    let image = state.store.add_gallery_image(&gallery_id, input).await?;
    Ok((StatusCode::CREATED, Json(image)))
}

/// PATCH /api/admin/images/:id
pub async fn update(
    State(state): State<Arc<AppState>>,
    Credentials(creds): Credentials,
    Path(id): Path<String>,
    body: Result<Json<GalleryImagePatch>, JsonRejection>,
) -> Result<Json<GalleryImage>, AppError> {
    state
        .gate
        .authorize(&creds, Operation::UpdateGalleryImage)
        .await?;
    let Json(patch) = body?;
    patch.validate()?;

    Ok(Json(state.store.update_gallery_image(&id, patch).await?))
}

/// DELETE /api/admin/images/:id
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Credentials(creds): Credentials,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state
        .gate
        .authorize(&creds, Operation::DeleteGalleryImage)
        .await?;
    state.store.delete_gallery_image(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
