//! Router construction for the Clubhouse site.

use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers::{admin, fixtures, galleries, images, public, training};
use crate::state::AppState;

/// Build the full router. Guarding happens per handler through the access
/// gate, so public and admin routes share one state and one layer stack.
pub fn build_router(state: Arc<AppState>) -> Router {
    let public = Router::new()
        .route("/health", get(public::health))
        .route("/home", get(public::home))
        .route("/fixtures", get(fixtures::list))
        .route("/training", get(public::list_training))
        .route("/galleries", get(public::list_galleries))
        .route("/galleries/:id", get(public::get_gallery));

    let admin = Router::new()
        .route("/galleries", post(galleries::create))
        .route(
            "/galleries/:id",
            patch(galleries::update).delete(galleries::delete),
        )
        .route("/galleries/:id/images", post(images::add))
        .route("/images/:id", patch(images::update).delete(images::delete))
        .route("/fixtures", post(fixtures::create))
        .route(
            "/fixtures/:id",
            patch(fixtures::update).delete(fixtures::delete),
        )
        .route("/training", post(training::create))
        .route(
            "/training/:id",
            patch(training::update).delete(training::delete),
        )
        .route("/activity", get(admin::activity));

    Router::new()
        .nest("/api", public.nest("/admin", admin))
        .route("/admin", get(admin::admin_area))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
