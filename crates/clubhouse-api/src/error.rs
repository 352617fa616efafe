//! HTTP mapping for `ClubError`.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{debug, error};

use clubhouse_contracts::error::ClubError;

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Handler error. Wraps `ClubError` so it can be returned from axum handlers.
#[derive(Debug)]
pub struct AppError(pub ClubError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ClubError::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
            ClubError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ClubError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ClubError::NotFound { .. } => StatusCode::NOT_FOUND,
            ClubError::UpstreamFailure { .. } | ClubError::ConfigError { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<ClubError> for AppError {
    fn from(e: ClubError) -> Self {
        Self(e)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self(ClubError::invalid(rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self(ClubError::invalid(rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self.0 {
            ClubError::Unauthenticated { .. } => "authentication required".to_string(),
            ClubError::Forbidden { .. } => "forbidden".to_string(),
            ClubError::InvalidInput { reason } => reason.clone(),
            ClubError::NotFound { .. } => self.0.to_string(),
            ClubError::UpstreamFailure { .. } | ClubError::ConfigError { .. } => {
                error!(error = %self.0, "request failed");
                "internal error".to_string()
            }
        };
        if status.is_client_error() {
            debug!(status = status.as_u16(), error = %self.0, "request rejected");
        }

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
