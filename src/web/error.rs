//! HTTP status mapping for crate errors.

use crate::errors::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

impl Error {
    /// Status code reported to the client for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } | Self::ConcurrentModification { .. } => StatusCode::CONFLICT,
            Self::Authentication | Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Persistence { .. }
            | Self::PasswordHash { .. }
            | Self::Render { .. }
            | Self::Export { .. }
            | Self::Config { .. }
            | Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
            "Internal server error".to_string()
        } else {
            tracing::info!("Request rejected: {}", self);
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
