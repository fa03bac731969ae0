//! Error types for the dashboard API.
//!
//! [`ApiError`] converts into an Axum response with the same
//! `{"success": false, "error": ...}` body the device firmware already
//! understands.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sensorhub_core::ValidationError;
use sensorhub_types::IngestFailure;

/// Errors that can occur in the API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request body failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ApiError {
    /// HTTP status for this error.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, axum::Json(IngestFailure::new(&self))).into_response()
    }
}
