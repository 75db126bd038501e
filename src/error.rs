//! Error taxonomy for the HTTP boundary.
//!
//! Validation errors carry field-level detail back to the caller; everything
//! else is logged server-side and surfaced as a generic message.

use crate::types::penalty::ValidationError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Client-caused, non-retryable without corrected input.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Artifacts failed to load at startup; the service is degraded.
    #[error("prediction model is not available")]
    ModelUnavailable,

    /// Unexpected failure during encoding or model invocation. The inner
    /// error is for server-side logs only and never reaches the client.
    #[error("prediction failed")]
    Prediction(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::ModelUnavailable | ApiError::Prediction(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        // Display only: the Prediction source is deliberately not rendered.
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
