//! HTTP request handlers.

use crate::api::state::{AppState, ModelState};
use crate::error::ApiError;
use crate::types::penalty::PenaltyRequest;
use crate::types::prediction::Prediction;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::{debug, error, warn};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// GET /health -- readiness probe reflecting artifact load state
pub async fn health(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    match state.model.as_ref() {
        ModelState::Ready(_) => Ok(Json(HealthResponse { status: "ok" })),
        ModelState::Degraded { reason } => {
            warn!(reason = %reason, "Health probe while degraded");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthResponse { status: "degraded" }),
            ))
        }
    }
}

/// POST /predict -- validate, encode, score, return the top-2 dive zones
pub async fn predict(
    State(state): State<AppState>,
    Json(request): Json<PenaltyRequest>,
) -> Result<Json<Prediction>, ApiError> {
    let input = request.validate().map_err(|e| {
        debug!(error = %e, "Rejected invalid penalty input");
        ApiError::from(e)
    })?;

    let engine = match state.model.as_ref() {
        ModelState::Ready(engine) => engine,
        ModelState::Degraded { reason } => {
            error!(reason = %reason, "Predict request while model unavailable");
            return Err(ApiError::ModelUnavailable);
        }
    };

    let prediction = engine.predict(&input).map_err(|e| {
        error!(error = ?e, team = input.team(), "Prediction failed");
        ApiError::Prediction(e)
    })?;

    debug!(
        team = input.team(),
        dive_zones = ?prediction.dive_zones,
        "Prediction served"
    );
    Ok(Json(prediction))
}
