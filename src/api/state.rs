//! Shared application state for API handlers.

use crate::models::inference::InferenceEngine;
use std::sync::Arc;

/// Outcome of artifact loading at startup.
///
/// Fixed before the listener binds and never mutated afterwards, so handlers
/// share it without locking.
pub enum ModelState {
    /// Artifacts loaded; predictions are served.
    Ready(InferenceEngine),
    /// Artifact loading failed; predict requests fail fast.
    Degraded {
        /// Full load error, logged at startup and kept for /health logs.
        reason: String,
    },
}

#[derive(Clone)]
pub struct AppState {
    pub model: Arc<ModelState>,
}

impl AppState {
    pub fn ready(engine: InferenceEngine) -> Self {
        Self {
            model: Arc::new(ModelState::Ready(engine)),
        }
    }

    pub fn degraded(reason: impl Into<String>) -> Self {
        Self {
            model: Arc::new(ModelState::Degraded {
                reason: reason.into(),
            }),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.model.as_ref(), ModelState::Ready(_))
    }
}
