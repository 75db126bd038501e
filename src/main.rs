//! Prediction service entry point.
//!
//! Loads the trained artifacts once, then serves `POST /predict`. If the
//! artifacts cannot be loaded the service still starts, in a degraded state
//! where predict requests fail fast instead of crashing the process.

use anyhow::Result;
use keeper_dive_predictor::api::AppState;
use keeper_dive_predictor::{create_router, AppConfig, InferenceEngine};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("keeper_dive_predictor=info".parse()?),
        )
        .init();

    info!("Starting keeper dive-zone prediction service");

    let config = AppConfig::load()?;
    info!(
        model = %config.artifacts.model_path,
        schema = %config.artifacts.schema_path,
        "Configuration loaded"
    );

    let state = match InferenceEngine::from_config(&config) {
        Ok(engine) => {
            info!(features = engine.feature_count(), "Inference engine ready");
            AppState::ready(engine)
        }
        Err(e) => {
            error!(error = ?e, "Failed to load model artifacts; serving degraded");
            AppState::degraded(format!("{e:#}"))
        }
    };

    let app = create_router(state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Listening");
    axum::serve(listener, app).await?;

    Ok(())
}
