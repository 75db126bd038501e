//! Keeper Dive-Zone Prediction Service
//!
//! Predicts which of three zones (Left, Center, Right) a goalkeeper will dive
//! toward during a penalty shootout. One HTTP endpoint backed by a trained
//! classifier, plus the offline pipeline that trains it from historical
//! shootout data.

pub mod api;
pub mod config;
pub mod error;
pub mod features;
pub mod models;
pub mod training;
pub mod types;

pub use api::{create_router, AppState};
pub use config::AppConfig;
pub use error::ApiError;
pub use features::{FeatureEncoder, FeatureSchema};
pub use models::inference::InferenceEngine;
pub use types::{PenaltyInput, PenaltyRequest, Prediction};
