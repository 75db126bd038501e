//! Offline training pipeline components

pub mod dataset;
pub mod evaluation;
pub mod pipeline;
pub mod sampler;

pub use pipeline::TrainingSummary;
