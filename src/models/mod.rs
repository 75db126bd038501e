//! Model components: frozen classifier parameters, artifact IO, inference

pub mod classifier;
pub mod inference;
pub mod loader;

pub use classifier::SoftmaxClassifier;
pub use inference::InferenceEngine;
