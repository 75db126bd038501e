//! Type definitions for the dive-zone prediction service

pub mod penalty;
pub mod prediction;

pub use penalty::{Foot, PenaltyInput, PenaltyRequest, ValidationError, TEAMS};
pub use prediction::{DiveZone, Prediction};
