//! Posture Classification
//!
//! Ergonomic evaluation of single pose frames:
//! - Trunk inclination (neck, hip, knee)
//! - Arm elevation (shoulder, elbow, wrist)
//! - Knee flexion (hip, knee, ankle)
//! - Extreme articular angles

pub mod analysis;
pub mod classifier;
pub mod config;
pub mod rule;

pub use analysis::{DeviationSample, FrameAngles, FrameClassification};
pub use classifier::FrameClassifier;
pub use config::{ExtremeAngleThresholds, PostureConfig};
pub use rule::{Anchor, Comparison, DeviationRule, DeviationType};

use data_validator::ValidationError;
use thiserror::Error;

/// Posture classification error types
#[derive(Error, Debug)]
pub enum PostureError {
    #[error("Invalid posture configuration: {0}")]
    Config(#[from] ValidationError),
}
