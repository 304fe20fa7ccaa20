//! Ergonomic Analysis Pipeline
//!
//! One-way flow over a complete pose sequence:
//! keypoints → angles → per-frame deviations → events → persistent events → metrics

mod config;
mod context;
mod observer;
mod pipeline;
mod report;

pub use config::PipelineConfig;
pub use context::RunContext;
pub use observer::{ObserverError, ProgressObserver};
pub use pipeline::ErgoPipeline;
pub use report::{AnalysisReport, EventRecord, FrameAngleRecord};

use data_validator::ValidationError;
use posture::PostureError;
use risk_assessment::RiskError;
use thiserror::Error;

/// Pipeline construction errors
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ValidationError),

    #[error(transparent)]
    Posture(#[from] PostureError),

    #[error(transparent)]
    Risk(#[from] RiskError),
}
