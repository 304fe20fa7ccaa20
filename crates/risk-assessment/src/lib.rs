//! Ergonomic Risk Assessment
//!
//! Turns persistent deviation events and frame tallies into:
//! - Summary metrics (inadequate, repetitive, forced and static postures)
//! - A qualitative risk level
//! - Human-readable findings

mod config;
mod diagnosis;
mod metrics;

pub use config::{RepetitionRule, RiskBasis, RiskConfig, StaticPostureRule};
pub use diagnosis::{diagnose, Finding};
pub use metrics::{FrameTally, IndicatorValue, Metrics, MetricsAggregator, RiskLevel};

use data_validator::ValidationError;
use thiserror::Error;

/// Risk assessment error types
#[derive(Error, Debug)]
pub enum RiskError {
    #[error("Invalid risk configuration: {0}")]
    Config(#[from] ValidationError),
}
