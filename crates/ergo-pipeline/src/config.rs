//! Pipeline configuration

use data_validator::{Validate, Validator};
use keypoints::TimeBase;
use posture::PostureConfig;
use risk_assessment::RiskConfig;
use serde::{Deserialize, Serialize};

/// Complete configuration of one analysis pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub time_base: TimeBase,

    pub posture: PostureConfig,

    /// Shortest event kept, in seconds
    pub min_persistence_seconds: f64,

    pub risk: RiskConfig,

    /// Frames classified between progress notifications
    pub progress_chunk: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            time_base: TimeBase::default(),
            posture: PostureConfig::default(),
            min_persistence_seconds: 3.0,
            risk: RiskConfig::default(),
            progress_chunk: 256,
        }
    }
}

impl Validate for PipelineConfig {
    fn validate(&self, v: &mut Validator) {
        v.nested("time_base", &self.time_base)
            .check_non_negative("min_persistence_seconds", self.min_persistence_seconds)
            .check("progress_chunk", self.progress_chunk > 0, "must be at least 1")
            .nested("posture", &self.posture)
            .nested("risk", &self.risk);
    }
}
