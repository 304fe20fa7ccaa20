//! Risk rules and cutoffs

use data_validator::{Validate, Validator};
use serde::{Deserialize, Serialize};

/// Score that the risk cutoffs are compared against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBasis {
    /// Persistent deviation events only
    InadequatePostures,
    /// Persistent events plus extreme-angle frames
    Combined,
}

/// When arm elevation counts as repetitive movement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum RepetitionRule {
    /// More than `max_events` persistent arm elevation events
    EventCount { max_events: usize },
    /// Arm elevated on more than `max_ratio` of all frames
    FrameProportion { max_ratio: f64 },
}

/// Which events count as static postures
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum StaticPostureRule {
    /// Trunk inclination events lasting more than `min_seconds`
    Duration { min_seconds: f64 },
    /// Events of any type whose angle std dev is below `max_std_dev_degrees`
    AngularVariance { max_std_dev_degrees: f64 },
}

/// Metric and risk classification configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    pub basis: RiskBasis,

    /// Score at or above which risk is at least moderate
    pub moderate_cutoff: usize,

    /// Score at or above which risk is high
    pub high_cutoff: usize,

    pub repetition: RepetitionRule,

    /// Knee flexion held longer than this is a forced posture (seconds)
    pub forced_posture_seconds: f64,

    /// Undetected time that counts as a pause (seconds)
    pub pause_seconds: f64,

    /// Whether undetected time equal to `pause_seconds` counts
    pub pause_inclusive: bool,

    pub static_posture: StaticPostureRule,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            basis: RiskBasis::InadequatePostures,
            moderate_cutoff: 5,
            high_cutoff: 10,
            repetition: RepetitionRule::EventCount { max_events: 10 },
            forced_posture_seconds: 90.0,
            pause_seconds: 10.0,
            pause_inclusive: true,
            static_posture: StaticPostureRule::Duration { min_seconds: 4.0 },
        }
    }
}

impl RiskConfig {
    /// Long-session variant: combined score, moderate above 30, high above 100
    pub fn strict_variant() -> Self {
        Self {
            basis: RiskBasis::Combined,
            moderate_cutoff: 31,
            high_cutoff: 101,
            ..Self::default()
        }
    }
}

impl Validate for RepetitionRule {
    fn validate(&self, v: &mut Validator) {
        if let Self::FrameProportion { max_ratio } = self {
            v.check_ratio("max_ratio", *max_ratio);
        }
    }
}

impl Validate for StaticPostureRule {
    fn validate(&self, v: &mut Validator) {
        match self {
            Self::Duration { min_seconds } => {
                v.check_non_negative("min_seconds", *min_seconds);
            }
            Self::AngularVariance {
                max_std_dev_degrees,
            } => {
                v.check_non_negative("max_std_dev_degrees", *max_std_dev_degrees);
            }
        }
    }
}

impl Validate for RiskConfig {
    fn validate(&self, v: &mut Validator) {
        v.check("moderate_cutoff", self.moderate_cutoff > 0, "must be at least 1")
            .check_order(
                "moderate_cutoff",
                self.moderate_cutoff as f64,
                "high_cutoff",
                self.high_cutoff as f64,
            )
            .check_non_negative("forced_posture_seconds", self.forced_posture_seconds)
            .check_non_negative("pause_seconds", self.pause_seconds)
            .nested("repetition", &self.repetition)
            .nested("static_posture", &self.static_posture);
    }
}
