//! Per-frame classification results

use serde::{Deserialize, Serialize};

use crate::rule::DeviationType;

/// One frame violating one deviation rule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviationSample {
    pub frame_index: usize,
    /// Measured angle in degrees
    pub angle: f64,
    pub kind: DeviationType,
}

/// Angles measured on a detected frame (degrees)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameAngles {
    pub trunk_inclination: f64,
    pub arm_elevation: f64,
    pub knee_flexion: f64,
}

impl FrameAngles {
    pub fn get(&self, kind: DeviationType) -> f64 {
        match kind {
            DeviationType::TrunkInclination => self.trunk_inclination,
            DeviationType::ArmElevation => self.arm_elevation,
            DeviationType::KneeFlexion => self.knee_flexion,
        }
    }
}

/// Classification of one frame
#[derive(Debug, Clone, PartialEq)]
pub enum FrameClassification {
    /// No usable skeleton; counts as inactive time
    Undetected { index: usize },

    Detected {
        index: usize,
        angles: FrameAngles,
        /// Violated rules, in [`DeviationType::ALL`] order
        deviations: Vec<DeviationSample>,
        /// At least one extreme articular angle
        extreme: bool,
    },
}

impl FrameClassification {
    pub fn index(&self) -> usize {
        match self {
            Self::Undetected { index } | Self::Detected { index, .. } => *index,
        }
    }

    pub fn is_detected(&self) -> bool {
        matches!(self, Self::Detected { .. })
    }

    pub fn deviations(&self) -> &[DeviationSample] {
        match self {
            Self::Detected { deviations, .. } => deviations,
            Self::Undetected { .. } => &[],
        }
    }

    pub fn angles(&self) -> Option<&FrameAngles> {
        match self {
            Self::Detected { angles, .. } => Some(angles),
            Self::Undetected { .. } => None,
        }
    }

    pub fn is_extreme(&self) -> bool {
        matches!(self, Self::Detected { extreme: true, .. })
    }

    /// Whether this frame deviates for `kind`
    pub fn has_deviation(&self, kind: DeviationType) -> bool {
        self.deviations().iter().any(|s| s.kind == kind)
    }
}
