//! Posture thresholds

use data_validator::{Validate, Validator};
use keypoints::Landmark;
use serde::{Deserialize, Serialize};

use crate::rule::{Anchor, Comparison, DeviationRule, DeviationType};

/// Frame-level thresholds for extreme articular angles (degrees)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtremeAngleThresholds {
    /// Trunk angle below this is extreme
    pub trunk_below: f64,
    /// Arm angle above this is extreme
    pub arm_above: f64,
    /// Knee angle below this is extreme
    pub knee_below: f64,
}

impl Default for ExtremeAngleThresholds {
    fn default() -> Self {
        Self {
            trunk_below: 90.0,
            arm_above: 150.0,
            knee_below: 60.0,
        }
    }
}

impl ExtremeAngleThresholds {
    /// Whether any of the three measured angles is extreme
    pub fn is_extreme(&self, trunk: f64, arm: f64, knee: f64) -> bool {
        trunk < self.trunk_below || arm > self.arm_above || knee < self.knee_below
    }
}

impl Validate for ExtremeAngleThresholds {
    fn validate(&self, v: &mut Validator) {
        v.check_angle("trunk_below", self.trunk_below)
            .check_angle("arm_above", self.arm_above)
            .check_angle("knee_below", self.knee_below);
    }
}

/// Posture classification configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostureConfig {
    /// Neck-hip-knee angle rule
    pub trunk_inclination: DeviationRule,

    /// Shoulder-elbow-wrist angle rule
    pub arm_elevation: DeviationRule,

    /// Hip-knee-ankle angle rule
    pub knee_flexion: DeviationRule,

    /// Coarser per-frame extreme angle limits
    pub extreme: ExtremeAngleThresholds,
}

impl Default for PostureConfig {
    fn default() -> Self {
        Self {
            trunk_inclination: DeviationRule::new(
                [
                    Anchor::Midpoint(Landmark::LeftShoulder, Landmark::RightShoulder),
                    Anchor::Midpoint(Landmark::LeftHip, Landmark::RightHip),
                    Anchor::Landmark(Landmark::LeftKnee),
                ],
                Comparison::LessThan,
                135.0,
            ),
            arm_elevation: DeviationRule::new(
                [
                    Anchor::Landmark(Landmark::LeftShoulder),
                    Anchor::Landmark(Landmark::LeftElbow),
                    Anchor::Landmark(Landmark::LeftWrist),
                ],
                Comparison::GreaterThan,
                90.0,
            ),
            knee_flexion: DeviationRule::new(
                [
                    Anchor::Landmark(Landmark::LeftHip),
                    Anchor::Landmark(Landmark::LeftKnee),
                    Anchor::Landmark(Landmark::LeftAnkle),
                ],
                Comparison::LessThan,
                90.0,
            ),
            extreme: ExtremeAngleThresholds::default(),
        }
    }
}

impl PostureConfig {
    /// Create strict config (flags milder deviations)
    pub fn strict() -> Self {
        let mut config = Self::default();
        config.trunk_inclination.threshold_degrees = 150.0;
        config.arm_elevation.threshold_degrees = 75.0;
        config.knee_flexion.threshold_degrees = 100.0;
        config.extreme = ExtremeAngleThresholds {
            trunk_below: 100.0,
            arm_above: 140.0,
            knee_below: 70.0,
        };
        config
    }

    /// Create lenient config (only pronounced deviations)
    pub fn lenient() -> Self {
        let mut config = Self::default();
        config.trunk_inclination.threshold_degrees = 120.0;
        config.arm_elevation.threshold_degrees = 110.0;
        config.knee_flexion.threshold_degrees = 75.0;
        config.extreme = ExtremeAngleThresholds {
            trunk_below: 80.0,
            arm_above: 160.0,
            knee_below: 50.0,
        };
        config
    }

    pub fn rule(&self, kind: DeviationType) -> &DeviationRule {
        match kind {
            DeviationType::TrunkInclination => &self.trunk_inclination,
            DeviationType::ArmElevation => &self.arm_elevation,
            DeviationType::KneeFlexion => &self.knee_flexion,
        }
    }

    pub fn rule_mut(&mut self, kind: DeviationType) -> &mut DeviationRule {
        match kind {
            DeviationType::TrunkInclination => &mut self.trunk_inclination,
            DeviationType::ArmElevation => &mut self.arm_elevation,
            DeviationType::KneeFlexion => &mut self.knee_flexion,
        }
    }
}

impl Validate for DeviationRule {
    fn validate(&self, v: &mut Validator) {
        v.check_angle("threshold_degrees", self.threshold_degrees).check(
            "anchors",
            self.anchors.iter().all(Anchor::is_always_present),
            "anchors must use landmarks 0-15, which every detected frame carries",
        );
    }
}

impl Validate for PostureConfig {
    fn validate(&self, v: &mut Validator) {
        for kind in DeviationType::ALL {
            v.nested(kind.key(), self.rule(kind));
        }
        v.nested("extreme", &self.extreme);
    }
}
