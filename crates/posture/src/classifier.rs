//! Frame classifier

use data_validator::Validate;
use keypoints::{PoseFrame, Skeleton};
use tracing::{debug, info};

use crate::analysis::{DeviationSample, FrameAngles, FrameClassification};
use crate::config::PostureConfig;
use crate::rule::DeviationType;
use crate::PostureError;

/// Evaluates single frames against the posture rules.
///
/// Stateless: classifying a frame depends only on that frame and the
/// configuration, so frames may be classified in any order or in parallel.
#[derive(Debug, Clone)]
pub struct FrameClassifier {
    config: PostureConfig,
}

impl FrameClassifier {
    /// Create a classifier, rejecting invalid thresholds up front
    pub fn new(config: PostureConfig) -> Result<Self, PostureError> {
        config.validated()?;
        info!(
            trunk = config.trunk_inclination.threshold_degrees,
            arm = config.arm_elevation.threshold_degrees,
            knee = config.knee_flexion.threshold_degrees,
            "Frame classifier configured"
        );
        Ok(Self { config })
    }

    pub fn config(&self) -> &PostureConfig {
        &self.config
    }

    /// Classify one frame
    ///
    /// A collapsed limb measures 0 degrees, which violates every rule that
    /// compares with "less than" and counts as extreme trunk or knee flexion.
    pub fn classify(&self, frame: &PoseFrame) -> FrameClassification {
        let index = frame.index;
        let Some(skeleton) = frame.skeleton() else {
            return FrameClassification::Undetected { index };
        };

        let Some(angles) = self.measure(skeleton) else {
            // Unreachable with validated anchors
            debug!(frame = index, "Landmark missing for a configured angle");
            return FrameClassification::Undetected { index };
        };

        let deviations = DeviationType::ALL
            .into_iter()
            .filter_map(|kind| {
                let angle = angles.get(kind);
                self.config
                    .rule(kind)
                    .is_violated(angle)
                    .then_some(DeviationSample {
                        frame_index: index,
                        angle,
                        kind,
                    })
            })
            .collect();

        let extreme = self.config.extreme.is_extreme(
            angles.trunk_inclination,
            angles.arm_elevation,
            angles.knee_flexion,
        );

        FrameClassification::Detected {
            index,
            angles,
            deviations,
            extreme,
        }
    }

    /// Measure the angle of every deviation rule
    pub fn measure(&self, skeleton: &Skeleton) -> Option<FrameAngles> {
        Some(FrameAngles {
            trunk_inclination: self.config.trunk_inclination.angle(skeleton)?,
            arm_elevation: self.config.arm_elevation.angle(skeleton)?,
            knee_flexion: self.config.knee_flexion.angle(skeleton)?,
        })
    }
}
