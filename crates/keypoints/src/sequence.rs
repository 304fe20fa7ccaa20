//! Ordered pose frames and frame timing

use data_validator::{Validate, Validator};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::point::Dimensionality;
use crate::skeleton::Skeleton;

/// Keypoints of one frame as produced by the pose model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawFrame {
    /// One coordinate list per keypoint, in landmark order
    #[serde(default)]
    pub keypoints: Vec<Vec<f64>>,
}

/// Outcome of pose detection for a single frame
#[derive(Debug, Clone, PartialEq)]
pub enum Detection {
    Detected(Skeleton),
    /// No usable person in the frame; still occupies its index
    Undetected,
}

/// A frame at its position in the analyzed sequence
#[derive(Debug, Clone, PartialEq)]
pub struct PoseFrame {
    /// 0-based position in the input sequence
    pub index: usize,
    pub detection: Detection,
}

impl PoseFrame {
    pub fn skeleton(&self) -> Option<&Skeleton> {
        match &self.detection {
            Detection::Detected(skeleton) => Some(skeleton),
            Detection::Undetected => None,
        }
    }

    pub fn is_detected(&self) -> bool {
        matches!(self.detection, Detection::Detected(_))
    }
}

/// Complete, ordered sequence of analyzed frames
#[derive(Debug, Clone, Default)]
pub struct PoseSequence {
    frames: Vec<PoseFrame>,
    dimensionality: Dimensionality,
}

impl PoseSequence {
    /// Ingest raw model output.
    ///
    /// Frames whose keypoints do not form a valid skeleton become
    /// [`Detection::Undetected`]; ingestion itself never fails.
    pub fn from_raw(raw_frames: Vec<RawFrame>, dimensionality: Dimensionality) -> Self {
        let frames = raw_frames
            .into_iter()
            .enumerate()
            .map(|(index, raw)| {
                let detection = if raw.keypoints.is_empty() {
                    Detection::Undetected
                } else {
                    match Skeleton::from_raw(&raw.keypoints, dimensionality) {
                        Ok(skeleton) => Detection::Detected(skeleton),
                        Err(e) => {
                            debug!(frame = index, "Frame treated as undetected: {}", e);
                            Detection::Undetected
                        }
                    }
                };
                PoseFrame { index, detection }
            })
            .collect();

        Self {
            frames,
            dimensionality,
        }
    }

    /// Build from already-validated skeletons; `None` marks an undetected frame.
    pub fn from_skeletons<I>(skeletons: I, dimensionality: Dimensionality) -> Self
    where
        I: IntoIterator<Item = Option<Skeleton>>,
    {
        let frames = skeletons
            .into_iter()
            .enumerate()
            .map(|(index, skeleton)| PoseFrame {
                index,
                detection: skeleton.map_or(Detection::Undetected, Detection::Detected),
            })
            .collect();

        Self {
            frames,
            dimensionality,
        }
    }

    pub fn frames(&self) -> &[PoseFrame] {
        &self.frames
    }

    pub fn dimensionality(&self) -> Dimensionality {
        self.dimensionality
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Number of frames without a usable skeleton
    pub fn undetected_count(&self) -> usize {
        self.frames.iter().filter(|f| !f.is_detected()).count()
    }
}

/// Converts frame counts into elapsed seconds.
///
/// When only every `frame_skip`-th video frame was analyzed, each analyzed
/// frame stands for `frame_skip / fps` seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeBase {
    /// Video frame rate
    pub fps: f64,
    /// Analyze every n-th video frame
    pub frame_skip: u32,
}

impl Default for TimeBase {
    fn default() -> Self {
        Self {
            fps: 30.0,
            frame_skip: 1,
        }
    }
}

impl TimeBase {
    pub fn new(fps: f64, frame_skip: u32) -> Self {
        Self { fps, frame_skip }
    }

    /// Seconds represented by one analyzed frame
    pub fn seconds_per_frame(&self) -> f64 {
        f64::from(self.frame_skip) / self.fps
    }

    /// Seconds spanned by `frames` analyzed frames.
    ///
    /// A single division keeps integral boundaries exact (300 frames at
    /// 30 fps is exactly 10 s).
    pub fn seconds_for_frames(&self, frames: usize) -> f64 {
        frames as f64 * f64::from(self.frame_skip) / self.fps
    }

    /// Elapsed seconds at the start of frame `index`
    pub fn timestamp(&self, index: usize) -> f64 {
        self.seconds_for_frames(index)
    }

    /// Smallest frame count lasting at least `seconds`, never below 1.
    ///
    /// Saturates at `usize::MAX` when the product overflows.
    pub fn min_frames(&self, seconds: f64) -> usize {
        let frames = seconds * self.fps / f64::from(self.frame_skip);
        // Absorb float noise such as 0.1 * 30 = 3.0000000000000004
        let frames = (frames - 1e-9).ceil();
        if frames > 1.0 {
            frames as usize
        } else {
            1
        }
    }
}

impl Validate for TimeBase {
    fn validate(&self, v: &mut Validator) {
        v.check_positive("fps", self.fps)
            .check("frame_skip", self.frame_skip >= 1, "must be at least 1");
    }
}
