//! COCO-17 body landmark numbering

use serde::{Deserialize, Serialize};

/// Frames with fewer keypoints than this (indices 0-15) are undetected.
pub const MIN_DETECTED_KEYPOINTS: usize = 16;

/// Named anatomical landmark, numbered as the pose model emits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Landmark {
    Nose,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl Landmark {
    /// All landmarks in model order
    pub const ALL: [Landmark; 17] = [
        Landmark::Nose,
        Landmark::LeftEye,
        Landmark::RightEye,
        Landmark::LeftEar,
        Landmark::RightEar,
        Landmark::LeftShoulder,
        Landmark::RightShoulder,
        Landmark::LeftElbow,
        Landmark::RightElbow,
        Landmark::LeftWrist,
        Landmark::RightWrist,
        Landmark::LeftHip,
        Landmark::RightHip,
        Landmark::LeftKnee,
        Landmark::RightKnee,
        Landmark::LeftAnkle,
        Landmark::RightAnkle,
    ];

    /// Position in the model's keypoint array
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Landmark at a keypoint array position
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Whether a frame must carry this landmark to count as detected
    pub const fn is_required(self) -> bool {
        self.index() < MIN_DETECTED_KEYPOINTS
    }
}
