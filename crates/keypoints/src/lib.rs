//! Pose Keypoints
//!
//! Strongly-typed input side of the ergonomics pipeline:
//! - COCO-17 body landmark schema
//! - Validated per-frame skeletons (detected / undetected)
//! - Frame timing (fps and frame skip)
//! - Joint angle geometry

pub mod geometry;
pub mod landmark;
pub mod point;
pub mod sequence;
pub mod skeleton;

pub use geometry::{compute_angle, DEGENERATE_ANGLE};
pub use landmark::{Landmark, MIN_DETECTED_KEYPOINTS};
pub use point::{Dimensionality, Point};
pub use sequence::{Detection, PoseFrame, PoseSequence, RawFrame, TimeBase};
pub use skeleton::Skeleton;

use thiserror::Error;

/// Reasons a frame's keypoints cannot form a skeleton.
///
/// These never escape ingestion: the frame is recorded as undetected instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KeypointError {
    #[error("Only {found} keypoints present, at least {required} required")]
    TooFewKeypoints { found: usize, required: usize },

    #[error("Keypoint {index} has {found} components, expected {expected}")]
    InvalidArity {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("Landmark {0:?} has a non-finite coordinate")]
    NonFiniteCoordinate(Landmark),
}
