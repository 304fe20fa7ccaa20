//! Validated per-frame landmark set

use crate::landmark::{Landmark, MIN_DETECTED_KEYPOINTS};
use crate::point::{Dimensionality, Point};
use crate::KeypointError;

/// Landmarks of one detected person.
///
/// Every required landmark (indices 0-15) is present and finite; the right
/// ankle is optional because some models stop at index 15.
#[derive(Debug, Clone, PartialEq)]
pub struct Skeleton {
    required: [Point; MIN_DETECTED_KEYPOINTS],
    right_ankle: Option<Point>,
}

impl Skeleton {
    /// Build from points ordered by landmark index.
    pub fn from_points(points: &[Point]) -> Result<Self, KeypointError> {
        if points.len() < MIN_DETECTED_KEYPOINTS {
            return Err(KeypointError::TooFewKeypoints {
                found: points.len(),
                required: MIN_DETECTED_KEYPOINTS,
            });
        }

        if let Some(index) = points[..MIN_DETECTED_KEYPOINTS]
            .iter()
            .position(|p| !p.is_finite())
        {
            // index < 16, always a known landmark
            let landmark = Landmark::from_index(index).unwrap_or(Landmark::Nose);
            return Err(KeypointError::NonFiniteCoordinate(landmark));
        }

        let required = std::array::from_fn(|i| points[i]);
        let right_ankle = points
            .get(Landmark::RightAnkle.index())
            .copied()
            .filter(Point::is_finite);

        Ok(Self {
            required,
            right_ankle,
        })
    }

    /// Build from raw keypoint arrays as emitted by the pose model.
    ///
    /// Only the first 17 keypoints are read. A malformed right ankle is
    /// dropped instead of rejecting the frame.
    pub fn from_raw(raw: &[Vec<f64>], dimensionality: Dimensionality) -> Result<Self, KeypointError> {
        if raw.len() < MIN_DETECTED_KEYPOINTS {
            return Err(KeypointError::TooFewKeypoints {
                found: raw.len(),
                required: MIN_DETECTED_KEYPOINTS,
            });
        }

        let mut points = Vec::with_capacity(Landmark::ALL.len());
        for (index, values) in raw.iter().take(Landmark::ALL.len()).enumerate() {
            match dimensionality.point_from_raw(index, values) {
                Ok(point) => points.push(point),
                Err(_) if index >= MIN_DETECTED_KEYPOINTS => break,
                Err(e) => return Err(e),
            }
        }

        Self::from_points(&points)
    }

    /// Coordinates of a landmark, `None` only for a missing right ankle
    pub fn get(&self, landmark: Landmark) -> Option<Point> {
        match landmark {
            Landmark::RightAnkle => self.right_ankle,
            other => self.required.get(other.index()).copied(),
        }
    }
}
