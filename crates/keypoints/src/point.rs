//! Keypoint coordinates

use serde::{Deserialize, Serialize};

use crate::geometry::compute_angle;
use crate::KeypointError;

/// Coordinate dimensionality, fixed for a whole run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimensionality {
    /// Pixel-space (x, y); a trailing confidence value is ignored
    #[default]
    Planar,
    /// (x, y, z) when depth is available
    Spatial,
}

impl Dimensionality {
    /// Number of coordinate components
    pub const fn components(self) -> usize {
        match self {
            Dimensionality::Planar => 2,
            Dimensionality::Spatial => 3,
        }
    }

    /// Build a point from one raw keypoint as emitted by the pose model.
    pub fn point_from_raw(self, index: usize, raw: &[f64]) -> Result<Point, KeypointError> {
        match (self, raw) {
            (Dimensionality::Planar, [x, y] | [x, y, _]) => Ok(Point::planar(*x, *y)),
            (Dimensionality::Spatial, [x, y, z, ..]) => Ok(Point::spatial(*x, *y, *z)),
            _ => Err(KeypointError::InvalidArity {
                index,
                expected: self.components(),
                found: raw.len(),
            }),
        }
    }
}

/// A 2D or 3D keypoint. Planar points carry `z = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Point {
    pub const fn planar(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    pub const fn spatial(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Point halfway between `self` and `other`
    pub fn midpoint(self, other: Point) -> Point {
        Point {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
            z: (self.z + other.z) / 2.0,
        }
    }

    /// Angle in degrees at `vertex` between `a` and `c`
    pub fn angle_at(a: Point, vertex: Point, c: Point) -> f64 {
        compute_angle(a.to_array(), vertex.to_array(), c.to_array())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planar_accepts_confidence() {
        let p = Dimensionality::Planar.point_from_raw(0, &[10.0, 20.0, 0.9]).unwrap();
        assert_eq!(p, Point::planar(10.0, 20.0));
    }

    #[test]
    fn test_spatial_requires_depth() {
        let err = Dimensionality::Spatial.point_from_raw(4, &[1.0, 2.0]).unwrap_err();
        assert_eq!(
            err,
            KeypointError::InvalidArity {
                index: 4,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn test_midpoint() {
        let m = Point::planar(0.0, 0.0).midpoint(Point::planar(4.0, 2.0));
        assert_eq!(m, Point::planar(2.0, 1.0));
    }

    #[test]
    fn test_angle_at() {
        let angle = Point::angle_at(
            Point::planar(0.0, -50.0),
            Point::planar(0.0, 0.0),
            Point::planar(50.0, 0.0),
        );
        assert!((angle - 90.0).abs() < 1e-6);
    }
}
