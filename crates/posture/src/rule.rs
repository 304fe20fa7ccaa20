//! Deviation types and the angle rules that detect them

use std::fmt;

use keypoints::{Landmark, Point, Skeleton};
use serde::{Deserialize, Serialize};

/// Body region in an inadequate posture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviationType {
    /// Trunk bent forward (neck-hip-knee angle closes)
    TrunkInclination,
    /// Arm raised above the shoulder (shoulder-elbow-wrist angle opens)
    ArmElevation,
    /// Deep knee bend (hip-knee-ankle angle closes)
    KneeFlexion,
}

impl DeviationType {
    pub const ALL: [DeviationType; 3] = [
        DeviationType::TrunkInclination,
        DeviationType::ArmElevation,
        DeviationType::KneeFlexion,
    ];

    /// Stable identifier used in configuration and serialized output
    pub const fn key(self) -> &'static str {
        match self {
            DeviationType::TrunkInclination => "trunk_inclination",
            DeviationType::ArmElevation => "arm_elevation",
            DeviationType::KneeFlexion => "knee_flexion",
        }
    }

    /// Human-readable description for reports
    pub const fn label(self) -> &'static str {
        match self {
            DeviationType::TrunkInclination => "Excessive trunk inclination",
            DeviationType::ArmElevation => "Arm raised above the shoulder",
            DeviationType::KneeFlexion => "Deep knee flexion",
        }
    }
}

impl fmt::Display for DeviationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Direction in which an angle violates its threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    LessThan,
    GreaterThan,
}

impl Comparison {
    pub fn holds(self, angle: f64, threshold: f64) -> bool {
        match self {
            Comparison::LessThan => angle < threshold,
            Comparison::GreaterThan => angle > threshold,
        }
    }
}

/// Point used as one corner of a measured angle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    Landmark(Landmark),
    /// Halfway between two landmarks (neck from shoulders, pelvis from hips)
    Midpoint(Landmark, Landmark),
}

impl Anchor {
    pub fn resolve(&self, skeleton: &Skeleton) -> Option<Point> {
        match *self {
            Anchor::Landmark(landmark) => skeleton.get(landmark),
            Anchor::Midpoint(a, b) => Some(skeleton.get(a)?.midpoint(skeleton.get(b)?)),
        }
    }

    /// Whether every detected skeleton can resolve this anchor
    pub fn is_always_present(&self) -> bool {
        match *self {
            Anchor::Landmark(landmark) => landmark.is_required(),
            Anchor::Midpoint(a, b) => a.is_required() && b.is_required(),
        }
    }
}

/// Angle measurement plus the threshold it is judged against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviationRule {
    /// Outer point, vertex, outer point
    pub anchors: [Anchor; 3],
    pub comparison: Comparison,
    pub threshold_degrees: f64,
}

impl DeviationRule {
    pub fn new(anchors: [Anchor; 3], comparison: Comparison, threshold_degrees: f64) -> Self {
        Self {
            anchors,
            comparison,
            threshold_degrees,
        }
    }

    /// Angle at the middle anchor, in degrees
    pub fn angle(&self, skeleton: &Skeleton) -> Option<f64> {
        let [a, vertex, c] = self.anchors;
        Some(Point::angle_at(
            a.resolve(skeleton)?,
            vertex.resolve(skeleton)?,
            c.resolve(skeleton)?,
        ))
    }

    /// Whether `angle` is a deviation under this rule
    pub fn is_violated(&self, angle: f64) -> bool {
        self.comparison.holds(angle, self.threshold_degrees)
    }
}
