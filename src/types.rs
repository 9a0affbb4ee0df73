//! Ingress point-sequence schema and numeric policy constants.
//!
//! The three record types mirror the layered trajectory model: a bare spatial
//! sample, a sample with orientation, and a full path sample carrying
//! kinematics. Positions are f64; kinematic fields are f32 on the wire and
//! widened to f64 for internal computation.

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

/// Two samples closer than this (meters) are collapsed when discretizing.
pub const ALMOST_SAME_DIST_M: f64 = 1e-3;

/// Componentwise tolerance for treating two orientations as equal.
pub const ORIENTATION_EPS: f64 = 1e-6;

/// Tolerance for treating two kinematic values as equal.
pub const KINEMATIC_EPS: f32 = 1e-6;

/// Arc-length backoff for the knot a stairstep interpolator inserts just
/// before a value change.
pub const STEP_BACKOFF: f64 = 1e-4;

/// Arc-length width over which a slope discontinuity of a piecewise-linear
/// channel is treated as a fillet when differentiating twice.
pub const CORNER_WINDOW: f64 = 1e-3;

/// Float-noise tolerance for basis comparisons (merge, ladder endpoints).
pub const BASE_EPS: f64 = 1e-9;

/// Overshoot beyond the active window that is clamped silently; anything
/// larger is clamped with a warning.
pub const CLAMP_WARN_EPS: f64 = 1e-7;

/// A spatial sample.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn to_dvec3(self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }

    pub fn from_dvec3(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point) -> f64 {
        self.to_dvec3().distance(other.to_dvec3())
    }

    pub(crate) fn almost_same(&self, other: &Point) -> bool {
        self.distance(other) < ALMOST_SAME_DIST_M
    }
}

/// A spatial sample with orientation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub position: Point,
    /// Unit quaternion, identity when the input carries no orientation.
    pub orientation: DQuat,
}

impl Pose {
    pub const fn new(position: Point, orientation: DQuat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    pub(crate) fn almost_same(&self, other: &Pose) -> bool {
        self.position.almost_same(&other.position)
            && (self.orientation.x - other.orientation.x).abs() < ORIENTATION_EPS
            && (self.orientation.y - other.orientation.y).abs() < ORIENTATION_EPS
            && (self.orientation.z - other.orientation.z).abs() < ORIENTATION_EPS
            && (self.orientation.w - other.orientation.w).abs() < ORIENTATION_EPS
    }
}

/// A full path sample: pose plus kinematic attributes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PathPoint {
    pub pose: Pose,
    pub longitudinal_velocity_mps: f32,
    pub lateral_velocity_mps: f32,
    pub heading_rate_rps: f32,
}

impl PathPoint {
    pub(crate) fn almost_same(&self, other: &PathPoint) -> bool {
        self.pose.almost_same(&other.pose)
            && (self.longitudinal_velocity_mps - other.longitudinal_velocity_mps).abs()
                < KINEMATIC_EPS
            && (self.lateral_velocity_mps - other.lateral_velocity_mps).abs() < KINEMATIC_EPS
            && (self.heading_rate_rps - other.heading_rate_rps).abs() < KINEMATIC_EPS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Point::new(0.0, 0.0, 0.0);
        let b = Point::new(3.0, 4.0, 0.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn almost_same_respects_threshold() {
        let a = Point::new(0.0, 0.0, 0.0);
        let near = Point::new(ALMOST_SAME_DIST_M / 2.0, 0.0, 0.0);
        let far = Point::new(ALMOST_SAME_DIST_M * 2.0, 0.0, 0.0);
        assert!(a.almost_same(&near));
        assert!(!a.almost_same(&far));
    }

    #[test]
    fn path_point_almost_same_compares_kinematics() {
        let a = PathPoint {
            longitudinal_velocity_mps: 1.0,
            ..PathPoint::default()
        };
        let b = PathPoint {
            longitudinal_velocity_mps: 0.0,
            ..PathPoint::default()
        };
        // Same pose, different velocity: must not collapse.
        assert!(!a.almost_same(&b));
    }
}
