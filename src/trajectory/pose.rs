//! Orientation layer: a position curve plus a slerp'd quaternion channel.

use glam::{DQuat, EulerRot};

use crate::error::TrajectoryError;
use crate::interpolator::{InterpolatorKind, Slerp};
use crate::trajectory::{PointTrajectory, PointTrajectoryBuilder, restore_with};
use crate::types::{Point, Pose};

/// Arc-length-parameterized pose curve. Positions interpolate per axis,
/// orientations by spherical linear interpolation over the same basis set.
#[derive(Debug, Clone)]
pub struct PoseTrajectory {
    points: PointTrajectory,
    orientation: Slerp,
}

impl PoseTrajectory {
    pub fn builder() -> PoseTrajectoryBuilder {
        PoseTrajectoryBuilder::default()
    }

    pub fn length(&self) -> f64 {
        self.points.length()
    }

    /// Pose at window-relative arc length `s`.
    pub fn compute(&self, s: f64) -> Pose {
        self.compute_absolute(self.points.clamp(s))
    }

    pub(crate) fn compute_absolute(&self, s: f64) -> Pose {
        Pose::new(
            self.points.compute_absolute(s),
            self.orientation.compute(s),
        )
    }

    pub fn compute_many(&self, ss: &[f64]) -> Vec<Pose> {
        ss.iter().map(|&s| self.compute(s)).collect()
    }

    pub fn azimuth(&self, s: f64) -> f64 {
        self.points.azimuth(s)
    }

    pub fn azimuth_many(&self, ss: &[f64]) -> Vec<f64> {
        self.points.azimuth_many(ss)
    }

    pub fn elevation(&self, s: f64) -> f64 {
        self.points.elevation(s)
    }

    pub fn elevation_many(&self, ss: &[f64]) -> Vec<f64> {
        self.points.elevation_many(ss)
    }

    pub fn curvature(&self, s: f64) -> f64 {
        self.points.curvature(s)
    }

    pub fn curvature_many(&self, ss: &[f64]) -> Vec<f64> {
        self.points.curvature_many(ss)
    }

    pub fn crop(&mut self, start: f64, length: f64) {
        self.points.crop(start, length);
    }

    pub fn get_underlying_bases(&self) -> Vec<f64> {
        self.points.get_underlying_bases()
    }

    pub fn restore(&self, min_points: usize) -> Vec<Pose> {
        restore_with(
            &self.get_underlying_bases(),
            min_points,
            |s| self.compute(s),
            Pose::almost_same,
        )
    }

    pub fn base_arange(&self, tick: f64) -> Vec<f64> {
        self.points.base_arange(tick)
    }

    pub fn base_arange_interval(
        &self,
        interval: (f64, f64),
        tick: f64,
        end_inclusive: bool,
    ) -> Vec<f64> {
        self.points.base_arange_interval(interval, tick, end_inclusive)
    }

    pub fn crossings(&self, polyline: &[Point]) -> Vec<f64> {
        self.points.crossings(polyline)
    }

    /// Replace every orientation with one derived from the position curve:
    /// yaw from the planar tangent, pitch from the vertical tangent, zero
    /// roll. Running it twice yields the same result, since the position
    /// channels are untouched.
    pub fn align_orientation_with_trajectory_direction(&mut self) {
        let bases = self.points.bases().to_vec();
        let quaternions: Vec<DQuat> = bases
            .iter()
            .map(|&s| {
                let (dx, dy, dz) = self.points.direction_absolute(s);
                let yaw = dy.atan2(dx);
                let pitch = -dz.atan2(dx.hypot(dy));
                DQuat::from_euler(EulerRot::ZYX, yaw, pitch, 0.0)
            })
            .collect();
        self.orientation = Slerp::from_parts(bases, quaternions);
    }

    pub(crate) fn points(&self) -> &PointTrajectory {
        &self.points
    }

    pub(crate) fn points_mut(&mut self) -> &mut PointTrajectory {
        &mut self.points
    }
}

/// Builder for [`PoseTrajectory`]; position channels are configurable, the
/// orientation channel is always spherical linear.
#[derive(Debug, Clone, Default)]
pub struct PoseTrajectoryBuilder {
    points: PointTrajectoryBuilder,
}

impl PoseTrajectoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_xy_interpolator(mut self, kind: InterpolatorKind) -> Self {
        self.points = self.points.set_xy_interpolator(kind);
        self
    }

    pub fn set_z_interpolator(mut self, kind: InterpolatorKind) -> Self {
        self.points = self.points.set_z_interpolator(kind);
        self
    }

    pub fn build(self, poses: &[Pose]) -> Result<PoseTrajectory, TrajectoryError> {
        let positions: Vec<Point> = poses.iter().map(|p| p.position).collect();
        let points = self
            .points
            .build(&positions)
            .map_err(|e| e.in_channel("position"))?;

        let quaternions: Vec<DQuat> = poses.iter().map(|p| p.orientation).collect();
        let orientation = Slerp::build(points.bases().to_vec(), quaternions)
            .map_err(|e| TrajectoryError::from(e).in_channel("orientation"))?;

        Ok(PoseTrajectory {
            points,
            orientation,
        })
    }
}
