//! Kinematics layer: a pose curve plus three scalar kinematic channels.

use crate::error::TrajectoryError;
use crate::interpolated_array::InterpolatedArray;
use crate::interpolator::InterpolatorKind;
use crate::trajectory::{PoseTrajectory, PoseTrajectoryBuilder, merge_bases, restore_with};
use crate::types::{PathPoint, Point};

/// Arc-length-parameterized path: a pose curve with longitudinal velocity,
/// lateral velocity, and heading rate channels over the same basis set.
///
/// Kinematic channels are stairstep by default, so a range edit via
/// [`ChannelMut`] produces an exact discontinuity instead of a ramp, and the
/// knots the edit introduces join the shared basis set so that
/// [`restore`](PathPointTrajectory::restore) keeps both sides of the step.
#[derive(Debug, Clone)]
pub struct PathPointTrajectory {
    pose: PoseTrajectory,
    longitudinal_velocity_mps: InterpolatedArray,
    lateral_velocity_mps: InterpolatedArray,
    heading_rate_rps: InterpolatedArray,
}

impl PathPointTrajectory {
    pub fn builder() -> PathPointTrajectoryBuilder {
        PathPointTrajectoryBuilder::default()
    }

    pub fn length(&self) -> f64 {
        self.pose.length()
    }

    /// Path sample at window-relative arc length `s`. Kinematic values are
    /// narrowed back to f32 on the way out.
    pub fn compute(&self, s: f64) -> PathPoint {
        let s = self.pose.points().clamp(s);
        PathPoint {
            pose: self.pose.compute_absolute(s),
            longitudinal_velocity_mps: self.longitudinal_velocity_mps.compute(s) as f32,
            lateral_velocity_mps: self.lateral_velocity_mps.compute(s) as f32,
            heading_rate_rps: self.heading_rate_rps.compute(s) as f32,
        }
    }

    pub fn compute_many(&self, ss: &[f64]) -> Vec<PathPoint> {
        ss.iter().map(|&s| self.compute(s)).collect()
    }

    pub fn azimuth(&self, s: f64) -> f64 {
        self.pose.azimuth(s)
    }

    pub fn azimuth_many(&self, ss: &[f64]) -> Vec<f64> {
        self.pose.azimuth_many(ss)
    }

    pub fn elevation(&self, s: f64) -> f64 {
        self.pose.elevation(s)
    }

    pub fn elevation_many(&self, ss: &[f64]) -> Vec<f64> {
        self.pose.elevation_many(ss)
    }

    pub fn curvature(&self, s: f64) -> f64 {
        self.pose.curvature(s)
    }

    pub fn curvature_many(&self, ss: &[f64]) -> Vec<f64> {
        self.pose.curvature_many(ss)
    }

    pub fn crop(&mut self, start: f64, length: f64) {
        self.pose.crop(start, length);
    }

    pub fn get_underlying_bases(&self) -> Vec<f64> {
        self.pose.get_underlying_bases()
    }

    pub fn restore(&self, min_points: usize) -> Vec<PathPoint> {
        restore_with(
            &self.get_underlying_bases(),
            min_points,
            |s| self.compute(s),
            PathPoint::almost_same,
        )
    }

    pub fn base_arange(&self, tick: f64) -> Vec<f64> {
        self.pose.base_arange(tick)
    }

    pub fn base_arange_interval(
        &self,
        interval: (f64, f64),
        tick: f64,
        end_inclusive: bool,
    ) -> Vec<f64> {
        self.pose.base_arange_interval(interval, tick, end_inclusive)
    }

    pub fn crossings(&self, polyline: &[Point]) -> Vec<f64> {
        self.pose.crossings(polyline)
    }

    pub fn align_orientation_with_trajectory_direction(&mut self) {
        self.pose.align_orientation_with_trajectory_direction();
    }

    /// Mutable handle on the longitudinal velocity channel.
    pub fn longitudinal_velocity_mps(&mut self) -> ChannelMut<'_> {
        let (start, end) = self.pose.points().window();
        ChannelMut {
            array: &mut self.longitudinal_velocity_mps,
            bases: self.pose.points_mut().bases_mut(),
            start,
            end,
        }
    }

    /// Mutable handle on the lateral velocity channel.
    pub fn lateral_velocity_mps(&mut self) -> ChannelMut<'_> {
        let (start, end) = self.pose.points().window();
        ChannelMut {
            array: &mut self.lateral_velocity_mps,
            bases: self.pose.points_mut().bases_mut(),
            start,
            end,
        }
    }

    /// Mutable handle on the heading rate channel.
    pub fn heading_rate_rps(&mut self) -> ChannelMut<'_> {
        let (start, end) = self.pose.points().window();
        ChannelMut {
            array: &mut self.heading_rate_rps,
            bases: self.pose.points_mut().bases_mut(),
            start,
            end,
        }
    }
}

/// A mutable view of one kinematic channel, scoped to the owning
/// trajectory's active window.
pub struct ChannelMut<'a> {
    array: &'a mut InterpolatedArray,
    bases: &'a mut Vec<f64>,
    start: f64,
    end: f64,
}

impl<'a> ChannelMut<'a> {
    /// Select the window-relative sub-range `[from, to]` for editing.
    /// Out-of-window bounds are clamped; an inverted or non-finite range is
    /// an error.
    pub fn range(self, from: f64, to: f64) -> Result<RangeMut<'a>, TrajectoryError> {
        if !from.is_finite() || !to.is_finite() || from > to {
            return Err(TrajectoryError::InvalidRange { from, to });
        }
        Ok(RangeMut {
            from: (from + self.start).clamp(self.start, self.end),
            to: (to + self.start).clamp(self.start, self.end),
            array: self.array,
            bases: self.bases,
        })
    }
}

/// A selected sub-range of one kinematic channel, ready to be overwritten.
#[derive(Debug)]
pub struct RangeMut<'a> {
    array: &'a mut InterpolatedArray,
    bases: &'a mut Vec<f64>,
    from: f64,
    to: f64,
}

impl RangeMut<'_> {
    /// Overwrite the range with a constant. Knots the edit introduces are
    /// merged into the trajectory's shared basis set.
    pub fn set(self, value: f32) -> Result<(), TrajectoryError> {
        self.array.set_range(self.from, self.to, f64::from(value))?;
        merge_bases(self.bases, self.array.knots());
        Ok(())
    }
}

/// Builder for [`PathPointTrajectory`].
#[derive(Debug, Clone, Default)]
pub struct PathPointTrajectoryBuilder {
    pose: PoseTrajectoryBuilder,
    longitudinal_velocity: Option<InterpolatorKind>,
    lateral_velocity: Option<InterpolatorKind>,
    heading_rate: Option<InterpolatorKind>,
}

impl PathPointTrajectoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_xy_interpolator(mut self, kind: InterpolatorKind) -> Self {
        self.pose = self.pose.set_xy_interpolator(kind);
        self
    }

    pub fn set_z_interpolator(mut self, kind: InterpolatorKind) -> Self {
        self.pose = self.pose.set_z_interpolator(kind);
        self
    }

    pub fn set_longitudinal_velocity_interpolator(mut self, kind: InterpolatorKind) -> Self {
        self.longitudinal_velocity = Some(kind);
        self
    }

    pub fn set_lateral_velocity_interpolator(mut self, kind: InterpolatorKind) -> Self {
        self.lateral_velocity = Some(kind);
        self
    }

    pub fn set_heading_rate_interpolator(mut self, kind: InterpolatorKind) -> Self {
        self.heading_rate = Some(kind);
        self
    }

    /// Build atomically: the pose layers first, then each kinematic channel,
    /// with every failure wrapped in the channel's name.
    pub fn build(self, points: &[PathPoint]) -> Result<PathPointTrajectory, TrajectoryError> {
        let poses: Vec<_> = points.iter().map(|p| p.pose).collect();
        let mut pose = self
            .pose
            .build(&poses)
            .map_err(|e| e.in_channel("pose"))?;

        let build_channel = |kind: Option<InterpolatorKind>,
                             name: &'static str,
                             values: Vec<f64>|
         -> Result<InterpolatedArray, TrajectoryError> {
            InterpolatedArray::build(
                kind.unwrap_or(InterpolatorKind::Stairstep),
                pose.points().bases(),
                values,
            )
            .map_err(|e| TrajectoryError::from(e).in_channel(name))
        };

        let longitudinal_velocity_mps = build_channel(
            self.longitudinal_velocity,
            "longitudinal_velocity_mps",
            points
                .iter()
                .map(|p| f64::from(p.longitudinal_velocity_mps))
                .collect(),
        )?;
        let lateral_velocity_mps = build_channel(
            self.lateral_velocity,
            "lateral_velocity_mps",
            points
                .iter()
                .map(|p| f64::from(p.lateral_velocity_mps))
                .collect(),
        )?;
        let heading_rate_rps = build_channel(
            self.heading_rate,
            "heading_rate_rps",
            points
                .iter()
                .map(|p| f64::from(p.heading_rate_rps))
                .collect(),
        )?;

        // Stairstep channels introduce step knots at build time; fold them
        // into the shared basis set up front.
        for array in [
            &longitudinal_velocity_mps,
            &lateral_velocity_mps,
            &heading_rate_rps,
        ] {
            merge_bases(pose.points_mut().bases_mut(), array.knots());
        }

        Ok(PathPointTrajectory {
            pose,
            longitudinal_velocity_mps,
            lateral_velocity_mps,
            heading_rate_rps,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Pose, STEP_BACKOFF};

    fn straight_path(n: usize, velocity: f32) -> Vec<PathPoint> {
        (0..n)
            .map(|i| PathPoint {
                pose: Pose::new(Point::new(i as f64, 0.0, 0.0), Default::default()),
                longitudinal_velocity_mps: velocity,
                lateral_velocity_mps: 0.0,
                heading_rate_rps: 0.0,
            })
            .collect()
    }

    #[test]
    fn compute_carries_kinematics() {
        let trajectory = PathPointTrajectory::builder()
            .build(&straight_path(5, 3.0))
            .unwrap();
        let p = trajectory.compute(2.5);
        assert!((p.pose.position.x - 2.5).abs() < 1e-9);
        assert_eq!(p.longitudinal_velocity_mps, 3.0);
    }

    #[test]
    fn range_set_creates_exact_discontinuity() {
        let mut trajectory = PathPointTrajectory::builder()
            .build(&straight_path(5, 8.0))
            .unwrap();
        trajectory
            .longitudinal_velocity_mps()
            .range(1.0, 3.0)
            .unwrap()
            .set(0.0)
            .unwrap();

        assert_eq!(trajectory.compute(0.5).longitudinal_velocity_mps, 8.0);
        assert_eq!(
            trajectory.compute(1.0 - 2.0 * STEP_BACKOFF).longitudinal_velocity_mps,
            8.0
        );
        assert_eq!(trajectory.compute(1.0).longitudinal_velocity_mps, 0.0);
        assert_eq!(trajectory.compute(2.0).longitudinal_velocity_mps, 0.0);
        assert_eq!(trajectory.compute(3.0).longitudinal_velocity_mps, 0.0);
        // Zero-order hold: the edited value persists until the next knot.
        assert_eq!(trajectory.compute(3.5).longitudinal_velocity_mps, 0.0);
        assert_eq!(trajectory.compute(4.0).longitudinal_velocity_mps, 8.0);

        // The edit boundaries are exact members of the underlying basis set.
        let bases = trajectory.get_underlying_bases();
        assert!(bases.iter().any(|&s| (s - 1.0).abs() < 1e-12));
        assert!(bases.iter().any(|&s| (s - 3.0).abs() < 1e-12));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let mut trajectory = PathPointTrajectory::builder()
            .build(&straight_path(5, 1.0))
            .unwrap();
        let err = trajectory
            .heading_rate_rps()
            .range(2.0, 1.0)
            .unwrap_err();
        assert!(matches!(err, TrajectoryError::InvalidRange { .. }));
    }

    #[test]
    fn restore_keeps_both_sides_of_a_step() {
        let mut trajectory = PathPointTrajectory::builder()
            .build(&straight_path(5, 5.0))
            .unwrap();
        trajectory
            .longitudinal_velocity_mps()
            .range(2.0, 4.0)
            .unwrap()
            .set(1.0)
            .unwrap();

        let restored = trajectory.restore(4);
        let step = restored
            .windows(2)
            .find(|w| w[0].longitudinal_velocity_mps != w[1].longitudinal_velocity_mps);
        let step = step.expect("restored samples must straddle the step");
        assert_eq!(step[0].longitudinal_velocity_mps, 5.0);
        assert_eq!(step[1].longitudinal_velocity_mps, 1.0);
    }
}
