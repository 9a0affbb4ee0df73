//! Position layer: three scalar channels (x, y, z) over a shared basis set.

use crate::crossing;
use crate::error::TrajectoryError;
use crate::interpolator::{Interpolator, InterpolatorKind};
use crate::trajectory::{arange, crop_bases, restore_with};
use crate::types::{CLAMP_WARN_EPS, Point};

/// Arc-length-parameterized position curve with an active `[start, end]`
/// window inside its full underlying domain.
///
/// All public arc-length parameters are relative to the window start; the
/// window initially spans the whole domain, so before any [`crop`] they
/// coincide with absolute arc length from the first input point.
///
/// [`crop`]: PointTrajectory::crop
#[derive(Debug, Clone)]
pub struct PointTrajectory {
    x: Interpolator,
    y: Interpolator,
    z: Interpolator,
    /// Shared ordered basis set (absolute arc lengths).
    bases: Vec<f64>,
    start: f64,
    end: f64,
}

impl PointTrajectory {
    pub fn builder() -> PointTrajectoryBuilder {
        PointTrajectoryBuilder::default()
    }

    /// Length of the active window.
    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    /// Map a window-relative arc length into the absolute domain, clamping
    /// into the window. Overshoot beyond float noise is logged, never an
    /// error: dense query ladders routinely straddle the window by epsilon.
    pub(crate) fn clamp(&self, s: f64) -> f64 {
        let absolute = s + self.start;
        if absolute < self.start - CLAMP_WARN_EPS || absolute > self.end + CLAMP_WARN_EPS {
            tracing::warn!(
                s,
                window_length = self.end - self.start,
                "arc length outside the active window, clamping"
            );
        }
        absolute.clamp(self.start, self.end)
    }

    /// Position at window-relative arc length `s`.
    pub fn compute(&self, s: f64) -> Point {
        let s = self.clamp(s);
        self.compute_absolute(s)
    }

    /// Positions at each of `ss`, in order.
    pub fn compute_many(&self, ss: &[f64]) -> Vec<Point> {
        ss.iter().map(|&s| self.compute(s)).collect()
    }

    pub(crate) fn compute_absolute(&self, s: f64) -> Point {
        Point::new(self.x.compute(s), self.y.compute(s), self.z.compute(s))
    }

    /// Tangent components (dx/ds, dy/ds, dz/ds) at an absolute arc length.
    pub(crate) fn direction_absolute(&self, s: f64) -> (f64, f64, f64) {
        (
            self.x.derivative(s),
            self.y.derivative(s),
            self.z.derivative(s),
        )
    }

    /// Heading of the tangent in the x/y plane, radians.
    pub fn azimuth(&self, s: f64) -> f64 {
        let (dx, dy, _) = self.direction_absolute(self.clamp(s));
        dy.atan2(dx)
    }

    pub fn azimuth_many(&self, ss: &[f64]) -> Vec<f64> {
        ss.iter().map(|&s| self.azimuth(s)).collect()
    }

    /// Angle of the tangent against the x/y plane, radians.
    pub fn elevation(&self, s: f64) -> f64 {
        let (dx, dy, dz) = self.direction_absolute(self.clamp(s));
        dz.atan2(dx.hypot(dy))
    }

    pub fn elevation_many(&self, ss: &[f64]) -> Vec<f64> {
        ss.iter().map(|&s| self.elevation(s)).collect()
    }

    /// Planar curvature from first and second derivatives of x(s), y(s).
    /// A stationary point (vanishing tangent) reads as 0, never NaN.
    pub fn curvature(&self, s: f64) -> f64 {
        let s = self.clamp(s);
        let dx = self.x.derivative(s);
        let dy = self.y.derivative(s);
        let ddx = self.x.second_derivative(s);
        let ddy = self.y.second_derivative(s);
        let denominator = (dx * dx + dy * dy).powf(1.5);
        if denominator < 1e-12 {
            return 0.0;
        }
        let curvature = (dx * ddy - dy * ddx) / denominator;
        if curvature.is_finite() { curvature } else { 0.0 }
    }

    pub fn curvature_many(&self, ss: &[f64]) -> Vec<f64> {
        ss.iter().map(|&s| self.curvature(s)).collect()
    }

    /// Shrink the active window to `[start, start + length]`, intersected
    /// with the current window. Channel data is untouched, so the original
    /// extent stays recoverable.
    pub fn crop(&mut self, start: f64, length: f64) {
        let new_start = (self.start + start.max(0.0)).min(self.end);
        let new_end = (new_start + length.max(0.0)).min(self.end);
        self.start = new_start;
        self.end = new_end;
    }

    /// Underlying bases restricted to the active window, shifted so the
    /// window start maps to 0.
    pub fn get_underlying_bases(&self) -> Vec<f64> {
        let mut bases = crop_bases(&self.bases, self.start, self.end);
        for s in &mut bases {
            *s -= self.start;
        }
        bases
    }

    /// Resample the window at its underlying bases, dropping near-duplicate
    /// points; best-effort densification up to `min_points`.
    pub fn restore(&self, min_points: usize) -> Vec<Point> {
        restore_with(
            &self.get_underlying_bases(),
            min_points,
            |s| self.compute(s),
            Point::almost_same,
        )
    }

    /// Sample ladder over the whole window with step `tick`; the window end
    /// is always included exactly once.
    pub fn base_arange(&self, tick: f64) -> Vec<f64> {
        arange(0.0, self.length(), tick, true)
    }

    /// Sample ladder over `interval` intersected with the window.
    pub fn base_arange_interval(
        &self,
        interval: (f64, f64),
        tick: f64,
        end_inclusive: bool,
    ) -> Vec<f64> {
        let start = interval.0.max(0.0);
        let end = interval.1.min(self.length());
        arange(start, end, tick, end_inclusive)
    }

    /// Window-relative arc lengths at which the position curve crosses the
    /// polyline, ordered ascending; empty when there is no crossing.
    pub fn crossings(&self, polyline: &[Point]) -> Vec<f64> {
        crossing::crossings(self, polyline)
    }

    pub(crate) fn bases(&self) -> &[f64] {
        &self.bases
    }

    pub(crate) fn bases_mut(&mut self) -> &mut Vec<f64> {
        &mut self.bases
    }

    pub(crate) fn window(&self) -> (f64, f64) {
        (self.start, self.end)
    }
}

/// Builder for [`PointTrajectory`]; selects per-channel interpolator
/// variants before the terminal [`build`](PointTrajectoryBuilder::build).
#[derive(Debug, Clone, Default)]
pub struct PointTrajectoryBuilder {
    xy: Option<InterpolatorKind>,
    z: Option<InterpolatorKind>,
}

impl PointTrajectoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `kind` for both the x and y channels. Without an explicit choice
    /// the builder is degree-aware: cubic spline for >= 4 points, linear
    /// below that.
    pub fn set_xy_interpolator(mut self, kind: InterpolatorKind) -> Self {
        self.xy = Some(kind);
        self
    }

    /// Use `kind` for the z channel (default: linear).
    pub fn set_z_interpolator(mut self, kind: InterpolatorKind) -> Self {
        self.z = Some(kind);
        self
    }

    /// Build atomically: either every axis channel builds and the trajectory
    /// is returned, or the first failing axis is reported by name.
    pub fn build(self, points: &[Point]) -> Result<PointTrajectory, TrajectoryError> {
        let bases = arc_lengths(points)?;
        let xy_kind = self.xy.unwrap_or(if points.len() >= 4 {
            InterpolatorKind::CubicSpline
        } else {
            InterpolatorKind::Linear
        });
        let z_kind = self.z.unwrap_or(InterpolatorKind::Linear);

        let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
        let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
        let zs: Vec<f64> = points.iter().map(|p| p.z).collect();

        let x = Interpolator::build(xy_kind, bases.clone(), xs)
            .map_err(|e| TrajectoryError::from(e).in_channel("x"))?;
        let y = Interpolator::build(xy_kind, bases.clone(), ys)
            .map_err(|e| TrajectoryError::from(e).in_channel("y"))?;
        let z = Interpolator::build(z_kind, bases.clone(), zs)
            .map_err(|e| TrajectoryError::from(e).in_channel("z"))?;

        let start = bases[0];
        let end = bases[bases.len() - 1];
        Ok(PointTrajectory {
            x,
            y,
            z,
            bases,
            start,
            end,
        })
    }
}

/// Cumulative Euclidean arc length of the input points, starting at 0.
///
/// A zero-length segment (coincident consecutive points) is rejected as
/// non-monotonic rather than deduplicated, so the caller's sample count is
/// never silently changed.
pub(crate) fn arc_lengths(points: &[Point]) -> Result<Vec<f64>, TrajectoryError> {
    use crate::error::InterpolationError;

    if points.is_empty() {
        return Err(InterpolationError::EmptyInput.into());
    }
    let mut bases = Vec::with_capacity(points.len());
    bases.push(0.0);
    for i in 1..points.len() {
        let next = bases[i - 1] + points[i - 1].distance(&points[i]);
        if next <= bases[i - 1] {
            return Err(InterpolationError::NonMonotonicBases { index: i }.into());
        }
        bases.push(next);
    }
    Ok(bases)
}
