//! Piecewise-linear interpolation.

use crate::interpolator::find_interval;
use crate::types::CORNER_WINDOW;

/// Piecewise-linear evaluator.
///
/// Derivatives at an interior knot are degenerate: the first derivative is
/// the mean of the adjacent segment slopes and the second derivative spreads
/// the slope jump over [`CORNER_WINDOW`], so a polyline corner reads as a
/// large finite curvature instead of a singularity.
#[derive(Debug, Clone)]
pub struct Linear {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl Linear {
    /// Invariants (strict monotonicity, matching lengths, >= 2 samples) are
    /// checked by [`Interpolator::build`](crate::Interpolator::build).
    pub(crate) fn new(xs: Vec<f64>, ys: Vec<f64>) -> Self {
        Self { xs, ys }
    }

    pub fn knots(&self) -> &[f64] {
        &self.xs
    }

    fn slope(&self, segment: usize) -> f64 {
        (self.ys[segment + 1] - self.ys[segment]) / (self.xs[segment + 1] - self.xs[segment])
    }

    /// Interior knot within half a corner window of `s`, if any.
    fn corner_at(&self, s: f64) -> Option<usize> {
        let i = find_interval(&self.xs, s);
        for knot in [i, i + 1] {
            if knot > 0
                && knot < self.xs.len() - 1
                && (s - self.xs[knot]).abs() <= CORNER_WINDOW / 2.0
            {
                return Some(knot);
            }
        }
        None
    }

    pub fn compute(&self, s: f64) -> f64 {
        let i = find_interval(&self.xs, s);
        self.ys[i] + self.slope(i) * (s - self.xs[i])
    }

    pub fn derivative(&self, s: f64) -> f64 {
        if let Some(knot) = self.corner_at(s) {
            return (self.slope(knot - 1) + self.slope(knot)) / 2.0;
        }
        self.slope(find_interval(&self.xs, s))
    }

    pub fn second_derivative(&self, s: f64) -> f64 {
        if let Some(knot) = self.corner_at(s) {
            return (self.slope(knot) - self.slope(knot - 1)) / CORNER_WINDOW;
        }
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interp() -> Linear {
        Linear::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 1.0])
    }

    #[test]
    fn computes_segment_values() {
        let li = interp();
        assert!((li.compute(0.5) - 0.5).abs() < 1e-12);
        assert!((li.compute(1.5) - 1.0).abs() < 1e-12);
        assert!((li.compute(0.0) - 0.0).abs() < 1e-12);
        assert!((li.compute(2.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn derivative_is_segment_slope_away_from_knots() {
        let li = interp();
        assert!((li.derivative(0.5) - 1.0).abs() < 1e-12);
        assert!((li.derivative(1.5) - 0.0).abs() < 1e-12);
        assert!(li.second_derivative(0.5).abs() < 1e-12);
    }

    #[test]
    fn corner_reports_averaged_slope_and_finite_jump() {
        let li = interp();
        assert!((li.derivative(1.0) - 0.5).abs() < 1e-12);
        let jump = li.second_derivative(1.0);
        assert!(jump.is_finite());
        assert!(jump.abs() > 100.0);
    }
}
