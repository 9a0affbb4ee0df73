//! Scalar interpolators over a strictly increasing knot set.
//!
//! Each variant turns `(bases, values)` into a closed-form evaluator of value
//! and first/second derivative at any in-range parameter, or fails explaining
//! why. Callers are expected to clamp queries into the knot range; evaluation
//! outside it extrapolates from the boundary segment.

mod cubic_spline;
mod linear;
mod slerp;
mod stairstep;

pub use cubic_spline::CubicSpline;
pub use linear::Linear;
pub use slerp::Slerp;
pub use stairstep::Stairstep;

use serde::{Deserialize, Serialize};

use crate::error::InterpolationError;

/// Interpolation variant selected per channel at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterpolatorKind {
    /// Piecewise linear. C0.
    Linear,
    /// Natural cubic spline. C2.
    CubicSpline,
    /// Piecewise constant, holding the value of the last knot at or before
    /// the query; encodes step instants as exact knots.
    Stairstep,
}

impl InterpolatorKind {
    pub fn minimum_samples(self) -> usize {
        match self {
            InterpolatorKind::CubicSpline => 4,
            InterpolatorKind::Linear | InterpolatorKind::Stairstep => 2,
        }
    }

    pub(crate) fn name(self) -> &'static str {
        match self {
            InterpolatorKind::Linear => "linear",
            InterpolatorKind::CubicSpline => "cubic-spline",
            InterpolatorKind::Stairstep => "stairstep",
        }
    }
}

/// A built scalar interpolator.
#[derive(Debug, Clone)]
pub enum Interpolator {
    Linear(Linear),
    CubicSpline(CubicSpline),
    Stairstep(Stairstep),
}

impl Interpolator {
    /// Build the chosen variant over `bases`/`values`.
    ///
    /// Fails on empty input, too few samples for the variant, a bases/values
    /// length mismatch, or bases that are not strictly increasing.
    pub fn build(
        kind: InterpolatorKind,
        bases: Vec<f64>,
        values: Vec<f64>,
    ) -> Result<Self, InterpolationError> {
        validate(kind.name(), kind.minimum_samples(), &bases, values.len())?;
        Ok(match kind {
            InterpolatorKind::Linear => Interpolator::Linear(Linear::new(bases, values)),
            InterpolatorKind::CubicSpline => {
                Interpolator::CubicSpline(CubicSpline::new(bases, values))
            }
            InterpolatorKind::Stairstep => {
                Interpolator::Stairstep(Stairstep::new(bases, values))
            }
        })
    }

    pub fn kind(&self) -> InterpolatorKind {
        match self {
            Interpolator::Linear(_) => InterpolatorKind::Linear,
            Interpolator::CubicSpline(_) => InterpolatorKind::CubicSpline,
            Interpolator::Stairstep(_) => InterpolatorKind::Stairstep,
        }
    }

    /// The knot set this interpolator is defined over. For stairstep this
    /// includes the knots inserted to encode step instants.
    pub fn knots(&self) -> &[f64] {
        match self {
            Interpolator::Linear(i) => i.knots(),
            Interpolator::CubicSpline(i) => i.knots(),
            Interpolator::Stairstep(i) => i.knots(),
        }
    }

    pub fn compute(&self, s: f64) -> f64 {
        match self {
            Interpolator::Linear(i) => i.compute(s),
            Interpolator::CubicSpline(i) => i.compute(s),
            Interpolator::Stairstep(i) => i.compute(s),
        }
    }

    pub fn derivative(&self, s: f64) -> f64 {
        match self {
            Interpolator::Linear(i) => i.derivative(s),
            Interpolator::CubicSpline(i) => i.derivative(s),
            Interpolator::Stairstep(_) => 0.0,
        }
    }

    pub fn second_derivative(&self, s: f64) -> f64 {
        match self {
            Interpolator::Linear(i) => i.second_derivative(s),
            Interpolator::CubicSpline(i) => i.second_derivative(s),
            Interpolator::Stairstep(_) => 0.0,
        }
    }
}

/// Shared build-time validation.
pub(crate) fn validate(
    interpolator: &'static str,
    min: usize,
    bases: &[f64],
    values_len: usize,
) -> Result<(), InterpolationError> {
    if bases.is_empty() && values_len == 0 {
        return Err(InterpolationError::EmptyInput);
    }
    if bases.len() != values_len {
        return Err(InterpolationError::LengthMismatch {
            bases: bases.len(),
            values: values_len,
        });
    }
    if bases.len() < min {
        return Err(InterpolationError::InsufficientSamples {
            interpolator,
            min,
            got: bases.len(),
        });
    }
    for i in 1..bases.len() {
        if bases[i] <= bases[i - 1] {
            return Err(InterpolationError::NonMonotonicBases { index: i });
        }
    }
    Ok(())
}

/// Index `i` such that `xs[i] <= x < xs[i + 1]`, clamped to the valid segment
/// range so boundary queries land on the nearest segment.
pub(crate) fn find_interval(xs: &[f64], x: f64) -> usize {
    debug_assert!(xs.len() >= 2);
    if x <= xs[0] {
        return 0;
    }
    let n = xs.len();
    if x >= xs[n - 1] {
        return n - 2;
    }
    xs.partition_point(|&knot| knot <= x).saturating_sub(1).min(n - 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_bad_input() {
        assert_eq!(
            validate("linear", 2, &[], 0),
            Err(InterpolationError::EmptyInput)
        );
        assert_eq!(
            validate("linear", 2, &[0.0, 1.0], 3),
            Err(InterpolationError::LengthMismatch { bases: 2, values: 3 })
        );
        assert_eq!(
            validate("cubic-spline", 4, &[0.0, 1.0, 2.0], 3),
            Err(InterpolationError::InsufficientSamples {
                interpolator: "cubic-spline",
                min: 4,
                got: 3
            })
        );
        assert_eq!(
            validate("linear", 2, &[0.0, 1.0, 1.0], 3),
            Err(InterpolationError::NonMonotonicBases { index: 2 })
        );
    }

    #[test]
    fn find_interval_brackets_and_clamps() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        assert_eq!(find_interval(&xs, -0.5), 0);
        assert_eq!(find_interval(&xs, 0.5), 0);
        assert_eq!(find_interval(&xs, 1.0), 1);
        assert_eq!(find_interval(&xs, 2.9), 2);
        assert_eq!(find_interval(&xs, 3.0), 2);
        assert_eq!(find_interval(&xs, 9.0), 2);
    }
}
