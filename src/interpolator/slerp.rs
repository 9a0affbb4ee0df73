//! Piecewise spherical-linear quaternion interpolation.

use glam::DQuat;

use crate::error::InterpolationError;
use crate::interpolator::{find_interval, validate};

/// Orientation channel: slerp between the bracketing knot quaternions.
#[derive(Debug, Clone)]
pub struct Slerp {
    xs: Vec<f64>,
    qs: Vec<DQuat>,
}

impl Slerp {
    pub fn build(bases: Vec<f64>, quaternions: Vec<DQuat>) -> Result<Self, InterpolationError> {
        validate("spherical-linear", 2, &bases, quaternions.len())?;
        Ok(Self::from_parts(bases, quaternions))
    }

    /// Construct from knots already known to satisfy the build invariants.
    pub(crate) fn from_parts(xs: Vec<f64>, qs: Vec<DQuat>) -> Self {
        Self { xs, qs }
    }

    pub fn knots(&self) -> &[f64] {
        &self.xs
    }

    pub fn compute(&self, s: f64) -> DQuat {
        let i = find_interval(&self.xs, s);
        let t = ((s - self.xs[i]) / (self.xs[i + 1] - self.xs[i])).clamp(0.0, 1.0);
        self.qs[i].slerp(self.qs[i + 1], t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn slerps_between_knots() {
        let q0 = DQuat::IDENTITY;
        let q1 = DQuat::from_rotation_z(FRAC_PI_2);
        let sl = Slerp::build(vec![0.0, 1.0], vec![q0, q1]).unwrap();

        let mid = sl.compute(0.5);
        let expected = DQuat::from_rotation_z(FRAC_PI_2 / 2.0);
        assert!(mid.dot(expected).abs() > 1.0 - 1e-9);
        // Endpoint queries clamp.
        assert!(sl.compute(-0.1).dot(q0).abs() > 1.0 - 1e-9);
        assert!(sl.compute(1.1).dot(q1).abs() > 1.0 - 1e-9);
    }

    #[test]
    fn build_rejects_single_sample() {
        let err = Slerp::build(vec![0.0], vec![DQuat::IDENTITY]).unwrap_err();
        assert!(matches!(err, InterpolationError::InsufficientSamples { .. }));
    }
}
