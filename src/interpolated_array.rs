//! A scalar channel backed by one interpolator, supporting sub-range edits.

use crate::error::InterpolationError;
use crate::interpolator::{Interpolator, InterpolatorKind};
use crate::types::BASE_EPS;

/// One interpolatable scalar channel tied to a shared basis set.
///
/// Knots introduced by the wrapped interpolator (stairstep step instants,
/// range-edit boundaries) surface through [`knots`](InterpolatedArray::knots)
/// after every mutating operation; the owning trajectory merges them into its
/// shared basis set so discretization never smooths over an edit.
#[derive(Debug, Clone)]
pub struct InterpolatedArray {
    interpolator: Interpolator,
}

impl InterpolatedArray {
    pub fn build(
        kind: InterpolatorKind,
        bases: &[f64],
        values: Vec<f64>,
    ) -> Result<Self, InterpolationError> {
        Ok(Self {
            interpolator: Interpolator::build(kind, bases.to_vec(), values)?,
        })
    }

    pub fn kind(&self) -> InterpolatorKind {
        self.interpolator.kind()
    }

    /// The channel's knot set, including interpolator-introduced knots.
    pub fn knots(&self) -> &[f64] {
        self.interpolator.knots()
    }

    pub fn compute(&self, s: f64) -> f64 {
        self.interpolator.compute(s)
    }

    /// Rewrite the channel to the constant `value` across `[from, to]`
    /// (absolute arc lengths, already clamped into the domain by the caller).
    ///
    /// The backing values are re-derived at the current knots, the range
    /// boundaries are pinned as knots, the constant is assigned inside the
    /// range, and the interpolator is rebuilt over that knot set.
    pub fn set_range(
        &mut self,
        from: f64,
        to: f64,
        value: f64,
    ) -> Result<(), InterpolationError> {
        let mut xs = self.interpolator.knots().to_vec();
        let mut ys: Vec<f64> = xs.iter().map(|&s| self.interpolator.compute(s)).collect();

        for boundary in [from, to] {
            pin_knot(&mut xs, &mut ys, boundary, &self.interpolator);
        }
        for (x, y) in xs.iter().zip(ys.iter_mut()) {
            if *x >= from - BASE_EPS && *x <= to + BASE_EPS {
                *y = value;
            }
        }

        self.interpolator = Interpolator::build(self.interpolator.kind(), xs, ys)?;
        Ok(())
    }
}

/// Insert `x` as a knot with its current interpolated value, unless an equal
/// knot already exists.
fn pin_knot(xs: &mut Vec<f64>, ys: &mut Vec<f64>, x: f64, interpolator: &Interpolator) {
    match xs.binary_search_by(|knot| knot.total_cmp(&x)) {
        Ok(_) => {}
        Err(idx) => {
            let duplicate = (idx > 0 && (x - xs[idx - 1]).abs() <= BASE_EPS)
                || (idx < xs.len() && (xs[idx] - x).abs() <= BASE_EPS);
            if !duplicate {
                xs.insert(idx, x);
                ys.insert(idx, interpolator.compute(x));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::STEP_BACKOFF;

    fn channel() -> InterpolatedArray {
        InterpolatedArray::build(
            InterpolatorKind::Stairstep,
            &[0.0, 1.0, 2.0, 3.0],
            vec![2.0, 2.0, 2.0, 2.0],
        )
        .unwrap()
    }

    #[test]
    fn set_range_overwrites_and_pins_boundaries() {
        let mut ch = channel();
        ch.set_range(1.5, 3.0, 0.0).unwrap();

        assert_eq!(ch.compute(1.0), 2.0);
        assert_eq!(ch.compute(1.5), 0.0);
        assert_eq!(ch.compute(2.5), 0.0);
        // The edit boundary is an exact knot, preceded by a step knot
        // carrying the old value.
        assert!(ch.knots().iter().any(|&k| (k - 1.5).abs() < 1e-12));
        let pre = 1.5 - STEP_BACKOFF;
        assert!(ch.knots().iter().any(|&k| (k - pre).abs() < 1e-12));
        assert_eq!(ch.compute(pre), 2.0);
    }

    #[test]
    fn set_range_is_idempotent_on_knots() {
        let mut ch = channel();
        ch.set_range(1.5, 3.0, 0.0).unwrap();
        let first = ch.knots().to_vec();
        ch.set_range(1.5, 3.0, 0.0).unwrap();
        assert_eq!(ch.knots(), first.as_slice());
    }

    #[test]
    fn linear_channel_keeps_knot_count() {
        let mut ch = InterpolatedArray::build(
            InterpolatorKind::Linear,
            &[0.0, 1.0, 2.0],
            vec![0.0, 1.0, 2.0],
        )
        .unwrap();
        ch.set_range(0.5, 1.5, 9.0).unwrap();
        assert_eq!(ch.knots().len(), 5);
        assert_eq!(ch.compute(1.0), 9.0);
        assert!((ch.compute(0.0) - 0.0).abs() < 1e-12);
        assert!((ch.compute(2.0) - 2.0).abs() < 1e-12);
    }
}
