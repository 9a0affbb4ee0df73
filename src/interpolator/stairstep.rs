//! Piecewise-constant (stairstep) interpolation.

use crate::types::{BASE_EPS, STEP_BACKOFF};

/// Piecewise-constant evaluator holding the value of the last knot at or
/// before the query.
///
/// Where the value changes between consecutive knots, an extra knot is
/// inserted [`STEP_BACKOFF`] before the change, carrying the previous value.
/// Discretizing over the augmented knot set therefore reproduces the step
/// exactly instead of smoothing it; owners pick the augmentation up through
/// [`knots`](Stairstep::knots) and merge it into their shared basis set.
///
/// Only actual value changes get a pre-step knot. Inserting one before every
/// knot unconditionally would grow the knot set on each rebuild of an edited
/// channel, since rebuilds feed the augmented set back in; change-only
/// insertion encodes exactly the step instants and makes rebuilds idempotent.
#[derive(Debug, Clone)]
pub struct Stairstep {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl Stairstep {
    /// Invariants (strict monotonicity, matching lengths, >= 2 samples) are
    /// checked by [`Interpolator::build`](crate::Interpolator::build).
    pub(crate) fn new(bases: Vec<f64>, values: Vec<f64>) -> Self {
        let mut xs = Vec::with_capacity(bases.len());
        let mut ys = Vec::with_capacity(values.len());
        xs.push(bases[0]);
        ys.push(values[0]);
        for i in 1..bases.len() {
            let step_knot = bases[i] - STEP_BACKOFF;
            if values[i] != values[i - 1] && step_knot > bases[i - 1] + BASE_EPS {
                xs.push(step_knot);
                ys.push(values[i - 1]);
            }
            xs.push(bases[i]);
            ys.push(values[i]);
        }
        Self { xs, ys }
    }

    /// Knot set including the inserted pre-step knots.
    pub fn knots(&self) -> &[f64] {
        &self.xs
    }

    pub fn compute(&self, s: f64) -> f64 {
        let i = self.xs.partition_point(|&knot| knot <= s);
        self.ys[i.saturating_sub(1)]
    }
}
