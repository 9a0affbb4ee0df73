//! Natural cubic spline interpolation.

use crate::interpolator::find_interval;

/// C2-continuous natural cubic spline.
///
/// Knot second derivatives are obtained from the standard tridiagonal system
/// (zero curvature at both endpoints) solved with the Thomas algorithm;
/// evaluation uses the Hermite-style form on the bracketing segment.
#[derive(Debug, Clone)]
pub struct CubicSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Second derivative at each knot.
    m: Vec<f64>,
}

impl CubicSpline {
    /// Invariants (strict monotonicity, matching lengths, >= 4 samples) are
    /// checked by [`Interpolator::build`](crate::Interpolator::build).
    pub(crate) fn new(xs: Vec<f64>, ys: Vec<f64>) -> Self {
        let m = solve_second_derivatives(&xs, &ys);
        Self { xs, ys, m }
    }

    pub fn knots(&self) -> &[f64] {
        &self.xs
    }

    pub fn compute(&self, s: f64) -> f64 {
        let i = find_interval(&self.xs, s);
        let h = self.xs[i + 1] - self.xs[i];
        let a = (self.xs[i + 1] - s) / h;
        let b = (s - self.xs[i]) / h;
        a * self.ys[i]
            + b * self.ys[i + 1]
            + ((a * a * a - a) * self.m[i] + (b * b * b - b) * self.m[i + 1]) * h * h / 6.0
    }

    pub fn derivative(&self, s: f64) -> f64 {
        let i = find_interval(&self.xs, s);
        let h = self.xs[i + 1] - self.xs[i];
        let a = (self.xs[i + 1] - s) / h;
        let b = (s - self.xs[i]) / h;
        (self.ys[i + 1] - self.ys[i]) / h
            - (3.0 * a * a - 1.0) / 6.0 * h * self.m[i]
            + (3.0 * b * b - 1.0) / 6.0 * h * self.m[i + 1]
    }

    pub fn second_derivative(&self, s: f64) -> f64 {
        let i = find_interval(&self.xs, s);
        let h = self.xs[i + 1] - self.xs[i];
        let a = (self.xs[i + 1] - s) / h;
        let b = (s - self.xs[i]) / h;
        a * self.m[i] + b * self.m[i + 1]
    }
}

/// Thomas-algorithm solve of the natural-spline tridiagonal system.
fn solve_second_derivatives(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    let n = xs.len();
    let mut m = vec![0.0; n];
    if n < 3 {
        return m;
    }

    // Interior equations: h[i-1]*m[i-1] + 2(h[i-1]+h[i])*m[i] + h[i]*m[i+1] = rhs[i]
    let mut diag = vec![0.0; n];
    let mut rhs = vec![0.0; n];
    for i in 1..n - 1 {
        let h0 = xs[i] - xs[i - 1];
        let h1 = xs[i + 1] - xs[i];
        diag[i] = 2.0 * (h0 + h1);
        rhs[i] = 6.0 * ((ys[i + 1] - ys[i]) / h1 - (ys[i] - ys[i - 1]) / h0);
    }

    // Forward elimination over the interior rows.
    for i in 2..n - 1 {
        let h0 = xs[i] - xs[i - 1];
        let w = h0 / diag[i - 1];
        diag[i] -= w * h0;
        rhs[i] -= w * rhs[i - 1];
    }

    // Back substitution; m[0] and m[n-1] stay 0 (natural boundary).
    for i in (1..n - 1).rev() {
        let h1 = xs[i + 1] - xs[i];
        let upper = if i + 1 < n - 1 { h1 * m[i + 1] } else { 0.0 };
        m[i] = (rhs[i] - upper) / diag[i];
    }
    m
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolates_knot_values_exactly() {
        let xs = vec![0.0, 1.0, 2.0, 3.0, 4.0];
        let ys = vec![0.0, 1.0, 0.0, 1.0, 0.0];
        let spline = CubicSpline::new(xs.clone(), ys.clone());
        for (x, y) in xs.iter().zip(&ys) {
            assert!((spline.compute(*x) - y).abs() < 1e-10);
        }
    }

    #[test]
    fn collinear_samples_stay_linear() {
        let xs = vec![0.0, 1.0, 2.0, 3.0, 4.0];
        let ys = vec![0.0, 2.0, 4.0, 6.0, 8.0];
        let spline = CubicSpline::new(xs, ys);
        assert!((spline.compute(2.5) - 5.0).abs() < 1e-10);
        assert!((spline.derivative(1.3) - 2.0).abs() < 1e-10);
        assert!(spline.second_derivative(2.5).abs() < 1e-9);
    }

    #[test]
    fn natural_boundary_has_zero_curvature() {
        let xs = vec![0.0, 1.0, 2.0, 3.0];
        let ys = vec![0.0, 1.0, -1.0, 0.5];
        let spline = CubicSpline::new(xs, ys);
        assert!(spline.second_derivative(0.0).abs() < 1e-10);
        assert!(spline.second_derivative(3.0).abs() < 1e-10);
    }

    #[test]
    fn derivative_matches_finite_difference() {
        let xs = vec![0.0, 0.7, 1.9, 3.0, 4.2];
        let ys = vec![0.0, 1.1, 0.3, -0.5, 0.9];
        let spline = CubicSpline::new(xs, ys);
        let h = 1e-6;
        for &s in &[0.3, 1.0, 2.5, 3.9] {
            let fd = (spline.compute(s + h) - spline.compute(s - h)) / (2.0 * h);
            assert!((spline.derivative(s) - fd).abs() < 1e-5);
        }
    }
}
