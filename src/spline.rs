//! Cubic spline interpolation (spec.md §4.2, external contract).
//!
//! The pipeline consumes an interpolator that fits a strictly increasing set
//! of knots and evaluates it anywhere inside `[x0, xn]`, C² across the
//! interior, interpolating every knot exactly. The [`SplineInterpolator`]
//! trait is the extension point; [`NaturalCubicSpline`] is the reference
//! implementation, a natural-boundary cubic spline solved with the Thomas
//! algorithm (standard tridiagonal solve, no external numerical crate
//! required for a knot count in the tens, which is all the accelerometer
//! buffer ever holds).
//!
//! Evaluation outside `[x0, xn]` is undefined by contract (spec.md §4.2); the
//! window extractor is responsible for never querying out of range, so this
//! module does not defend against it (spec.md §7: "a programming error by
//! construction; must be prevented upstream").

/// A fitted interpolator over a fixed set of knots.
pub trait SplineInterpolator {
    /// Evaluate the interpolant at `x`. Behavior for `x` outside the knot
    /// range the interpolator was built from is unspecified.
    fn evaluate(&self, x: f64) -> f64;
}

/// Natural cubic spline: second derivative is zero at both endpoints.
#[derive(Debug, Clone)]
pub struct NaturalCubicSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Second derivatives at each knot, from the tridiagonal solve.
    second_derivatives: Vec<f64>,
}

impl NaturalCubicSpline {
    /// Fit a natural cubic spline to `xs`/`ys`. `xs` must be strictly
    /// increasing and the two slices must be the same non-empty length;
    /// callers in this crate always pass the current accelerometer buffer,
    /// which already holds that invariant (I1).
    pub fn fit(xs: &[f64], ys: &[f64]) -> Self {
        debug_assert_eq!(xs.len(), ys.len());
        debug_assert!(xs.windows(2).all(|w| w[0] < w[1]));

        let n = xs.len();
        let second_derivatives = if n < 3 {
            vec![0.0; n]
        } else {
            solve_natural_spline(xs, ys)
        };

        Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            second_derivatives,
        }
    }

    fn find_segment(&self, x: f64) -> usize {
        // Largest index i such that xs[i] <= x, clamped to n-2 so [i, i+1]
        // is always a valid segment.
        match self.xs.binary_search_by(|probe| probe.partial_cmp(&x).unwrap()) {
            Ok(i) => i.min(self.xs.len() - 2),
            Err(0) => 0,
            Err(i) => (i - 1).min(self.xs.len() - 2),
        }
    }
}

impl SplineInterpolator for NaturalCubicSpline {
    fn evaluate(&self, x: f64) -> f64 {
        let n = self.xs.len();
        if n == 1 {
            return self.ys[0];
        }
        if n == 2 {
            let t = (x - self.xs[0]) / (self.xs[1] - self.xs[0]);
            return self.ys[0] + t * (self.ys[1] - self.ys[0]);
        }

        let i = self.find_segment(x);
        let h = self.xs[i + 1] - self.xs[i];
        let a = (self.xs[i + 1] - x) / h;
        let b = (x - self.xs[i]) / h;

        a * self.ys[i]
            + b * self.ys[i + 1]
            + ((a.powi(3) - a) * self.second_derivatives[i]
                + (b.powi(3) - b) * self.second_derivatives[i + 1])
                * (h * h)
                / 6.0
    }
}

/// Thomas algorithm for the natural-boundary tridiagonal system.
fn solve_natural_spline(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    let n = xs.len();
    let mut h = vec![0.0; n - 1];
    for i in 0..n - 1 {
        h[i] = xs[i + 1] - xs[i];
    }

    // Interior equations: h[i-1]*m[i-1] + 2*(h[i-1]+h[i])*m[i] + h[i]*m[i+1] = rhs[i]
    let mut sub = vec![0.0; n];
    let mut diag = vec![1.0; n];
    let mut sup = vec![0.0; n];
    let mut rhs = vec![0.0; n];

    for i in 1..n - 1 {
        sub[i] = h[i - 1];
        diag[i] = 2.0 * (h[i - 1] + h[i]);
        sup[i] = h[i];
        rhs[i] = 6.0 * ((ys[i + 1] - ys[i]) / h[i] - (ys[i] - ys[i - 1]) / h[i - 1]);
    }

    // Natural boundary: m[0] = m[n-1] = 0.
    diag[0] = 1.0;
    sup[0] = 0.0;
    rhs[0] = 0.0;
    diag[n - 1] = 1.0;
    sub[n - 1] = 0.0;
    rhs[n - 1] = 0.0;

    thomas_solve(&sub, &diag, &sup, &rhs)
}

/// Solve a tridiagonal system `sub[i]*x[i-1] + diag[i]*x[i] + sup[i]*x[i+1] = rhs[i]`.
fn thomas_solve(sub: &[f64], diag: &[f64], sup: &[f64], rhs: &[f64]) -> Vec<f64> {
    let n = diag.len();
    let mut c_prime = vec![0.0; n];
    let mut d_prime = vec![0.0; n];

    c_prime[0] = sup[0] / diag[0];
    d_prime[0] = rhs[0] / diag[0];

    for i in 1..n {
        let denom = diag[i] - sub[i] * c_prime[i - 1];
        c_prime[i] = sup[i] / denom;
        d_prime[i] = (rhs[i] - sub[i] * d_prime[i - 1]) / denom;
    }

    let mut x = vec![0.0; n];
    x[n - 1] = d_prime[n - 1];
    for i in (0..n - 1).rev() {
        x[i] = d_prime[i] - c_prime[i] * x[i + 1];
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolates_knots_exactly() {
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0];
        let ys = [0.0, 1.0, 4.0, 9.0, 16.0];
        let spline = NaturalCubicSpline::fit(&xs, &ys);

        for (&x, &y) in xs.iter().zip(ys.iter()) {
            assert!((spline.evaluate(x) - y).abs() < 1e-9, "knot mismatch at {x}");
        }
    }

    #[test]
    fn linear_data_stays_linear() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys = [0.0, 2.0, 4.0, 6.0];
        let spline = NaturalCubicSpline::fit(&xs, &ys);

        assert!((spline.evaluate(0.5) - 1.0).abs() < 1e-9);
        assert!((spline.evaluate(1.5) - 3.0).abs() < 1e-9);
        assert!((spline.evaluate(2.5) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn two_point_fit_is_linear_interpolation() {
        let xs = [0.0, 2.0];
        let ys = [0.0, 10.0];
        let spline = NaturalCubicSpline::fit(&xs, &ys);
        assert!((spline.evaluate(1.0) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn single_point_is_constant() {
        let xs = [5.0];
        let ys = [42.0];
        let spline = NaturalCubicSpline::fit(&xs, &ys);
        assert_eq!(spline.evaluate(5.0), 42.0);
    }

    #[test]
    fn smooth_interior_does_not_overshoot_wildly() {
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let ys = [1.0, 1.0, 1.0, 1.0, 1.0, 1.0];
        let spline = NaturalCubicSpline::fit(&xs, &ys);
        for i in 0..=50 {
            let x = i as f64 / 10.0;
            assert!((spline.evaluate(x) - 1.0).abs() < 1e-6);
        }
    }
}
