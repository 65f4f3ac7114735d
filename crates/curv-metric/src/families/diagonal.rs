//! Closure-defined diagonal metrics.

use super::{angular_component, angular_partial, RadialFn};
use crate::constants::PhysicalConstants;
use crate::provider::{MetricProvider, RadialMetric};
use std::sync::Arc;

/// Diagonal metric g = diag(a(r), b(r)) or diag(a(r), b(r), r², r² sin²θ),
/// with a and b supplied as closures.
///
/// This is the "any smooth diagonal metric" fixture: the tensor engine must
/// handle it unmodified, with no family-specific shortcuts. Analytic radial
/// derivatives are optional; without them the engines differentiate by
/// centered finite difference.
#[derive(Clone)]
pub struct DiagonalMetric {
    pub constants: PhysicalConstants,
    dim: usize,
    a: RadialFn,
    b: RadialFn,
    da: Option<RadialFn>,
    db: Option<RadialFn>,
    scale: f64,
    r_min: f64,
}

impl DiagonalMetric {
    /// 2-coordinate (T, r) block.
    pub fn two_d(
        constants: PhysicalConstants,
        a: impl Fn(f64) -> f64 + Send + Sync + 'static,
        b: impl Fn(f64) -> f64 + Send + Sync + 'static,
        scale: f64,
    ) -> Self {
        Self {
            constants,
            dim: 2,
            a: Arc::new(a),
            b: Arc::new(b),
            da: None,
            db: None,
            scale,
            r_min: 0.0,
        }
    }

    /// 4-coordinate (T, r, θ, φ) metric with the standard angular block.
    pub fn four_d(
        constants: PhysicalConstants,
        a: impl Fn(f64) -> f64 + Send + Sync + 'static,
        b: impl Fn(f64) -> f64 + Send + Sync + 'static,
        scale: f64,
    ) -> Self {
        Self {
            dim: 4,
            ..Self::two_d(constants, a, b, scale)
        }
    }

    /// Attach analytic radial derivatives a'(r), b'(r).
    pub fn with_derivatives(
        mut self,
        da: impl Fn(f64) -> f64 + Send + Sync + 'static,
        db: impl Fn(f64) -> f64 + Send + Sync + 'static,
    ) -> Self {
        self.da = Some(Arc::new(da));
        self.db = Some(Arc::new(db));
        self
    }

    /// Restrict the domain to r > r_min.
    pub fn with_r_min(mut self, r_min: f64) -> Self {
        self.r_min = r_min;
        self
    }
}

impl std::fmt::Debug for DiagonalMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagonalMetric")
            .field("dim", &self.dim)
            .field("scale", &self.scale)
            .field("analytic", &self.da.is_some())
            .finish()
    }
}

impl MetricProvider for DiagonalMetric {
    fn dim(&self) -> usize {
        self.dim
    }

    fn component(&self, mu: usize, nu: usize, x: &[f64]) -> f64 {
        let r = x[1];
        match (mu, nu) {
            (0, 0) => (self.a)(r),
            (1, 1) => (self.b)(r),
            _ => angular_component(mu, nu, x),
        }
    }

    fn partial(&self, mu: usize, nu: usize, alpha: usize, x: &[f64]) -> Option<f64> {
        let (da, db) = (self.da.as_ref()?, self.db.as_ref()?);
        let r = x[1];
        let v = match (mu, nu, alpha) {
            (0, 0, 1) => da(r),
            (1, 1, 1) => db(r),
            (0, 0, _) | (1, 1, _) => 0.0,
            _ => angular_partial(mu, nu, alpha, x),
        };
        Some(v)
    }

    fn length_scale(&self) -> f64 {
        self.scale
    }

    fn in_domain(&self, x: &[f64]) -> bool {
        x[1] > self.r_min
    }
}

impl RadialMetric for DiagonalMetric {
    fn constants(&self) -> PhysicalConstants {
        self.constants
    }

    fn g_tt(&self, r: f64) -> f64 {
        (self.a)(r)
    }

    fn g_rr(&self, r: f64) -> f64 {
        (self.b)(r)
    }

    fn g_tt_deriv(&self, r: f64) -> f64 {
        match &self.da {
            Some(da) => da(r),
            None => {
                let h = (1e-6 * r.abs()).max(1e-8);
                ((self.a)(r + h) - (self.a)(r - h)) / (2.0 * h)
            }
        }
    }

    fn g_rr_deriv(&self, r: f64) -> f64 {
        match &self.db {
            Some(db) => db(r),
            None => {
                let h = (1e-6 * r.abs()).max(1e-8);
                ((self.b)(r + h) - (self.b)(r - h)) / (2.0 * h)
            }
        }
    }

    fn length_scale(&self) -> f64 {
        self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_constant_metric_components() {
        let m = DiagonalMetric::two_d(PhysicalConstants::geometrized(), |_| 1.0, |_| 1.0, 1.0);
        assert_eq!(m.dim(), 2);
        assert_relative_eq!(m.component(0, 0, &[0.0, 5.0]), 1.0);
        assert_relative_eq!(m.component(1, 1, &[0.0, 5.0]), 1.0);
    }

    #[test]
    fn test_analytic_derivative_used() {
        let m = DiagonalMetric::four_d(
            PhysicalConstants::geometrized(),
            |r| -(1.0 + 1.0 / r),
            |r| 1.0 + 2.0 / r,
            1.0,
        )
        .with_derivatives(|r| 1.0 / (r * r), |r| -2.0 / (r * r));
        let x = [0.0, 2.0, 1.0, 0.0];
        assert_relative_eq!(m.partial(0, 0, 1, &x).unwrap(), 0.25);
        assert_relative_eq!(m.g_rr_deriv(2.0), -0.5);
    }
}
