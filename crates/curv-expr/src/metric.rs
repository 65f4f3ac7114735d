//! Metric providers built from symbolic component tables.

use crate::expr::Expr;
use curv_metric::constants::PhysicalConstants;
use curv_metric::provider::{MetricProvider, RadialMetric};
use curv_metric::{MetricError, Result};

/// A metric whose components are [`Expr`] trees over the coordinates
/// `x0 = T, x1 = r, x2 = θ, x3 = φ`.
///
/// All partial derivatives are differentiated symbolically at construction
/// and simplified once, so [`MetricProvider::partial`] is exact. This is the
/// backend the finite-difference path is validated against.
#[derive(Debug, Clone)]
pub struct ExprMetric {
    constants: PhysicalConstants,
    dim: usize,
    /// Row-major n×n component table.
    components: Vec<Expr>,
    /// Flattened ∂_α g_{μν}, indexed (μ·n + ν)·n + α.
    partials: Vec<Expr>,
    scale: f64,
    r_min: f64,
    mass: Option<f64>,
}

impl ExprMetric {
    /// Build from a row-major n×n component table. The table must already be
    /// symmetric; only the length is checked here.
    pub fn new(
        dim: usize,
        components: Vec<Expr>,
        constants: PhysicalConstants,
        scale: f64,
        r_min: f64,
    ) -> Result<Self> {
        if components.len() != dim * dim {
            return Err(MetricError::Malformed(format!(
                "component table has {} entries, expected {}",
                components.len(),
                dim * dim
            )));
        }
        Ok(Self::build(dim, components, constants, scale, r_min, None))
    }

    fn build(
        dim: usize,
        components: Vec<Expr>,
        constants: PhysicalConstants,
        scale: f64,
        r_min: f64,
        mass: Option<f64>,
    ) -> Self {
        let components: Vec<Expr> = components.iter().map(Expr::simplify).collect();
        let mut partials = Vec::with_capacity(dim * dim * dim);
        for g in &components {
            for alpha in 0..dim {
                partials.push(g.diff(alpha).simplify());
            }
        }
        Self {
            constants,
            dim,
            components,
            partials,
            scale,
            r_min,
            mass,
        }
    }

    /// Flat spacetime diag(−c², 1, r², r² sin²θ).
    pub fn minkowski(constants: PhysicalConstants, scale: f64) -> Self {
        let c2 = constants.c * constants.c;
        let mut table = Self::angular_table(4);
        table[0] = Expr::c(-c2);
        table[5] = Expr::c(1.0);
        Self::build(4, table, constants, scale, 0.0, None)
    }

    /// Schwarzschild exterior, g_TT = −(1 − r_s/r)c², g_rr = (1 − r_s/r)⁻¹.
    pub fn schwarzschild(mass: f64, constants: PhysicalConstants) -> Self {
        let r_s = constants.schwarzschild_radius(mass);
        let c2 = constants.c * constants.c;
        let lapse = || Expr::c(1.0) - Expr::c(r_s) / Expr::var(1);
        let mut table = Self::angular_table(4);
        table[0] = Expr::c(-c2) * lapse();
        table[5] = lapse().powi(-1);
        Self::build(4, table, constants, r_s, r_s, Some(mass))
    }

    /// Mass-calibrated hyperbolic-lapse metric: γ = cosh √(r_s/r),
    /// g_TT = −c²/γ², g_rr = γ².
    pub fn lapse_calibrated(mass: f64, constants: PhysicalConstants) -> Self {
        let r_s = constants.schwarzschild_radius(mass);
        let c2 = constants.c * constants.c;
        let gamma = || (Expr::c(r_s) / Expr::var(1)).sqrt().cosh();
        let mut table = Self::angular_table(4);
        table[0] = Expr::c(-c2) * gamma().powi(-2);
        table[5] = gamma().powi(2);
        let r_min = (1e-3 * r_s).max(1.0);
        Self::build(4, table, constants, r_s, r_min, Some(mass))
    }

    /// Zero-filled table with the standard angular block when n = 4.
    fn angular_table(dim: usize) -> Vec<Expr> {
        let mut table = vec![Expr::c(0.0); dim * dim];
        if dim == 4 {
            table[2 * dim + 2] = Expr::var(1).powi(2);
            table[3 * dim + 3] = Expr::var(1).powi(2) * Expr::var(2).sin().powi(2);
        }
        table
    }

    /// Symbolic component g_{μν}.
    pub fn component_expr(&self, mu: usize, nu: usize) -> &Expr {
        &self.components[mu * self.dim + nu]
    }

    /// Symbolic partial ∂_α g_{μν}.
    pub fn partial_expr(&self, mu: usize, nu: usize, alpha: usize) -> &Expr {
        &self.partials[(mu * self.dim + nu) * self.dim + alpha]
    }

    /// Equatorial evaluation point for the radial view.
    fn radial_point(&self, r: f64) -> Vec<f64> {
        if self.dim == 2 {
            vec![0.0, r]
        } else {
            vec![0.0, r, std::f64::consts::FRAC_PI_2, 0.0]
        }
    }
}

impl MetricProvider for ExprMetric {
    fn dim(&self) -> usize {
        self.dim
    }

    fn component(&self, mu: usize, nu: usize, x: &[f64]) -> f64 {
        self.components[mu * self.dim + nu].eval(x)
    }

    fn partial(&self, mu: usize, nu: usize, alpha: usize, x: &[f64]) -> Option<f64> {
        Some(self.partials[(mu * self.dim + nu) * self.dim + alpha].eval(x))
    }

    fn length_scale(&self) -> f64 {
        self.scale
    }

    fn in_domain(&self, x: &[f64]) -> bool {
        x[1] > self.r_min
    }
}

impl RadialMetric for ExprMetric {
    fn constants(&self) -> PhysicalConstants {
        self.constants
    }

    fn g_tt(&self, r: f64) -> f64 {
        self.component(0, 0, &self.radial_point(r))
    }

    fn g_rr(&self, r: f64) -> f64 {
        self.component(1, 1, &self.radial_point(r))
    }

    fn g_tt_deriv(&self, r: f64) -> f64 {
        self.partial_expr(0, 0, 1).eval(&self.radial_point(r))
    }

    fn g_rr_deriv(&self, r: f64) -> f64 {
        self.partial_expr(1, 1, 1).eval(&self.radial_point(r))
    }

    fn length_scale(&self) -> f64 {
        self.scale
    }

    fn central_mass(&self) -> Option<f64> {
        self.mass
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use curv_metric::constants::{C_SI, M_SUN};
    use curv_metric::families::{LapseMetric, Schwarzschild};

    #[test]
    fn test_schwarzschild_partial_closed_form() {
        let m = ExprMetric::schwarzschild(M_SUN, PhysicalConstants::si());
        let r_s = RadialMetric::length_scale(&m);
        let r = 10.0 * r_s;
        let x = [0.0, r, std::f64::consts::FRAC_PI_2, 0.0];
        assert_relative_eq!(
            m.partial(0, 0, 1, &x).unwrap(),
            -C_SI * C_SI * r_s / (r * r),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_schwarzschild_matches_numeric_family() {
        let c = PhysicalConstants::si();
        let sym = ExprMetric::schwarzschild(M_SUN, c);
        let num = Schwarzschild::new(M_SUN, c);
        let x = [0.0, 7.0 * num.r_s(), 1.2, 0.4];
        for mu in 0..4 {
            for nu in 0..4 {
                assert_relative_eq!(
                    sym.component(mu, nu, &x),
                    num.component(mu, nu, &x),
                    max_relative = 1e-12,
                    epsilon = 1e-12
                );
                assert_relative_eq!(
                    sym.partial(mu, nu, 1, &x).unwrap(),
                    num.partial(mu, nu, 1, &x).unwrap(),
                    max_relative = 1e-12,
                    epsilon = 1e-12
                );
            }
        }
    }

    #[test]
    fn test_lapse_matches_numeric_family() {
        let c = PhysicalConstants::si();
        let sym = ExprMetric::lapse_calibrated(M_SUN, c);
        let num = LapseMetric::calibrated(M_SUN, c);
        let r = 5.0 * RadialMetric::length_scale(&sym);
        assert_relative_eq!(
            RadialMetric::g_tt(&sym, r),
            RadialMetric::g_tt(&num, r),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            RadialMetric::g_tt_deriv(&sym, r),
            RadialMetric::g_tt_deriv(&num, r),
            max_relative = 1e-10
        );
    }

    #[test]
    fn test_angular_partial() {
        let m = ExprMetric::minkowski(PhysicalConstants::geometrized(), 1.0);
        let x = [0.0, 3.0, 0.9, 0.0];
        assert_relative_eq!(m.partial(2, 2, 1, &x).unwrap(), 6.0);
        assert_relative_eq!(
            m.partial(3, 3, 2, &x).unwrap(),
            2.0 * 9.0 * 0.9f64.sin() * 0.9f64.cos(),
            max_relative = 1e-13
        );
    }

    #[test]
    fn test_wrong_table_length_rejected() {
        let err = ExprMetric::new(
            2,
            vec![Expr::c(1.0); 3],
            PhysicalConstants::geometrized(),
            1.0,
            0.0,
        )
        .unwrap_err();
        assert!(matches!(err, MetricError::Malformed(_)));
    }
}
