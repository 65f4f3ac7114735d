//! Numeric metric families versus the symbolic expression backend.
//!
//! Every quantity the engine produces must agree whether the metric came
//! from closed-form component functions or from differentiated expression
//! trees; disagreement means one derivative path is wrong.

use approx::assert_relative_eq;
use curv::constants::M_SUN;
use curv::{
    null_slope, ConnectionBuilder, CurvatureEngine, CurvatureStrategy, DiagonalMetric, Expr,
    ExprMetric, LapseMetric, MetricProvider, Minkowski, PhysicalConstants, RadialMetric,
    Schwarzschild,
};
use proptest::prelude::*;

fn equator(r: f64) -> [f64; 4] {
    [0.0, r, std::f64::consts::FRAC_PI_2, 0.0]
}

#[test]
fn christoffel_symbols_match_for_schwarzschild() {
    let c = PhysicalConstants::si();
    let num = Schwarzschild::new(M_SUN, c);
    let sym = ExprMetric::schwarzschild(M_SUN, c);
    let b = ConnectionBuilder::default();
    let x = equator(8.0 * num.r_s());
    let g_num = b.christoffel(&num, &x).unwrap();
    let g_sym = b.christoffel(&sym, &x).unwrap();
    for rho in 0..4 {
        for mu in 0..4 {
            for nu in 0..4 {
                assert_relative_eq!(
                    g_num.get(rho, mu, nu),
                    g_sym.get(rho, mu, nu),
                    max_relative = 1e-10,
                    epsilon = 1e-18
                );
            }
        }
    }
}

#[test]
fn expr_schwarzschild_is_vacuum_too() {
    let sym = ExprMetric::schwarzschild(M_SUN, PhysicalConstants::si());
    let engine = CurvatureEngine::new(CurvatureStrategy::DirectRicci);
    let r = 10.0 * RadialMetric::length_scale(&sym);
    let g_mixed = engine.einstein_mixed(&sym, &equator(r)).unwrap();
    assert!(
        g_mixed.abs().max() < 1e-10,
        "mixed Einstein {:e}",
        g_mixed.abs().max()
    );
}

#[test]
fn expr_minkowski_is_flat() {
    let sym = ExprMetric::minkowski(PhysicalConstants::geometrized(), 1.0);
    let engine = CurvatureEngine::new(CurvatureStrategy::FullRiemann);
    let ricci = engine.ricci(&sym, &equator(3.0)).unwrap();
    assert!(ricci.abs().max() < 1e-9);
}

#[test]
fn constant_metric_curvature_is_exactly_zero() {
    // diag(−1, 1) with no r dependence: every centered difference of the
    // components is exactly zero, so the connection, Ricci tensor and
    // scalar come out as true zeros, not small numbers.
    let m = DiagonalMetric::two_d(PhysicalConstants::geometrized(), |_| -1.0, |_| 1.0, 1.0);
    let engine = CurvatureEngine::new(CurvatureStrategy::DirectRicci);
    for r in [1.5, 4.0, 80.0] {
        let x = [0.0, r];
        let ricci = engine.ricci(&m, &x).unwrap();
        assert_eq!(ricci.abs().max(), 0.0);
        assert_eq!(engine.scalar(&m, &x).unwrap(), 0.0);
    }
}

#[test]
fn constant_expr_metric_curvature_is_exactly_zero() {
    let table = vec![Expr::c(-1.0), Expr::c(0.0), Expr::c(0.0), Expr::c(1.0)];
    let m = ExprMetric::new(2, table, PhysicalConstants::geometrized(), 1.0, 0.0).unwrap();
    let engine = CurvatureEngine::new(CurvatureStrategy::FullRiemann);
    let ricci = engine.ricci(&m, &[0.0, 4.0]).unwrap();
    assert_eq!(ricci.abs().max(), 0.0);
}

#[test]
fn lapse_ricci_agrees_between_backends() {
    let c = PhysicalConstants::si();
    let num = LapseMetric::calibrated(M_SUN, c);
    let sym = ExprMetric::lapse_calibrated(M_SUN, c);
    let engine = CurvatureEngine::new(CurvatureStrategy::DirectRicci);
    for mult in [3.0, 10.0, 100.0] {
        let x = equator(mult * RadialMetric::length_scale(&num));
        let r_num = engine.ricci(&num, &x).unwrap();
        let r_sym = engine.ricci(&sym, &x).unwrap();
        let diff = (&r_num - &r_sym).abs().max();
        let scale = r_num.abs().max().max(r_sym.abs().max());
        assert!(
            diff <= 1e-6 * scale + 1e-20,
            "ricci backends differ by {diff:e} at {mult} r_s (scale {scale:e})"
        );
    }
}

#[test]
fn lapse_strategies_agree_on_expr_backend() {
    let sym = ExprMetric::lapse_calibrated(M_SUN, PhysicalConstants::si());
    let engine = CurvatureEngine::new(CurvatureStrategy::DirectRicci);
    let x = equator(5.0 * RadialMetric::length_scale(&sym));
    let diff = engine.cross_check(&sym, &x).unwrap();
    let scale = engine.ricci(&sym, &x).unwrap().abs().max();
    assert!(diff <= 1e-9 * scale.max(1.0), "strategy disagreement {diff:e}");
}

#[test]
fn radial_views_match() {
    let c = PhysicalConstants::si();
    let num = LapseMetric::calibrated(M_SUN, c);
    let sym = ExprMetric::lapse_calibrated(M_SUN, c);
    for mult in [2.0, 7.0, 1e3] {
        let r = mult * RadialMetric::length_scale(&num);
        assert_relative_eq!(
            RadialMetric::g_tt(&num, r),
            RadialMetric::g_tt(&sym, r),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            RadialMetric::g_rr_deriv(&num, r),
            RadialMetric::g_rr_deriv(&sym, r),
            max_relative = 1e-10
        );
        assert_relative_eq!(
            null_slope(&num, r),
            null_slope(&sym, r),
            max_relative = 1e-12
        );
    }
}

proptest! {
    #[test]
    fn prop_schwarzschild_components_and_partials_match(
        mult in 1.5f64..1e4,
        theta in 0.3f64..2.8,
    ) {
        let c = PhysicalConstants::si();
        let num = Schwarzschild::new(M_SUN, c);
        let sym = ExprMetric::schwarzschild(M_SUN, c);
        let x = [0.0, mult * num.r_s(), theta, 0.7];
        for mu in 0..4 {
            for nu in 0..4 {
                let a = num.component(mu, nu, &x);
                let b = sym.component(mu, nu, &x);
                prop_assert!((a - b).abs() <= 1e-12 * a.abs().max(1e-12));
                for alpha in 0..4 {
                    let da = num.partial(mu, nu, alpha, &x).unwrap();
                    let db = sym.partial(mu, nu, alpha, &x).unwrap();
                    prop_assert!((da - db).abs() <= 1e-10 * da.abs().max(1e-12));
                }
            }
        }
    }
}
