//! Radial null rays: coordinate light speed and time of flight.

use crate::quadrature::Quadrature;
use curv_metric::{MetricError, RadialMetric, Result};

/// Magnitude of the radial coordinate light speed |dr/dT| = √(−g_TT/g_rr).
///
/// Always ≤ c when (−g_TT)·g_rr ≥ c² holds; the causality check in the
/// validator asserts exactly that.
pub fn null_slope(m: &dyn RadialMetric, r: f64) -> f64 {
    (-m.g_tt(r) / m.g_rr(r)).sqrt()
}

/// Coordinate time for a radial light ray to cross [r_a, r_b]:
/// T = ∫ √(g_rr / −g_TT) dr on an n-point uniform grid.
pub fn time_of_flight(
    m: &dyn RadialMetric,
    r_a: f64,
    r_b: f64,
    rule: Quadrature,
    n: usize,
) -> Result<f64> {
    if !(r_a.is_finite() && r_b.is_finite()) || r_a >= r_b || n < 2 {
        return Err(MetricError::Malformed(format!(
            "invalid flight interval [{r_a}, {r_b}] with {n} samples"
        )));
    }
    let mut xs = Vec::with_capacity(n);
    let mut ys = Vec::with_capacity(n);
    for i in 0..n {
        let r = r_a + (r_b - r_a) * i as f64 / (n - 1) as f64;
        let g_tt = m.g_tt(r);
        let g_rr = m.g_rr(r);
        if g_tt >= 0.0 || g_rr <= 0.0 {
            return Err(MetricError::Domain { point: vec![0.0, r] });
        }
        xs.push(r);
        ys.push((g_rr / -g_tt).sqrt());
    }
    rule.integrate(&xs, &ys)
}
