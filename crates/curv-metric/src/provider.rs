//! The `MetricProvider` contract and generic helpers.

use crate::constants::PhysicalConstants;
use crate::error::{MetricError, Result};
use crate::DMat;

/// Default |det g| floor below which the metric is treated as singular.
pub const DET_TOLERANCE: f64 = 1e-30;

/// A spacetime metric expressed as component functions of the coordinates.
///
/// Coordinate ordering is fixed: `[T, r]` for 2-coordinate blocks and
/// `[T, r, θ, φ]` for 4-coordinate blocks. Implementations must be symmetric
/// in (μ, ν); at most one off-diagonal pair is supported by the downstream
/// engines.
pub trait MetricProvider {
    /// Number of coordinates (2 or 4).
    fn dim(&self) -> usize;

    /// Metric component g_{μν} at `x`.
    fn component(&self, mu: usize, nu: usize, x: &[f64]) -> f64;

    /// Analytic partial ∂_α g_{μν} at `x`, if the provider has one.
    ///
    /// Returning `None` makes the engines fall back to centered finite
    /// differences.
    fn partial(&self, _mu: usize, _nu: usize, _alpha: usize, _x: &[f64]) -> Option<f64> {
        None
    }

    /// Characteristic length used for default sampling and step sizing.
    fn length_scale(&self) -> f64;

    /// Valid-domain predicate; evaluation outside is a `Domain` error.
    fn in_domain(&self, _x: &[f64]) -> bool {
        true
    }

    /// Whether the metric is independent of the time coordinate.
    fn is_stationary(&self) -> bool {
        true
    }

    /// Full metric matrix at `x`.
    ///
    /// Fails with `Malformed` on a wrong-length point or asymmetric
    /// components, and with `Domain` outside the declared domain.
    fn metric(&self, x: &[f64]) -> Result<DMat> {
        let n = self.dim();
        if x.len() != n {
            return Err(MetricError::Malformed(format!(
                "point has {} coordinates, metric has {}",
                x.len(),
                n
            )));
        }
        if !self.in_domain(x) {
            return Err(MetricError::Domain { point: x.to_vec() });
        }
        let mut g = DMat::zeros(n, n);
        for mu in 0..n {
            for nu in mu..n {
                let v = self.component(mu, nu, x);
                let vt = self.component(nu, mu, x);
                if (v - vt).abs() > 1e-12 * v.abs().max(1.0) {
                    return Err(MetricError::Malformed(format!(
                        "asymmetric components g[{mu}][{nu}] = {v:e}, g[{nu}][{mu}] = {vt:e}"
                    )));
                }
                g[(mu, nu)] = v;
                g[(nu, mu)] = v;
            }
        }
        Ok(g)
    }
}

/// Invert a metric matrix, failing with `SingularMetric` when |det g| is
/// below `tolerance`.
pub fn inverse_metric(g: &DMat, point: &[f64], tolerance: f64) -> Result<DMat> {
    let det = g.determinant();
    if !det.is_finite() || det.abs() < tolerance {
        return Err(MetricError::SingularMetric {
            point: point.to_vec(),
            det,
            tolerance,
        });
    }
    g.clone().try_inverse().ok_or(MetricError::SingularMetric {
        point: point.to_vec(),
        det,
        tolerance,
    })
}

/// Radial surface of a static spherically-symmetric metric.
///
/// This is the view the geodesic integrator and physical validator consume:
/// the (T, r) block as functions of r, the time-coupling function for
/// coordinate reconstruction, and redshift/time-dilation observables with
/// weak-field GR references.
pub trait RadialMetric {
    fn constants(&self) -> PhysicalConstants;

    /// g_TT(r); negative on the static domain.
    fn g_tt(&self, r: f64) -> f64;

    /// g_rr(r); positive on the static domain.
    fn g_rr(&self, r: f64) -> f64;

    /// Characteristic length (e.g. the Schwarzschild radius).
    fn length_scale(&self) -> f64;

    /// Central mass, when the family has one. Drives the experimental
    /// weak-field checks; `None` skips them.
    fn central_mass(&self) -> Option<f64> {
        None
    }

    /// Coupling f(r) in the off-diagonal time reconstruction dt = dT + f(r)·dr.
    fn time_coupling(&self, _r: f64) -> f64 {
        0.0
    }

    /// dg_TT/dr. Families with closed forms override; the default is a
    /// centered finite difference.
    fn g_tt_deriv(&self, r: f64) -> f64 {
        let h = (1e-6 * r.abs()).max(1e-8);
        (self.g_tt(r + h) - self.g_tt(r - h)) / (2.0 * h)
    }

    /// dg_rr/dr, same convention as [`RadialMetric::g_tt_deriv`].
    fn g_rr_deriv(&self, r: f64) -> f64 {
        let h = (1e-6 * r.abs()).max(1e-8);
        (self.g_rr(r + h) - self.g_rr(r - h)) / (2.0 * h)
    }

    /// Time dilation dτ/dT of a static observer: √(−g_TT)/c.
    fn time_dilation(&self, r: f64) -> f64 {
        (-self.g_tt(r)).sqrt() / self.constants().c
    }

    /// Gravitational redshift factor 1 + z between emission and observation.
    fn redshift_factor(&self, r_emit: f64, r_obs: f64) -> f64 {
        self.time_dilation(r_obs) / self.time_dilation(r_emit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::families::Minkowski;
    use approx::assert_relative_eq;

    #[test]
    fn test_metric_matrix_symmetric() {
        let m = Minkowski::new(PhysicalConstants::si(), 1.0);
        let g = m
            .metric(&[0.0, 2.0, std::f64::consts::FRAC_PI_2, 0.0])
            .unwrap();
        assert_relative_eq!(g[(2, 2)], 4.0);
        assert_eq!(g[(0, 1)], 0.0);
    }

    #[test]
    fn test_wrong_point_length_rejected() {
        let m = Minkowski::new(PhysicalConstants::si(), 1.0);
        assert!(matches!(
            m.metric(&[0.0, 1.0]),
            Err(MetricError::Malformed(_))
        ));
    }

    #[test]
    fn test_singular_matrix_rejected() {
        let g = DMat::zeros(2, 2);
        let err = inverse_metric(&g, &[0.0, 1.0], DET_TOLERANCE).unwrap_err();
        assert!(matches!(err, MetricError::SingularMetric { .. }));
    }

    #[test]
    fn test_inverse_roundtrip() {
        let m = Minkowski::new(PhysicalConstants::geometrized(), 1.0);
        let x = [0.0, 3.0, 1.0, 0.5];
        let g = m.metric(&x).unwrap();
        let g_inv = inverse_metric(&g, &x, DET_TOLERANCE).unwrap();
        let id = &g * &g_inv;
        for i in 0..4 {
            for j in 0..4 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_relative_eq!(id[(i, j)], expected, epsilon = 1e-12);
            }
        }
    }
}
