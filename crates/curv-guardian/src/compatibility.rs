//! Metric-compatibility, stationarity and symmetry checks.

use crate::report::{CheckResult, ValidationReport};
use curv_metric::{MetricError, MetricProvider, Result};
use curv_tensor::ConnectionBuilder;

/// Relative step for the independent verification differences, near the
/// f64 optimum eps^(1/3) so neither truncation nor rounding dominates.
const VERIFY_REL_STEP: f64 = 3e-6;
const VERIFY_ABS_FLOOR: f64 = 1e-8;

/// Checks that the connection actually belongs to the metric it was built
/// from: ∇_α g_{μν} = 0, plus the structural stationarity and symmetry
/// assumptions the rest of the engine relies on.
///
/// Residuals are normalized per component by √(|g_μμ|·|g_νν|) so the c²
/// scale of the time-time component cannot mask (or fake) a violation.
#[derive(Debug, Clone, Copy)]
pub struct ConsistencyChecker {
    pub builder: ConnectionBuilder,
    /// Residual threshold when the provider supplies analytic partials.
    pub exact_threshold: f64,
    /// Residual threshold on the finite-difference path.
    pub fd_threshold: f64,
    /// Turn threshold breaches into `ToleranceExceeded` errors instead of
    /// report entries.
    pub assert_mode: bool,
}

impl Default for ConsistencyChecker {
    fn default() -> Self {
        Self {
            builder: ConnectionBuilder::default(),
            exact_threshold: 1e-10,
            fd_threshold: 1e-6,
            assert_mode: false,
        }
    }
}

/// Log-spaced sample points r ∈ [lo_mult, hi_mult]·length_scale, off the
/// equator so θ-dependent terms are exercised.
pub fn log_grid(m: &dyn MetricProvider, lo_mult: f64, hi_mult: f64, n: usize) -> Vec<Vec<f64>> {
    let scale = m.length_scale();
    let (lo, hi) = (lo_mult * scale, hi_mult * scale);
    let theta = std::f64::consts::FRAC_PI_3;
    (0..n)
        .map(|i| {
            let f = i as f64 / (n - 1).max(1) as f64;
            let r = lo * (hi / lo).powf(f);
            if m.dim() == 2 {
                vec![0.0, r]
            } else {
                vec![0.0, r, theta, 0.3]
            }
        })
        .filter(|x| m.in_domain(x))
        .collect()
}

impl ConsistencyChecker {
    pub fn new(builder: ConnectionBuilder) -> Self {
        Self {
            builder,
            ..Self::default()
        }
    }

    /// Threshold appropriate to the provider's derivative path.
    pub fn threshold_for(&self, m: &dyn MetricProvider, x: &[f64]) -> f64 {
        if m.partial(0, 0, 1, x).is_some() {
            self.exact_threshold
        } else {
            self.fd_threshold
        }
    }

    /// Max normalized |∇_α g_{μν}| at one point.
    ///
    /// The ∂_α g term is measured by a centered difference of the raw
    /// components, never through the provider's analytic `partial`. The
    /// Γ·g terms do use the provider's path, so a wrong analytic
    /// derivative shows up here instead of cancelling out.
    pub fn compatibility_residual(&self, m: &dyn MetricProvider, x: &[f64]) -> Result<f64> {
        let n = m.dim();
        let g = m.metric(x)?;
        let gamma = self.builder.christoffel(m, x)?;
        let r = x[1].abs().max(1e-30);
        let mut worst: f64 = 0.0;
        for alpha in 0..n {
            let h = (VERIFY_REL_STEP * x[alpha].abs()).max(VERIFY_ABS_FLOOR);
            let mut x_plus = x.to_vec();
            let mut x_minus = x.to_vec();
            x_plus[alpha] += h;
            x_minus[alpha] -= h;
            for mu in 0..n {
                for nu in 0..n {
                    let dg = (m.component(mu, nu, &x_plus) - m.component(mu, nu, &x_minus))
                        / (2.0 * h);
                    let mut cov = dg;
                    let mut magnitude = dg.abs();
                    for lam in 0..n {
                        let a = gamma.get(lam, alpha, mu) * g[(lam, nu)];
                        let b = gamma.get(lam, alpha, nu) * g[(mu, lam)];
                        cov -= a + b;
                        magnitude += a.abs() + b.abs();
                    }
                    // Dimensionful floor g/r keeps the ratio meaningful
                    // where the true derivative vanishes.
                    let floor = (g[(mu, mu)].abs() * g[(nu, nu)].abs()).sqrt() / r;
                    worst = worst.max(cov.abs() / (magnitude + floor).max(1e-30));
                }
            }
        }
        Ok(worst)
    }

    /// ∇g = 0 over the sample points.
    pub fn check_compatibility(
        &self,
        m: &dyn MetricProvider,
        points: &[Vec<f64>],
    ) -> Result<CheckResult> {
        let mut worst: f64 = 0.0;
        for x in points {
            worst = worst.max(self.compatibility_residual(m, x)?);
        }
        let threshold = points
            .first()
            .map_or(self.fd_threshold, |x| self.threshold_for(m, x));
        self.gate(CheckResult::measured(
            "metric_compatibility",
            worst,
            threshold,
            format!("max |∇g| over {} points", points.len()),
        ))
    }

    /// ∂_T g_{μν} = 0 over the sample points, by centered difference in T.
    pub fn check_stationarity(
        &self,
        m: &dyn MetricProvider,
        points: &[Vec<f64>],
    ) -> Result<CheckResult> {
        let n = m.dim();
        let mut worst: f64 = 0.0;
        for x in points {
            let h = self.builder.config.step(x[0]);
            let mut x_plus = x.clone();
            let mut x_minus = x.clone();
            x_plus[0] += h;
            x_minus[0] -= h;
            for mu in 0..n {
                for nu in mu..n {
                    let d = (m.component(mu, nu, &x_plus) - m.component(mu, nu, &x_minus))
                        / (2.0 * h);
                    let scale = (m.component(mu, mu, x).abs()
                        * m.component(nu, nu, x).abs())
                    .sqrt()
                    .max(1e-30);
                    worst = worst.max(d.abs() / scale);
                }
            }
        }
        self.gate(CheckResult::measured(
            "stationarity",
            worst,
            self.exact_threshold,
            "max |dg/dT| over sample points",
        ))
    }

    /// g_{μν} = g_{νμ} over the sample points.
    pub fn check_symmetry(
        &self,
        m: &dyn MetricProvider,
        points: &[Vec<f64>],
    ) -> Result<CheckResult> {
        let n = m.dim();
        let mut worst: f64 = 0.0;
        for x in points {
            for mu in 0..n {
                for nu in (mu + 1)..n {
                    let d = m.component(mu, nu, x) - m.component(nu, mu, x);
                    let scale = (m.component(mu, mu, x).abs()
                        * m.component(nu, nu, x).abs())
                    .sqrt()
                    .max(1e-30);
                    worst = worst.max(d.abs() / scale);
                }
            }
        }
        self.gate(CheckResult::measured(
            "index_symmetry",
            worst,
            self.exact_threshold,
            "max |g_munu - g_numu|",
        ))
    }

    /// All consistency checks on a default grid.
    pub fn run_all(&self, m: &dyn MetricProvider, label: &str) -> Result<ValidationReport> {
        let points = log_grid(m, 1.5, 1e4, 40);
        if points.is_empty() {
            return Err(MetricError::Domain {
                point: vec![0.0, 1.5 * m.length_scale()],
            });
        }
        let mut report = ValidationReport::new(label);
        report.push(self.check_compatibility(m, &points)?);
        report.push(self.check_stationarity(m, &points)?);
        report.push(self.check_symmetry(m, &points)?);
        Ok(report)
    }

    fn gate(&self, check: CheckResult) -> Result<CheckResult> {
        if self.assert_mode && check.status == crate::report::CheckStatus::Fail {
            return Err(MetricError::ToleranceExceeded {
                check: check.name,
                value: check.value,
                threshold: check.threshold,
            });
        }
        Ok(check)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curv_metric::constants::M_SUN;
    use curv_metric::families::{DiagonalMetric, Minkowski, Schwarzschild};
    use curv_metric::PhysicalConstants;

    #[test]
    fn test_schwarzschild_compatible() {
        let m = Schwarzschild::new(M_SUN, PhysicalConstants::si());
        let checker = ConsistencyChecker::default();
        let report = checker.run_all(&m, "schwarzschild").unwrap();
        assert!(report.all_green(), "{}", report.report());
    }

    #[test]
    fn test_fd_metric_compatible() {
        // No analytic derivatives anywhere: the builder and the residual use
        // the same finite differences, which must stay consistent.
        let m = DiagonalMetric::two_d(
            PhysicalConstants::geometrized(),
            |r| -(1.0 - 0.3 / r),
            |r| 1.0 + 0.1 / r,
            1.0,
        );
        let checker = ConsistencyChecker::default();
        let points = log_grid(&m, 1.5, 1e3, 25);
        let check = checker.check_compatibility(&m, &points).unwrap();
        assert_eq!(check.status, crate::report::CheckStatus::Pass, "{check:?}");
    }

    #[test]
    fn test_assert_mode_raises() {
        // A deliberately inconsistent provider: analytic partials that do
        // not match the components.
        let m = DiagonalMetric::two_d(PhysicalConstants::geometrized(), |r| -r, |_| 1.0, 1.0)
            .with_derivatives(|_| 123.0, |_| 0.0);
        let checker = ConsistencyChecker {
            assert_mode: true,
            ..ConsistencyChecker::default()
        };
        let points = log_grid(&m, 1.5, 10.0, 5);
        let err = checker.check_compatibility(&m, &points).unwrap_err();
        assert!(matches!(err, MetricError::ToleranceExceeded { .. }));
    }

    #[test]
    fn test_minkowski_stationary_and_symmetric() {
        let m = Minkowski::new(PhysicalConstants::si(), 1.0);
        let checker = ConsistencyChecker::default();
        let points = log_grid(&m, 1.0, 100.0, 10);
        assert_eq!(
            checker.check_stationarity(&m, &points).unwrap().value,
            0.0
        );
        assert_eq!(checker.check_symmetry(&m, &points).unwrap().value, 0.0);
    }
}
