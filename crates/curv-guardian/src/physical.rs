//! Batch physical validation of a radial metric.

use crate::compatibility::{log_grid, ConsistencyChecker};
use crate::report::{CheckResult, ValidationReport};
use curv_geodesic::{
    energy_at_rest, integrate_geodesic_equation, null_slope, radial_radicand,
    IntegrationConfig, RungeKutta4,
};
use curv_metric::constants::{R_EARTH, R_GPS};
use curv_metric::{MetricProvider, RadialMetric, Result};

fn recover(name: &str, outcome: Result<CheckResult>) -> CheckResult {
    outcome.unwrap_or_else(|e| CheckResult::errored(name, e.to_string()))
}

/// Emission and observation radii for the experimental redshift check.
/// Defaults to the surface-to-GPS-orbit configuration.
#[derive(Debug, Clone, Copy)]
pub struct RedshiftConfig {
    pub r_emit: f64,
    pub r_obs: f64,
    /// Relative agreement demanded against the weak-field GR value.
    pub tolerance: f64,
}

impl Default for RedshiftConfig {
    fn default() -> Self {
        Self {
            r_emit: R_EARTH,
            r_obs: R_GPS,
            tolerance: 1e-3,
        }
    }
}

/// Runs the full battery of physical checks against one metric and
/// collects a [`ValidationReport`]. Every check always runs; one failure
/// never hides the others.
#[derive(Debug, Clone, Copy)]
pub struct PhysicalValidator {
    pub checker: ConsistencyChecker,
    pub redshift: RedshiftConfig,
    /// Radius multiplier treated as "infinity" for asymptotic flatness.
    pub far_field_mult: f64,
}

impl Default for PhysicalValidator {
    fn default() -> Self {
        Self {
            checker: ConsistencyChecker::default(),
            redshift: RedshiftConfig::default(),
            far_field_mult: 1e6,
        }
    }
}

impl PhysicalValidator {
    /// Validate `m` and label the report with `label`.
    ///
    /// A check whose measurement errors out becomes a `Fail` entry carrying
    /// the error text; the remaining checks still run, so one bad sample
    /// point never hides the rest of the battery.
    pub fn validate<M>(&self, m: &M, label: &str) -> ValidationReport
    where
        M: MetricProvider + RadialMetric,
    {
        let mut report = ValidationReport::new(label);
        let points = log_grid(m, 1.5, 1e4, 40);

        report.push(recover(
            "metric_compatibility",
            self.checker.check_compatibility(m, &points),
        ));
        report.push(recover(
            "stationarity",
            self.checker.check_stationarity(m, &points),
        ));
        report.push(recover(
            "index_symmetry",
            self.checker.check_symmetry(m, &points),
        ));
        report.push(self.check_smoothness(m));
        report.push(self.check_covariance(m));
        report.push(self.check_causality(m));
        report.push(self.check_energy_conservation(m));
        report.push(self.check_asymptotic_flatness(m));
        report.push(self.check_singularity_free(m));
        if let Some(mass) = m.central_mass() {
            report.push(self.check_redshift(m, mass));
        }
        report
    }

    fn radial_grid(&self, m: &dyn RadialMetric, lo_mult: f64, hi_mult: f64, n: usize) -> Vec<f64> {
        let scale = RadialMetric::length_scale(m);
        (0..n)
            .map(|i| {
                let f = i as f64 / (n - 1) as f64;
                lo_mult * scale * (hi_mult / lo_mult).powf(f)
            })
            .collect()
    }

    /// C¹ smoothness of the observable radial profiles.
    ///
    /// Richardson test: the centered derivative at step h and h/2 must
    /// agree to O(h²). A kink or jump turns the disagreement O(1).
    pub fn check_smoothness(&self, m: &dyn RadialMetric) -> CheckResult {
        let mut worst: f64 = 0.0;
        let profiles: [(&str, &dyn Fn(f64) -> f64); 2] = [
            ("time_dilation", &|r| m.time_dilation(r)),
            ("time_coupling", &|r| m.time_coupling(r)),
        ];
        for r in self.radial_grid(m, 2.0, 1e4, 60) {
            for (_, f) in &profiles {
                let h = 1e-4 * r;
                let d1 = (f(r + h) - f(r - h)) / (2.0 * h);
                let d2 = (f(r + 0.5 * h) - f(r - 0.5 * h)) / h;
                let denom = d2.abs() + f(r).abs() / r + 1e-300;
                worst = worst.max((d1 - d2).abs() / denom);
            }
        }
        CheckResult::measured(
            "smoothness",
            worst,
            1e-4,
            "Richardson disagreement of radial profiles",
        )
    }

    /// The family's closed-form time dilation must equal the covariant
    /// √(−g_TT)/c built from the components.
    pub fn check_covariance(&self, m: &dyn RadialMetric) -> CheckResult {
        let c = m.constants().c;
        let mut worst: f64 = 0.0;
        for r in self.radial_grid(m, 1.5, 1e4, 60) {
            let covariant = (-m.g_tt(r)).sqrt() / c;
            let closed = m.time_dilation(r);
            worst = worst.max((covariant - closed).abs() / closed.abs());
        }
        CheckResult::measured(
            "covariance",
            worst,
            1e-9,
            "closed-form vs component time dilation",
        )
    }

    /// Radial coordinate light speed never exceeds c.
    pub fn check_causality(&self, m: &dyn RadialMetric) -> CheckResult {
        let c = m.constants().c;
        let mut worst: f64 = 0.0;
        for r in self.radial_grid(m, 1.5, 1e6, 120) {
            worst = worst.max(null_slope(m, r) / c - 1.0);
        }
        CheckResult::measured(
            "causality",
            worst.max(0.0),
            1e-12,
            "max of |dr/dT|/c - 1 over the grid",
        )
    }

    /// Conserved energy along a short infalling geodesic.
    ///
    /// Integrates the second-order geodesic equations, which do not conserve
    /// E = (−g_TT)·dT/dλ by construction, and measures the worst relative
    /// drift along the samples. Drift above integrator noise means the
    /// radial derivatives are inconsistent with the components.
    pub fn check_energy_conservation(&self, m: &dyn RadialMetric) -> CheckResult {
        let name = "energy_conservation";
        let r0 = 50.0 * RadialMetric::length_scale(m);
        let energy = 1.001 * energy_at_rest(m, r0);
        let rad0 = radial_radicand(m, r0, energy);
        if !rad0.is_finite() || rad0 <= 0.0 {
            return CheckResult::errored(name, format!("no timelike launch at r = {r0:.3e}"));
        }
        // Fall inward through 5% of r0, resolved by 2000 steps.
        let lambda_end = 0.05 * r0 / rad0.sqrt();
        let config = IntegrationConfig {
            step: lambda_end / 2000.0,
            lambda_end,
            max_steps: 10_000,
        };
        match integrate_geodesic_equation(m, r0, energy, -1.0, config, &RungeKutta4) {
            Ok(traj) => CheckResult::measured(
                name,
                traj.energy_drift(m),
                1e-10,
                format!("relative drift of E over {} geodesic samples", traj.len()),
            ),
            Err(e) => CheckResult::errored(name, e.to_string()),
        }
    }

    /// g → Minkowski in the far field.
    pub fn check_asymptotic_flatness(&self, m: &dyn RadialMetric) -> CheckResult {
        let c = m.constants().c;
        let r = self.far_field_mult * RadialMetric::length_scale(m);
        let tt = (m.g_tt(r) / (c * c) + 1.0).abs();
        let rr = (m.g_rr(r) - 1.0).abs();
        CheckResult::measured(
            "asymptotic_flatness",
            tt.max(rr),
            1e-5,
            format!("deviation from flat components at r = {r:.3e}"),
        )
    }

    /// The metric stays finite and non-degenerate all the way down to its
    /// declared domain floor.
    pub fn check_singularity_free(&self, m: &dyn RadialMetric) -> CheckResult {
        let mut bad = 0usize;
        let mut total = 0usize;
        for r in self.radial_grid(m, 1e-3, 1e4, 120) {
            let g_tt = m.g_tt(r);
            let g_rr = m.g_rr(r);
            let in_domain = g_tt.is_finite() && g_rr.is_finite() && g_tt < 0.0 && g_rr > 0.0;
            // Points below the domain floor are excluded, not failed.
            if !in_domain {
                continue;
            }
            total += 1;
            let dilation = m.time_dilation(r);
            if !dilation.is_finite() || dilation <= 0.0 {
                bad += 1;
            }
        }
        let value = if total == 0 { f64::NAN } else { bad as f64 };
        CheckResult::measured(
            "singularity_free",
            value,
            0.0,
            format!("{bad} degenerate of {total} in-domain radii"),
        )
    }

    /// Metric redshift between two radii against the weak-field GR value.
    pub fn check_redshift(&self, m: &dyn RadialMetric, mass: f64) -> CheckResult {
        let cfg = &self.redshift;
        let z_metric = m.redshift_factor(cfg.r_emit, cfg.r_obs) - 1.0;
        let z_ref = m
            .constants()
            .gr_redshift_weak(mass, cfg.r_emit, cfg.r_obs);
        let value = if z_ref == 0.0 {
            z_metric.abs()
        } else {
            (z_metric - z_ref).abs() / z_ref.abs()
        };
        CheckResult::measured(
            "experimental_redshift",
            value,
            cfg.tolerance,
            format!("z_metric = {z_metric:.6e}, weak-field z = {z_ref:.6e}"),
        )
    }
}
