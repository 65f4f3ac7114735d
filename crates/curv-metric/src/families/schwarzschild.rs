//! Schwarzschild exterior metric, the vacuum regression fixture.

use super::{angular_component, angular_partial};
use crate::constants::PhysicalConstants;
use crate::provider::{MetricProvider, RadialMetric};

/// Schwarzschild metric g_TT = −(1 − r_s/r)c², g_rr = 1/(1 − r_s/r).
///
/// Known vacuum solution: Ricci and Einstein tensors vanish identically for
/// r ∉ {0, r_s}, which makes this the independent regression check for the
/// curvature engine.
#[derive(Debug, Clone, Copy)]
pub struct Schwarzschild {
    pub constants: PhysicalConstants,
    pub mass: f64,
    r_s: f64,
}

impl Schwarzschild {
    pub fn new(mass: f64, constants: PhysicalConstants) -> Self {
        let r_s = constants.schwarzschild_radius(mass);
        Self {
            constants,
            mass,
            r_s,
        }
    }

    /// Schwarzschild radius r_s = 2GM/c².
    pub fn r_s(&self) -> f64 {
        self.r_s
    }

    /// Lapse factor f(r) = 1 − r_s/r.
    fn lapse(&self, r: f64) -> f64 {
        1.0 - self.r_s / r
    }
}

impl MetricProvider for Schwarzschild {
    fn dim(&self) -> usize {
        4
    }

    fn component(&self, mu: usize, nu: usize, x: &[f64]) -> f64 {
        let r = x[1];
        match (mu, nu) {
            (0, 0) => -self.lapse(r) * self.constants.c * self.constants.c,
            (1, 1) => 1.0 / self.lapse(r),
            _ => angular_component(mu, nu, x),
        }
    }

    fn partial(&self, mu: usize, nu: usize, alpha: usize, x: &[f64]) -> Option<f64> {
        let r = x[1];
        let v = match (mu, nu, alpha) {
            // d/dr [−(1 − r_s/r)c²] = −c² r_s/r²
            (0, 0, 1) => -self.constants.c * self.constants.c * self.r_s / (r * r),
            // d/dr [(1 − r_s/r)⁻¹] = −(r_s/r²)/(1 − r_s/r)²
            (1, 1, 1) => {
                let f = self.lapse(r);
                -self.r_s / (r * r * f * f)
            }
            (0, 0, _) | (1, 1, _) => 0.0,
            _ => angular_partial(mu, nu, alpha, x),
        };
        Some(v)
    }

    fn length_scale(&self) -> f64 {
        self.r_s
    }

    fn in_domain(&self, x: &[f64]) -> bool {
        x[1] > self.r_s
    }
}

impl RadialMetric for Schwarzschild {
    fn constants(&self) -> PhysicalConstants {
        self.constants
    }

    fn g_tt(&self, r: f64) -> f64 {
        -self.lapse(r) * self.constants.c * self.constants.c
    }

    fn g_rr(&self, r: f64) -> f64 {
        1.0 / self.lapse(r)
    }

    fn g_tt_deriv(&self, r: f64) -> f64 {
        -self.constants.c * self.constants.c * self.r_s / (r * r)
    }

    fn g_rr_deriv(&self, r: f64) -> f64 {
        let f = self.lapse(r);
        -self.r_s / (r * r * f * f)
    }

    fn length_scale(&self) -> f64 {
        self.r_s
    }

    fn central_mass(&self) -> Option<f64> {
        Some(self.mass)
    }

    // Closed form, independent of the component path: the covariance check
    // compares this against √(−g_TT)/c.
    fn time_dilation(&self, r: f64) -> f64 {
        self.lapse(r).sqrt()
    }
}
