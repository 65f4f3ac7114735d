//! Hyperbolic-lapse metrics g_TT = −c²/γ², g_rr = γ² with γ = cosh φ(r).

use super::{angular_component, angular_partial, RadialFn};
use crate::constants::PhysicalConstants;
use crate::provider::{MetricProvider, RadialMetric};
use std::sync::Arc;

/// Metric family parameterized by a radial rapidity profile φ(r):
///
/// ```text
/// γ(r) = cosh φ(r),  β(r) = tanh φ(r)
/// g_TT = −c²/γ²,     g_rr = γ²
/// ```
///
/// The product (−g_TT)·g_rr = c² holds identically, so radial null slopes
/// are |dr/dT| = c/γ² and the light cone closes by a factor sech²φ.
/// The companion coordinate time obeys dt = dT + (βγ²/c) dr.
#[derive(Clone)]
pub struct LapseMetric {
    pub constants: PhysicalConstants,
    phi: RadialFn,
    dphi: Option<RadialFn>,
    scale: f64,
    r_min: f64,
    mass: Option<f64>,
}

impl LapseMetric {
    /// Arbitrary profile. `scale` is the characteristic length; the domain
    /// is r > r_min.
    pub fn new(
        constants: PhysicalConstants,
        phi: impl Fn(f64) -> f64 + Send + Sync + 'static,
        scale: f64,
        r_min: f64,
    ) -> Self {
        Self {
            constants,
            phi: Arc::new(phi),
            dphi: None,
            scale,
            r_min,
            mass: None,
        }
    }

    /// Attach the analytic profile derivative φ'(r).
    pub fn with_derivative(mut self, dphi: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        self.dphi = Some(Arc::new(dphi));
        self
    }

    /// Mass-calibrated profile φ(r) = √(r_s/r) with r_s = 2GM/c².
    ///
    /// Matches the Schwarzschild weak field to first order in r_s/r; the
    /// domain floor keeps the profile finite near the center.
    pub fn calibrated(mass: f64, constants: PhysicalConstants) -> Self {
        let r_s = constants.schwarzschild_radius(mass);
        let r_min = (1e-3 * r_s).max(1.0);
        Self {
            constants,
            phi: Arc::new(move |r: f64| (r_s / r).sqrt()),
            dphi: Some(Arc::new(move |r: f64| -0.5 * (r_s / (r * r * r)).sqrt())),
            scale: r_s,
            r_min,
            mass: Some(mass),
        }
    }

    /// Rapidity profile φ(r).
    pub fn phi(&self, r: f64) -> f64 {
        (self.phi)(r)
    }

    /// φ'(r), analytic when attached, centered difference otherwise.
    pub fn phi_deriv(&self, r: f64) -> f64 {
        match &self.dphi {
            Some(dphi) => dphi(r),
            None => {
                let h = (1e-6 * r.abs()).max(1e-8);
                ((self.phi)(r + h) - (self.phi)(r - h)) / (2.0 * h)
            }
        }
    }

    /// Lapse factor γ(r) = cosh φ(r) ≥ 1.
    pub fn gamma(&self, r: f64) -> f64 {
        self.phi(r).cosh()
    }

    /// Frame-drag velocity fraction β(r) = tanh φ(r) ∈ [0, 1).
    pub fn beta(&self, r: f64) -> f64 {
        self.phi(r).tanh()
    }

    /// Light-cone closing factor sech²φ = |dr/dT|/c for radial null rays.
    pub fn light_cone_closing(&self, r: f64) -> f64 {
        let g = self.gamma(r);
        1.0 / (g * g)
    }
}

impl std::fmt::Debug for LapseMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LapseMetric")
            .field("scale", &self.scale)
            .field("r_min", &self.r_min)
            .field("mass", &self.mass)
            .field("analytic", &self.dphi.is_some())
            .finish()
    }
}

impl MetricProvider for LapseMetric {
    fn dim(&self) -> usize {
        4
    }

    fn component(&self, mu: usize, nu: usize, x: &[f64]) -> f64 {
        let r = x[1];
        let g = self.gamma(r);
        match (mu, nu) {
            (0, 0) => -self.constants.c * self.constants.c / (g * g),
            (1, 1) => g * g,
            _ => angular_component(mu, nu, x),
        }
    }

    fn partial(&self, mu: usize, nu: usize, alpha: usize, x: &[f64]) -> Option<f64> {
        let dphi = self.dphi.as_ref()?;
        let r = x[1];
        let v = match (mu, nu, alpha) {
            // γ' = sinh φ · φ'
            (0, 0, 1) => {
                let g = self.gamma(r);
                let dg = self.phi(r).sinh() * dphi(r);
                2.0 * self.constants.c * self.constants.c * dg / (g * g * g)
            }
            (1, 1, 1) => 2.0 * self.gamma(r) * self.phi(r).sinh() * dphi(r),
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

impl RadialMetric for LapseMetric {
    fn constants(&self) -> PhysicalConstants {
        self.constants
    }

    fn g_tt(&self, r: f64) -> f64 {
        let g = self.gamma(r);
        -self.constants.c * self.constants.c / (g * g)
    }

    fn g_rr(&self, r: f64) -> f64 {
        let g = self.gamma(r);
        g * g
    }

    fn g_tt_deriv(&self, r: f64) -> f64 {
        let g = self.gamma(r);
        let dg = self.phi(r).sinh() * self.phi_deriv(r);
        2.0 * self.constants.c * self.constants.c * dg / (g * g * g)
    }

    fn g_rr_deriv(&self, r: f64) -> f64 {
        2.0 * self.gamma(r) * self.phi(r).sinh() * self.phi_deriv(r)
    }

    fn length_scale(&self) -> f64 {
        self.scale
    }

    fn central_mass(&self) -> Option<f64> {
        self.mass
    }

    fn time_coupling(&self, r: f64) -> f64 {
        let g = self.gamma(r);
        self.beta(r) * g * g / self.constants.c
    }

    // Closed form 1/γ, independent of the component path.
    fn time_dilation(&self, r: f64) -> f64 {
        1.0 / self.gamma(r)
    }
}
