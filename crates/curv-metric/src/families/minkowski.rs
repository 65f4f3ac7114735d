//! Flat spacetime in spherical coordinates.

use super::{angular_component, angular_partial};
use crate::constants::PhysicalConstants;
use crate::provider::{MetricProvider, RadialMetric};

/// Minkowski metric diag(−c², 1, r², r² sin²θ).
///
/// The flat reference every curvature and causality check compares against.
#[derive(Debug, Clone, Copy)]
pub struct Minkowski {
    pub constants: PhysicalConstants,
    /// Characteristic length for sampling (flat space has no intrinsic one).
    pub scale: f64,
}

impl Minkowski {
    pub fn new(constants: PhysicalConstants, scale: f64) -> Self {
        Self { constants, scale }
    }
}

impl MetricProvider for Minkowski {
    fn dim(&self) -> usize {
        4
    }

    fn component(&self, mu: usize, nu: usize, x: &[f64]) -> f64 {
        match (mu, nu) {
            (0, 0) => -self.constants.c * self.constants.c,
            (1, 1) => 1.0,
            _ => angular_component(mu, nu, x),
        }
    }

    fn partial(&self, mu: usize, nu: usize, alpha: usize, x: &[f64]) -> Option<f64> {
        Some(angular_partial(mu, nu, alpha, x))
    }

    fn length_scale(&self) -> f64 {
        self.scale
    }

    fn in_domain(&self, x: &[f64]) -> bool {
        x[1] > 0.0
    }
}

impl RadialMetric for Minkowski {
    fn constants(&self) -> PhysicalConstants {
        self.constants
    }

    fn g_tt(&self, _r: f64) -> f64 {
        -self.constants.c * self.constants.c
    }

    fn g_rr(&self, _r: f64) -> f64 {
        1.0
    }

    fn g_tt_deriv(&self, _r: f64) -> f64 {
        0.0
    }

    fn g_rr_deriv(&self, _r: f64) -> f64 {
        0.0
    }

    fn length_scale(&self) -> f64 {
        self.scale
    }
}
