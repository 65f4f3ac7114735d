//! Metric families: per-family parameter structs behind [`MetricProvider`].
//!
//! Each family is one struct holding its parameters and the shared
//! [`PhysicalConstants`](crate::PhysicalConstants) context. The tensor and
//! geodesic engines never see the family, only the trait.

mod diagonal;
mod lapse;
mod minkowski;
mod schwarzschild;

pub use diagonal::DiagonalMetric;
pub use lapse::LapseMetric;
pub use minkowski::Minkowski;
pub use schwarzschild::Schwarzschild;

use std::sync::Arc;

/// Radial closure shared by the closure-based families.
pub type RadialFn = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// Standard angular block g_θθ = r², g_φφ = r² sin²θ for 4-coordinate
/// spherically-symmetric metrics. `x = [T, r, θ, φ]`.
pub(crate) fn angular_component(mu: usize, nu: usize, x: &[f64]) -> f64 {
    let (r, theta) = (x[1], x[2]);
    match (mu, nu) {
        (2, 2) => r * r,
        (3, 3) => {
            let s = theta.sin();
            r * r * s * s
        }
        _ => 0.0,
    }
}

/// Analytic partials of the angular block. Exact for every family.
pub(crate) fn angular_partial(mu: usize, nu: usize, alpha: usize, x: &[f64]) -> f64 {
    let (r, theta) = (x[1], x[2]);
    match (mu, nu, alpha) {
        (2, 2, 1) => 2.0 * r,
        (3, 3, 1) => {
            let s = theta.sin();
            2.0 * r * s * s
        }
        (3, 3, 2) => 2.0 * r * r * theta.sin() * theta.cos(),
        _ => 0.0,
    }
}
