//! Metric providers and physical context for the curv tensor engine.
//!
//! A spacetime metric enters the engine through the [`MetricProvider`] trait:
//! per-index component functions of the coordinates, optional analytic
//! partial derivatives, a characteristic length scale, and a valid-domain
//! predicate. Concrete metric families (Minkowski, Schwarzschild, the
//! diagonal-closure fixture, the lapse/γ-form static family) are parameter
//! structs behind that one trait, so the connection builder, curvature
//! engine, geodesic integrator, and validator are written exactly once.

pub mod constants;
pub mod error;
pub mod families;
pub mod provider;

pub use constants::PhysicalConstants;
pub use error::{MetricError, Result};
pub use families::{DiagonalMetric, LapseMetric, Minkowski, Schwarzschild};
pub use provider::{inverse_metric, MetricProvider, RadialMetric, DET_TOLERANCE};

use nalgebra as na;

/// Dynamic matrix (n×n metric blocks, n = 2 or 4).
pub type DMat = na::DMatrix<f64>;
