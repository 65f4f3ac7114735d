//! Connection and curvature tensors for any [`MetricProvider`](curv_metric::MetricProvider).
//!
//! The pipeline is metric → Christoffel symbols → curvature: the
//! [`ConnectionBuilder`] assembles Γ^ρ_{μν} from analytic or
//! finite-difference metric partials, and the [`CurvatureEngine`] turns
//! connections into Ricci, Riemann, Einstein and Kretschmann quantities.
//! Nothing here knows which metric family it is looking at.

pub mod christoffel;
pub mod curvature;
pub mod derivative;

pub use christoffel::{Christoffel, ChristoffelEntry, ConnectionBuilder};
pub use curvature::{
    kretschmann_schwarzschild, kretschmann_weak_field, CurvatureEngine, CurvatureStrategy,
    Riemann,
};
pub use derivative::{partial_component, CoordinateClamp, DiffConfig};
