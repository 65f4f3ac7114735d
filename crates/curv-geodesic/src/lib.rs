//! Radial geodesics for static spherically-symmetric metrics.
//!
//! Null rays reduce to a slope field dr/dT = ±√(−g_TT/g_rr) and a
//! quadrature for time of flight; timelike motion comes from the conserved
//! energy first integral, or from the second-order geodesic equations when
//! integrator error itself is under test. Coordinate time in an
//! off-diagonal companion chart is rebuilt from the metric's time-coupling
//! function after the fact.

pub mod null;
pub mod quadrature;
pub mod reconstruct;
pub mod timelike;
pub mod turning;

pub use null::{null_slope, time_of_flight};
pub use quadrature::{cumulative_trapezoid, Quadrature};
pub use reconstruct::reconstruct_time;
pub use timelike::{
    effective_potential, energy_at_rest, integrate_first_integral,
    integrate_geodesic_equation, radial_radicand, ExplicitEuler, IntegrationConfig,
    RungeKutta4, StepIntegrator, Trajectory,
};
pub use turning::turning_points;
