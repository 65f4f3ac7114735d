//! Umbrella crate: one `use curv::...` for the whole engine.
//!
//! Re-exports the metric providers and families, the symbolic backend, the
//! connection and curvature engines, the geodesic integrators and the
//! validation guardian.
//!
//! # Example
//!
//! ```
//! use curv::{
//!     CurvatureEngine, CurvatureStrategy, PhysicalConstants, PhysicalValidator,
//!     Schwarzschild,
//! };
//!
//! let metric = Schwarzschild::new(curv::constants::M_SUN, PhysicalConstants::si());
//! let engine = CurvatureEngine::new(CurvatureStrategy::DirectRicci);
//! let x = [0.0, 10.0 * metric.r_s(), std::f64::consts::FRAC_PI_2, 0.0];
//! let g_mixed = engine.einstein_mixed(&metric, &x).unwrap();
//! assert!(g_mixed.abs().max() < 1e-10);
//!
//! let report = PhysicalValidator::default().validate(&metric, "schwarzschild");
//! assert!(report.all_green());
//! ```

pub use curv_metric::constants;
pub use curv_metric::{
    inverse_metric, DiagonalMetric, DMat, LapseMetric, MetricError, MetricProvider,
    Minkowski, PhysicalConstants, RadialMetric, Result, Schwarzschild, DET_TOLERANCE,
};

pub use curv_expr::{Expr, ExprMetric, UnaryFn};

pub use curv_tensor::{
    kretschmann_schwarzschild, kretschmann_weak_field, partial_component, Christoffel,
    ChristoffelEntry, ConnectionBuilder, CoordinateClamp, CurvatureEngine, CurvatureStrategy,
    DiffConfig, Riemann,
};

pub use curv_geodesic::{
    cumulative_trapezoid, effective_potential, energy_at_rest, integrate_first_integral,
    integrate_geodesic_equation, null_slope, radial_radicand, reconstruct_time,
    time_of_flight, turning_points, ExplicitEuler, IntegrationConfig, Quadrature,
    RungeKutta4, StepIntegrator, Trajectory,
};

pub use curv_guardian::{
    log_grid, CheckResult, CheckStatus, ConsistencyChecker, PhysicalValidator,
    RedshiftConfig, ValidationReport,
};
