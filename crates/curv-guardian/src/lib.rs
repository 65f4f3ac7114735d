//! Validation guardian: consistency checks and physical acceptance tests.
//!
//! [`ConsistencyChecker`] verifies the connection against the metric it was
//! built from (∇g = 0, stationarity, index symmetry). [`PhysicalValidator`]
//! layers the physics on top: smoothness, covariance, causality, energy
//! conservation along a geodesic, asymptotic flatness, singularity freedom
//! and the experimental redshift comparison, all collected into a
//! serializable [`ValidationReport`] that never stops at the first failure.

pub mod compatibility;
pub mod physical;
pub mod report;

pub use compatibility::{log_grid, ConsistencyChecker};
pub use physical::{PhysicalValidator, RedshiftConfig};
pub use report::{CheckResult, CheckStatus, ValidationReport};
