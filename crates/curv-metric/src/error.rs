//! Error types shared across the curv workspace.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricError {
    #[error("metric singular at {point:?}: |det g| = {det:.3e} below {tolerance:.1e}")]
    SingularMetric {
        point: Vec<f64>,
        det: f64,
        tolerance: f64,
    },

    #[error("finite-difference probes non-finite for g[{mu}][{nu}] along coordinate {alpha} at {point:?}")]
    Differentiation {
        mu: usize,
        nu: usize,
        alpha: usize,
        point: Vec<f64>,
    },

    #[error("evaluation outside declared domain at {point:?}")]
    Domain { point: Vec<f64> },

    #[error("{check}: {value:.3e} exceeds threshold {threshold:.1e}")]
    ToleranceExceeded {
        check: String,
        value: f64,
        threshold: f64,
    },

    #[error("malformed metric: {0}")]
    Malformed(String),

    #[error("evaluation budget exhausted: {needed} component evaluations requested, budget is {budget}")]
    BudgetExhausted { needed: usize, budget: usize },
}

pub type Result<T> = std::result::Result<T, MetricError>;
