//! Symbolic scalar expressions and the exact-derivative metric backend.
//!
//! [`Expr`] is a small expression tree over coordinate variables: build the
//! metric components symbolically, differentiate them once with
//! [`Expr::diff`], and every downstream partial derivative is exact instead
//! of finite-differenced. [`ExprMetric`] wraps a component table of such
//! expressions as a [`MetricProvider`](curv_metric::MetricProvider), which
//! makes it the reference backend the numeric path is cross-checked against.

pub mod expr;
pub mod metric;

pub use expr::{Expr, UnaryFn};
pub use metric::ExprMetric;
