//! Scalar expression tree with evaluation, differentiation, simplification.

use std::fmt;
use std::sync::Arc;

/// Unary elementary functions the metric families need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryFn {
    Sqrt,
    Ln,
    Exp,
    Sin,
    Cos,
    Sinh,
    Cosh,
    Tanh,
}

impl UnaryFn {
    fn apply(self, u: f64) -> f64 {
        match self {
            UnaryFn::Sqrt => u.sqrt(),
            UnaryFn::Ln => u.ln(),
            UnaryFn::Exp => u.exp(),
            UnaryFn::Sin => u.sin(),
            UnaryFn::Cos => u.cos(),
            UnaryFn::Sinh => u.sinh(),
            UnaryFn::Cosh => u.cosh(),
            UnaryFn::Tanh => u.tanh(),
        }
    }

    fn name(self) -> &'static str {
        match self {
            UnaryFn::Sqrt => "sqrt",
            UnaryFn::Ln => "ln",
            UnaryFn::Exp => "exp",
            UnaryFn::Sin => "sin",
            UnaryFn::Cos => "cos",
            UnaryFn::Sinh => "sinh",
            UnaryFn::Cosh => "cosh",
            UnaryFn::Tanh => "tanh",
        }
    }
}

/// Immutable expression node. Children are shared via `Arc`, so cloning a
/// subtree is cheap and derivatives can reuse the operands they came from.
#[derive(Debug, Clone)]
pub enum Expr {
    Const(f64),
    /// Coordinate variable by index into the evaluation point.
    Var(usize),
    Add(Arc<Expr>, Arc<Expr>),
    Sub(Arc<Expr>, Arc<Expr>),
    Mul(Arc<Expr>, Arc<Expr>),
    Div(Arc<Expr>, Arc<Expr>),
    Neg(Arc<Expr>),
    /// Integer power, including negative exponents.
    Powi(Arc<Expr>, i32),
    Unary(UnaryFn, Arc<Expr>),
}

impl Expr {
    pub fn c(v: f64) -> Self {
        Expr::Const(v)
    }

    pub fn var(i: usize) -> Self {
        Expr::Var(i)
    }

    pub fn powi(self, n: i32) -> Self {
        Expr::Powi(Arc::new(self), n)
    }

    pub fn sqrt(self) -> Self {
        Expr::Unary(UnaryFn::Sqrt, Arc::new(self))
    }

    pub fn ln(self) -> Self {
        Expr::Unary(UnaryFn::Ln, Arc::new(self))
    }

    pub fn exp(self) -> Self {
        Expr::Unary(UnaryFn::Exp, Arc::new(self))
    }

    pub fn sin(self) -> Self {
        Expr::Unary(UnaryFn::Sin, Arc::new(self))
    }

    pub fn cos(self) -> Self {
        Expr::Unary(UnaryFn::Cos, Arc::new(self))
    }

    pub fn sinh(self) -> Self {
        Expr::Unary(UnaryFn::Sinh, Arc::new(self))
    }

    pub fn cosh(self) -> Self {
        Expr::Unary(UnaryFn::Cosh, Arc::new(self))
    }

    pub fn tanh(self) -> Self {
        Expr::Unary(UnaryFn::Tanh, Arc::new(self))
    }

    /// Evaluate at the point `vars`; `Var(i)` reads `vars[i]`.
    pub fn eval(&self, vars: &[f64]) -> f64 {
        match self {
            Expr::Const(v) => *v,
            Expr::Var(i) => vars[*i],
            Expr::Add(a, b) => a.eval(vars) + b.eval(vars),
            Expr::Sub(a, b) => a.eval(vars) - b.eval(vars),
            Expr::Mul(a, b) => a.eval(vars) * b.eval(vars),
            Expr::Div(a, b) => a.eval(vars) / b.eval(vars),
            Expr::Neg(a) => -a.eval(vars),
            Expr::Powi(a, n) => a.eval(vars).powi(*n),
            Expr::Unary(f, a) => f.apply(a.eval(vars)),
        }
    }

    /// Exact derivative with respect to variable `var`.
    ///
    /// The result is not simplified; call [`Expr::simplify`] on it.
    pub fn diff(&self, var: usize) -> Expr {
        match self {
            Expr::Const(_) => Expr::Const(0.0),
            Expr::Var(i) => Expr::Const(if *i == var { 1.0 } else { 0.0 }),
            Expr::Add(a, b) => a.diff(var) + b.diff(var),
            Expr::Sub(a, b) => a.diff(var) - b.diff(var),
            Expr::Mul(a, b) => {
                a.diff(var) * b.as_ref().clone() + a.as_ref().clone() * b.diff(var)
            }
            Expr::Div(a, b) => {
                (a.diff(var) * b.as_ref().clone() - a.as_ref().clone() * b.diff(var))
                    / b.as_ref().clone().powi(2)
            }
            Expr::Neg(a) => -a.diff(var),
            Expr::Powi(a, n) => {
                Expr::c(*n as f64) * a.as_ref().clone().powi(n - 1) * a.diff(var)
            }
            Expr::Unary(f, a) => {
                let u = a.as_ref().clone();
                let du = a.diff(var);
                let outer = match f {
                    UnaryFn::Sqrt => Expr::c(0.5) / u.sqrt(),
                    UnaryFn::Ln => Expr::c(1.0) / u,
                    UnaryFn::Exp => u.exp(),
                    UnaryFn::Sin => u.cos(),
                    UnaryFn::Cos => -u.sin(),
                    UnaryFn::Sinh => u.cosh(),
                    UnaryFn::Cosh => u.sinh(),
                    // d tanh = sech² = 1/cosh²
                    UnaryFn::Tanh => Expr::c(1.0) / u.cosh().powi(2),
                };
                outer * du
            }
        }
    }

    /// Constant folding and unit/zero identity elimination, bottom-up.
    pub fn simplify(&self) -> Expr {
        match self {
            Expr::Const(_) | Expr::Var(_) => self.clone(),
            Expr::Add(a, b) => match (a.simplify(), b.simplify()) {
                (Expr::Const(x), Expr::Const(y)) => Expr::Const(x + y),
                (Expr::Const(x), b) if x == 0.0 => b,
                (a, Expr::Const(y)) if y == 0.0 => a,
                (a, b) => Expr::Add(Arc::new(a), Arc::new(b)),
            },
            Expr::Sub(a, b) => match (a.simplify(), b.simplify()) {
                (Expr::Const(x), Expr::Const(y)) => Expr::Const(x - y),
                (a, Expr::Const(y)) if y == 0.0 => a,
                (Expr::Const(x), b) if x == 0.0 => Expr::Neg(Arc::new(b)),
                (a, b) => Expr::Sub(Arc::new(a), Arc::new(b)),
            },
            Expr::Mul(a, b) => match (a.simplify(), b.simplify()) {
                (Expr::Const(x), Expr::Const(y)) => Expr::Const(x * y),
                (Expr::Const(x), _) | (_, Expr::Const(x)) if x == 0.0 => Expr::Const(0.0),
                (Expr::Const(x), b) if x == 1.0 => b,
                (a, Expr::Const(y)) if y == 1.0 => a,
                (Expr::Const(x), b) if x == -1.0 => Expr::Neg(Arc::new(b)),
                (a, Expr::Const(y)) if y == -1.0 => Expr::Neg(Arc::new(a)),
                (a, b) => Expr::Mul(Arc::new(a), Arc::new(b)),
            },
            Expr::Div(a, b) => match (a.simplify(), b.simplify()) {
                (Expr::Const(x), Expr::Const(y)) if y != 0.0 => Expr::Const(x / y),
                (Expr::Const(x), _) if x == 0.0 => Expr::Const(0.0),
                (a, Expr::Const(y)) if y == 1.0 => a,
                (a, b) => Expr::Div(Arc::new(a), Arc::new(b)),
            },
            Expr::Neg(a) => match a.simplify() {
                Expr::Const(x) => Expr::Const(-x),
                Expr::Neg(inner) => inner.as_ref().clone(),
                a => Expr::Neg(Arc::new(a)),
            },
            Expr::Powi(a, n) => match (a.simplify(), *n) {
                (_, 0) => Expr::Const(1.0),
                (a, 1) => a,
                (Expr::Const(x), n) => Expr::Const(x.powi(n)),
                (a, n) => Expr::Powi(Arc::new(a), n),
            },
            Expr::Unary(f, a) => match a.simplify() {
                Expr::Const(x) => Expr::Const(f.apply(x)),
                a => Expr::Unary(*f, Arc::new(a)),
            },
        }
    }

    /// True when the expression folds to the literal zero.
    pub fn is_zero(&self) -> bool {
        matches!(self.simplify(), Expr::Const(v) if v == 0.0)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Const(v) => write!(f, "{v}"),
            Expr::Var(i) => write!(f, "x{i}"),
            Expr::Add(a, b) => write!(f, "({a} + {b})"),
            Expr::Sub(a, b) => write!(f, "({a} - {b})"),
            Expr::Mul(a, b) => write!(f, "({a} * {b})"),
            Expr::Div(a, b) => write!(f, "({a} / {b})"),
            Expr::Neg(a) => write!(f, "(-{a})"),
            Expr::Powi(a, n) => write!(f, "{a}^{n}"),
            Expr::Unary(func, a) => write!(f, "{}({a})", func.name()),
        }
    }
}

impl std::ops::Add for Expr {
    type Output = Expr;
    fn add(self, rhs: Expr) -> Expr {
        Expr::Add(Arc::new(self), Arc::new(rhs))
    }
}

impl std::ops::Sub for Expr {
    type Output = Expr;
    fn sub(self, rhs: Expr) -> Expr {
        Expr::Sub(Arc::new(self), Arc::new(rhs))
    }
}

impl std::ops::Mul for Expr {
    type Output = Expr;
    fn mul(self, rhs: Expr) -> Expr {
        Expr::Mul(Arc::new(self), Arc::new(rhs))
    }
}

impl std::ops::Div for Expr {
    type Output = Expr;
    fn div(self, rhs: Expr) -> Expr {
        Expr::Div(Arc::new(self), Arc::new(rhs))
    }
}

impl std::ops::Neg for Expr {
    type Output = Expr;
    fn neg(self) -> Expr {
        Expr::Neg(Arc::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_polynomial_derivative() {
        // d/dx (3x² + 2x + 1) = 6x + 2
        let x = Expr::var(0);
        let e = Expr::c(3.0) * x.clone().powi(2) + Expr::c(2.0) * x + Expr::c(1.0);
        let d = e.diff(0).simplify();
        assert_relative_eq!(d.eval(&[2.0]), 14.0);
        assert_relative_eq!(d.eval(&[-1.5]), -7.0);
    }

    #[test]
    fn test_chain_rule_sqrt() {
        // d/dr sqrt(a/r) = -a / (2 r² sqrt(a/r))
        let a = 3.0;
        let e = (Expr::c(a) / Expr::var(0)).sqrt();
        let d = e.diff(0).simplify();
        let r = 2.0;
        let expected = -a / (2.0 * r * r * (a / r).sqrt());
        assert_relative_eq!(d.eval(&[r]), expected, max_relative = 1e-14);
    }

    #[test]
    fn test_tanh_derivative() {
        let e = Expr::var(0).tanh();
        let d = e.diff(0).simplify();
        let x = 0.7;
        assert_relative_eq!(d.eval(&[x]), 1.0 / x.cosh().powi(2), max_relative = 1e-14);
    }

    #[test]
    fn test_negative_power_derivative() {
        // d/dx x⁻² = -2 x⁻³
        let d = Expr::var(0).powi(-2).diff(0).simplify();
        assert_relative_eq!(d.eval(&[2.0]), -0.25);
    }

    #[test]
    fn test_simplify_folds_constants() {
        let e = (Expr::c(2.0) + Expr::c(3.0)) * Expr::var(0) + Expr::c(0.0);
        match e.simplify() {
            Expr::Mul(a, _) => assert!(matches!(*a, Expr::Const(v) if v == 5.0)),
            other => panic!("expected Mul, got {other}"),
        }
    }

    #[test]
    fn test_derivative_wrt_other_variable_is_zero() {
        let e = Expr::var(1).powi(2).sqrt() * Expr::c(4.0);
        assert!(e.diff(0).is_zero());
    }

    proptest! {
        #[test]
        fn prop_diff_matches_finite_difference(x in 0.5f64..50.0) {
            // sin(x)·sqrt(x) + x⁻¹, derivative checked against a centered
            // difference at random points.
            let e = Expr::var(0).sin() * Expr::var(0).sqrt() + Expr::var(0).powi(-1);
            let d = e.diff(0).simplify();
            let h = 1e-6 * x;
            let fd = (e.eval(&[x + h]) - e.eval(&[x - h])) / (2.0 * h);
            prop_assert!((d.eval(&[x]) - fd).abs() < 1e-5 * (1.0 + fd.abs()));
        }

        #[test]
        fn prop_simplify_preserves_value(x in -10.0f64..10.0, a in -5.0f64..5.0) {
            let e = (Expr::c(a) * Expr::var(0) + Expr::c(0.0)) * Expr::c(1.0)
                - Expr::c(0.0) * Expr::var(0);
            let s = e.simplify();
            let v0 = e.eval(&[x]);
            let v1 = s.eval(&[x]);
            prop_assert!((v0 - v1).abs() <= 1e-12 * (1.0 + v0.abs()));
        }
    }
}
