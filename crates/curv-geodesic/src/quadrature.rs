//! Composite quadrature over sampled integrands.

use curv_metric::{MetricError, Result};

/// Quadrature rule for sampled grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrature {
    /// Non-uniform composite trapezoid.
    Trapezoid,
    /// Composite Simpson on a uniform grid; an odd trailing interval is
    /// finished with one trapezoid panel.
    Simpson,
}

impl Quadrature {
    /// ∫ y dx over the sampled grid.
    pub fn integrate(&self, xs: &[f64], ys: &[f64]) -> Result<f64> {
        if xs.len() != ys.len() || xs.len() < 2 {
            return Err(MetricError::Malformed(format!(
                "quadrature grid: {} abscissae, {} ordinates",
                xs.len(),
                ys.len()
            )));
        }
        match self {
            Quadrature::Trapezoid => Ok(trapezoid(xs, ys)),
            Quadrature::Simpson => simpson(xs, ys),
        }
    }
}

fn trapezoid(xs: &[f64], ys: &[f64]) -> f64 {
    let mut total = 0.0;
    for i in 1..xs.len() {
        total += 0.5 * (ys[i] + ys[i - 1]) * (xs[i] - xs[i - 1]);
    }
    total
}

fn simpson(xs: &[f64], ys: &[f64]) -> Result<f64> {
    let n = xs.len();
    let h = xs[1] - xs[0];
    for i in 1..n {
        let hi = xs[i] - xs[i - 1];
        if (hi - h).abs() > 1e-9 * h.abs() {
            return Err(MetricError::Malformed(
                "Simpson quadrature needs a uniform grid".into(),
            ));
        }
    }
    let mut total = 0.0;
    let mut i = 0;
    while i + 2 < n {
        total += h / 3.0 * (ys[i] + 4.0 * ys[i + 1] + ys[i + 2]);
        i += 2;
    }
    if i + 1 < n {
        total += 0.5 * h * (ys[i] + ys[i + 1]);
    }
    Ok(total)
}

/// Running trapezoid integral, one partial sum per grid point.
pub fn cumulative_trapezoid(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(xs.len());
    let mut acc = 0.0;
    out.push(0.0);
    for i in 1..xs.len() {
        acc += 0.5 * (ys[i] + ys[i - 1]) * (xs[i] - xs[i - 1]);
        out.push(acc);
    }
    out
}
