//! Finite-difference partials of metric components with coordinate clamping.

use curv_metric::{MetricError, MetricProvider, Result};

/// Keeps finite-difference probes inside the coordinate chart: r stays above
/// `r_min` and θ stays inside (θ_margin, π − θ_margin).
#[derive(Debug, Clone, Copy)]
pub struct CoordinateClamp {
    pub r_min: f64,
    pub theta_margin: f64,
}

impl Default for CoordinateClamp {
    fn default() -> Self {
        Self {
            r_min: 1e-12,
            theta_margin: 1e-9,
        }
    }
}

impl CoordinateClamp {
    /// Clamp coordinate `alpha` of `x` in place. Returns true if anything
    /// moved.
    pub fn apply(&self, alpha: usize, x: &mut [f64]) -> bool {
        let before = x[alpha];
        match alpha {
            1 => x[1] = x[1].max(self.r_min),
            2 if x.len() == 4 => {
                x[2] = x[2]
                    .max(self.theta_margin)
                    .min(std::f64::consts::PI - self.theta_margin)
            }
            _ => {}
        }
        x[alpha] != before
    }
}

/// Step-size policy and clamping for centered differences.
#[derive(Debug, Clone, Copy)]
pub struct DiffConfig {
    /// Relative step, h = rel_step·|x|.
    pub rel_step: f64,
    /// Absolute floor on h near x = 0.
    pub abs_floor: f64,
    pub clamp: CoordinateClamp,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            rel_step: 1e-6,
            abs_floor: 1e-8,
            clamp: CoordinateClamp::default(),
        }
    }
}

impl DiffConfig {
    /// Step size for differencing along a coordinate of magnitude `x`.
    pub fn step(&self, x: f64) -> f64 {
        (self.rel_step * x.abs()).max(self.abs_floor)
    }
}

/// ∂_α g_{μν} at `x`: the provider's analytic partial when it has one,
/// otherwise a centered difference with clamped probe points.
///
/// If one probe lands outside the provider's finite region a one-sided
/// difference is used; if both do, the derivative is reported as a
/// `Differentiation` error.
pub fn partial_component(
    m: &dyn MetricProvider,
    mu: usize,
    nu: usize,
    alpha: usize,
    x: &[f64],
    config: &DiffConfig,
) -> Result<f64> {
    if let Some(v) = m.partial(mu, nu, alpha, x) {
        return Ok(v);
    }

    let h = config.step(x[alpha]);
    let mut x_plus = x.to_vec();
    let mut x_minus = x.to_vec();
    x_plus[alpha] += h;
    x_minus[alpha] -= h;
    let clamped =
        config.clamp.apply(alpha, &mut x_plus) | config.clamp.apply(alpha, &mut x_minus);
    if clamped {
        log::warn!(
            "finite-difference probe clamped at coordinate {alpha} near {:?}",
            x
        );
    }

    let f_plus = m.component(mu, nu, &x_plus);
    let f_minus = m.component(mu, nu, &x_minus);
    let f_0 = m.component(mu, nu, x);

    match (f_plus.is_finite(), f_minus.is_finite()) {
        (true, true) => Ok((f_plus - f_minus) / (x_plus[alpha] - x_minus[alpha])),
        (true, false) if f_0.is_finite() => Ok((f_plus - f_0) / (x_plus[alpha] - x[alpha])),
        (false, true) if f_0.is_finite() => Ok((f_0 - f_minus) / (x[alpha] - x_minus[alpha])),
        _ => Err(MetricError::Differentiation {
            mu,
            nu,
            alpha,
            point: x.to_vec(),
        }),
    }
}
