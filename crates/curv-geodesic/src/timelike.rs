//! Timelike radial geodesics from the conserved energy first integral.

use curv_metric::{MetricError, RadialMetric, Result};

/// Effective potential V(r) = −g_TT(r), in units of c².
///
/// A particle of conserved energy E (per unit mass, times c) moves where
/// E²/V ≥ c²; equality marks a turning point.
pub fn effective_potential(m: &dyn RadialMetric, r: f64) -> f64 {
    -m.g_tt(r)
}

/// Radicand of the radial first integral,
/// (dr/dλ)² = (E²/(−g_TT) − c²) / g_rr.
///
/// Negative values mean the radius is classically forbidden at this energy.
pub fn radial_radicand(m: &dyn RadialMetric, r: f64, energy: f64) -> f64 {
    let c = m.constants().c;
    (energy * energy / -m.g_tt(r) - c * c) / m.g_rr(r)
}

/// Conserved energy of a static release at r (dr/dλ = 0 there):
/// E = c·√(−g_TT(r)).
pub fn energy_at_rest(m: &dyn RadialMetric, r: f64) -> f64 {
    m.constants().c * (-m.g_tt(r)).sqrt()
}

/// One explicit step of a first-order ODE system y' = f(y).
pub trait StepIntegrator {
    fn step(&self, y: &[f64], h: f64, f: &dyn Fn(&[f64]) -> Vec<f64>) -> Vec<f64>;

    fn name(&self) -> &'static str;
}

/// Forward Euler, first order. Kept for convergence baselines.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitEuler;

impl StepIntegrator for ExplicitEuler {
    fn step(&self, y: &[f64], h: f64, f: &dyn Fn(&[f64]) -> Vec<f64>) -> Vec<f64> {
        let dy = f(y);
        y.iter().zip(dy.iter()).map(|(a, b)| a + h * b).collect()
    }

    fn name(&self) -> &'static str {
        "euler"
    }
}

/// Classical fourth-order Runge-Kutta.
#[derive(Debug, Clone, Copy, Default)]
pub struct RungeKutta4;

impl StepIntegrator for RungeKutta4 {
    fn step(&self, y: &[f64], h: f64, f: &dyn Fn(&[f64]) -> Vec<f64>) -> Vec<f64> {
        let k1 = f(y);
        let y2: Vec<f64> = y.iter().zip(&k1).map(|(a, k)| a + 0.5 * h * k).collect();
        let k2 = f(&y2);
        let y3: Vec<f64> = y.iter().zip(&k2).map(|(a, k)| a + 0.5 * h * k).collect();
        let k3 = f(&y3);
        let y4: Vec<f64> = y.iter().zip(&k3).map(|(a, k)| a + h * k).collect();
        let k4 = f(&y4);
        y.iter()
            .enumerate()
            .map(|(i, a)| a + h / 6.0 * (k1[i] + 2.0 * k2[i] + 2.0 * k3[i] + k4[i]))
            .collect()
    }

    fn name(&self) -> &'static str {
        "rk4"
    }
}

/// Affine-parameter span and step for a geodesic integration.
#[derive(Debug, Clone, Copy)]
pub struct IntegrationConfig {
    pub step: f64,
    pub lambda_end: f64,
    /// Hard cap on steps; exceeding it is a `BudgetExhausted` error, not a
    /// silent truncation.
    pub max_steps: usize,
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            step: 1e-3,
            lambda_end: 1.0,
            max_steps: 10_000_000,
        }
    }
}

impl IntegrationConfig {
    fn plan(&self) -> Result<usize> {
        let needed = (self.lambda_end / self.step).ceil() as usize;
        if needed > self.max_steps {
            return Err(MetricError::BudgetExhausted {
                needed,
                budget: self.max_steps,
            });
        }
        Ok(needed)
    }
}

/// Sampled radial trajectory (T(λ), r(λ)) with 4-velocity components.
#[derive(Debug, Clone)]
pub struct Trajectory {
    pub lambda: Vec<f64>,
    pub t: Vec<f64>,
    pub r: Vec<f64>,
    pub v_t: Vec<f64>,
    pub v_r: Vec<f64>,
    pub energy: f64,
    /// True when integration stopped at a turning point rather than at
    /// λ_end.
    pub truncated: bool,
}

impl Trajectory {
    fn push(&mut self, lambda: f64, t: f64, r: f64, v_t: f64, v_r: f64) {
        self.lambda.push(lambda);
        self.t.push(t);
        self.r.push(r);
        self.v_t.push(v_t);
        self.v_r.push(v_r);
    }

    pub fn len(&self) -> usize {
        self.lambda.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lambda.is_empty()
    }

    /// Worst relative drift of the conserved energy E = (−g_TT)·dT/dλ
    /// along the samples. Identically zero on the first-integral path;
    /// meaningful on the geodesic-equation path, where it measures
    /// integrator error.
    pub fn energy_drift(&self, m: &dyn RadialMetric) -> f64 {
        let e0 = self.energy;
        self.r
            .iter()
            .zip(&self.v_t)
            .map(|(&r, &v_t)| ((-m.g_tt(r)) * v_t - e0).abs() / e0.abs())
            .fold(0.0, f64::max)
    }
}

fn new_trajectory(energy: f64) -> Trajectory {
    Trajectory {
        lambda: Vec::new(),
        t: Vec::new(),
        r: Vec::new(),
        v_t: Vec::new(),
        v_r: Vec::new(),
        energy,
        truncated: false,
    }
}

/// Integrate the first-integral system
///
/// ```text
/// dT/dλ = E / (−g_TT),   dr/dλ = sign · √(radicand)
/// ```
///
/// Stops early (flagging `truncated`) when the radicand goes negative,
/// which is the turning point of the motion. `direction` is +1 outward,
/// −1 inward.
pub fn integrate_first_integral(
    m: &dyn RadialMetric,
    r0: f64,
    energy: f64,
    direction: f64,
    config: IntegrationConfig,
    integrator: &dyn StepIntegrator,
) -> Result<Trajectory> {
    let steps = config.plan()?;
    if radial_radicand(m, r0, energy) < 0.0 {
        return Err(MetricError::Domain {
            point: vec![0.0, r0],
        });
    }

    let sign = direction.signum();
    let f = |y: &[f64]| -> Vec<f64> {
        let r = y[1];
        let rad = radial_radicand(m, r, energy);
        let v_r = if rad > 0.0 { sign * rad.sqrt() } else { 0.0 };
        vec![energy / -m.g_tt(r), v_r]
    };

    let mut traj = new_trajectory(energy);
    let mut y = vec![0.0, r0];
    let mut lambda = 0.0;
    let rad0 = radial_radicand(m, r0, energy);
    traj.push(lambda, y[0], y[1], energy / -m.g_tt(r0), sign * rad0.sqrt());

    for _ in 0..steps {
        let y_next = integrator.step(&y, config.step, &f);
        let rad = radial_radicand(m, y_next[1], energy);
        if rad < 0.0 || !y_next[1].is_finite() {
            traj.truncated = true;
            log::debug!(
                "first-integral geodesic truncated at turning point near r = {}",
                y[1]
            );
            break;
        }
        lambda += config.step;
        y = y_next;
        traj.push(lambda, y[0], y[1], energy / -m.g_tt(y[1]), sign * rad.sqrt());
    }
    Ok(traj)
}

/// Integrate the second-order radial geodesic equations
///
/// ```text
/// T'' = −2 Γ^T_{Tr} T' r'
/// r'' = −Γ^r_{TT} T'² − Γ^r_{rr} r'²
/// ```
///
/// with the radial Christoffel symbols taken from g_TT, g_rr and their
/// derivatives. Unlike the first-integral path this does not conserve E by
/// construction, so [`Trajectory::energy_drift`] measures real integrator
/// error here.
pub fn integrate_geodesic_equation(
    m: &dyn RadialMetric,
    r0: f64,
    energy: f64,
    direction: f64,
    config: IntegrationConfig,
    integrator: &dyn StepIntegrator,
) -> Result<Trajectory> {
    let steps = config.plan()?;
    let rad0 = radial_radicand(m, r0, energy);
    if rad0 < 0.0 {
        return Err(MetricError::Domain {
            point: vec![0.0, r0],
        });
    }

    let f = |y: &[f64]| -> Vec<f64> {
        let (r, v_t, v_r) = (y[1], y[2], y[3]);
        let g_tt = m.g_tt(r);
        let g_rr = m.g_rr(r);
        let d_tt = m.g_tt_deriv(r);
        let d_rr = m.g_rr_deriv(r);
        let gamma_t_tr = d_tt / (2.0 * g_tt);
        let gamma_r_tt = -d_tt / (2.0 * g_rr);
        let gamma_r_rr = d_rr / (2.0 * g_rr);
        vec![
            v_t,
            v_r,
            -2.0 * gamma_t_tr * v_t * v_r,
            -gamma_r_tt * v_t * v_t - gamma_r_rr * v_r * v_r,
        ]
    };

    let mut traj = new_trajectory(energy);
    let mut y = vec![0.0, r0, energy / -m.g_tt(r0), direction.signum() * rad0.sqrt()];
    let mut lambda = 0.0;
    traj.push(lambda, y[0], y[1], y[2], y[3]);

    for _ in 0..steps {
        y = integrator.step(&y, config.step, &f);
        if !y[1].is_finite() {
            traj.truncated = true;
            break;
        }
        lambda += config.step;
        traj.push(lambda, y[0], y[1], y[2], y[3]);
    }
    Ok(traj)
}
