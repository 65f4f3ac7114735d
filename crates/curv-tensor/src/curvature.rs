//! Ricci, Riemann, Einstein and Kretschmann curvature at a point.

use crate::christoffel::{Christoffel, ConnectionBuilder};
use curv_metric::{inverse_metric, DMat, MetricError, MetricProvider, PhysicalConstants, Result};

/// How the engine reaches the Ricci tensor.
///
/// `DirectRicci` contracts during assembly and never materializes the full
/// Riemann tensor; `FullRiemann` builds R^ρ_{σμν} first and contracts it.
/// Both must agree to tight tolerance, which is the engine's own
/// cross-check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurvatureStrategy {
    DirectRicci,
    FullRiemann,
}

/// Riemann tensor R^ρ_{σμν} at one point, dense storage.
#[derive(Debug, Clone)]
pub struct Riemann {
    pub dim: usize,
    data: Vec<f64>,
}

impl Riemann {
    fn zeros(dim: usize) -> Self {
        Self {
            dim,
            data: vec![0.0; dim * dim * dim * dim],
        }
    }

    #[inline]
    fn idx(&self, rho: usize, sigma: usize, mu: usize, nu: usize) -> usize {
        ((rho * self.dim + sigma) * self.dim + mu) * self.dim + nu
    }

    pub fn get(&self, rho: usize, sigma: usize, mu: usize, nu: usize) -> f64 {
        self.data[self.idx(rho, sigma, mu, nu)]
    }

    fn set(&mut self, rho: usize, sigma: usize, mu: usize, nu: usize, v: f64) {
        let i = self.idx(rho, sigma, mu, nu);
        self.data[i] = v;
    }

    /// Ricci contraction R_{σν} = R^ρ_{σρν}.
    pub fn ricci(&self) -> DMat {
        let n = self.dim;
        DMat::from_fn(n, n, |sigma, nu| {
            (0..n).map(|rho| self.get(rho, sigma, rho, nu)).sum()
        })
    }
}

/// Curvature engine over any [`MetricProvider`].
///
/// Christoffel symbols come from the shared [`ConnectionBuilder`]; their
/// coordinate derivatives are centered differences of whole connection
/// evaluations. An optional budget caps connection evaluations per call so
/// runaway configurations fail fast instead of thrashing.
#[derive(Debug, Clone, Copy)]
pub struct CurvatureEngine {
    pub builder: ConnectionBuilder,
    pub strategy: CurvatureStrategy,
    eval_budget: Option<usize>,
}

impl CurvatureEngine {
    pub fn new(strategy: CurvatureStrategy) -> Self {
        Self {
            builder: ConnectionBuilder::default(),
            strategy,
            eval_budget: None,
        }
    }

    pub fn with_builder(mut self, builder: ConnectionBuilder) -> Self {
        self.builder = builder;
        self
    }

    /// Cap connection evaluations per curvature call.
    pub fn with_eval_budget(mut self, budget: usize) -> Self {
        self.eval_budget = Some(budget);
        self
    }

    fn check_budget(&self, needed: usize) -> Result<()> {
        match self.eval_budget {
            Some(budget) if needed > budget => Err(MetricError::BudgetExhausted {
                needed,
                budget,
            }),
            _ => Ok(()),
        }
    }

    /// Connection at `x` plus dense ∂_α Γ for every coordinate.
    ///
    /// Stationary metrics skip the time derivative, which is identically
    /// zero and would otherwise double the evaluation count for nothing.
    fn connection_with_derivatives(
        &self,
        m: &dyn MetricProvider,
        x: &[f64],
    ) -> Result<(Christoffel, Vec<Vec<f64>>)> {
        let n = m.dim();
        let active: Vec<usize> = (0..n).filter(|&a| a != 0 || !m.is_stationary()).collect();
        self.check_budget(1 + 2 * active.len())?;

        let gamma = self.builder.christoffel(m, x)?;
        let mut d_gamma = vec![vec![0.0; n * n * n]; n];
        for &alpha in &active {
            let h = self.builder.config.step(x[alpha]);
            let mut x_plus = x.to_vec();
            let mut x_minus = x.to_vec();
            x_plus[alpha] += h;
            x_minus[alpha] -= h;
            let clamped = self.builder.config.clamp.apply(alpha, &mut x_plus)
                | self.builder.config.clamp.apply(alpha, &mut x_minus);
            if clamped {
                log::warn!("connection derivative probe clamped at coordinate {alpha}");
            }
            let g_plus = dense(&self.builder.christoffel(m, &x_plus)?);
            let g_minus = dense(&self.builder.christoffel(m, &x_minus)?);
            let denom = x_plus[alpha] - x_minus[alpha];
            for (slot, (p, q)) in d_gamma[alpha]
                .iter_mut()
                .zip(g_plus.iter().zip(g_minus.iter()))
            {
                *slot = (p - q) / denom;
            }
        }
        Ok((gamma, d_gamma))
    }

    /// Full Riemann tensor, antisymmetrized in its last index pair.
    pub fn riemann(&self, m: &dyn MetricProvider, x: &[f64]) -> Result<Riemann> {
        let n = m.dim();
        let (gamma, d_gamma) = self.connection_with_derivatives(m, x)?;
        let mut riem = Riemann::zeros(n);
        for rho in 0..n {
            for sigma in 0..n {
                for mu in 0..n {
                    // Antisymmetry R^ρ_{σμν} = −R^ρ_{σνμ} is enforced by
                    // computing the μ < ν half and mirroring.
                    for nu in (mu + 1)..n {
                        let mut v = d_gamma[mu][(rho * n + sigma) * n + nu]
                            - d_gamma[nu][(rho * n + sigma) * n + mu];
                        for lam in 0..n {
                            v += gamma.get(rho, mu, lam) * gamma.get(lam, sigma, nu)
                                - gamma.get(rho, nu, lam) * gamma.get(lam, sigma, mu);
                        }
                        riem.set(rho, sigma, mu, nu, v);
                        riem.set(rho, sigma, nu, mu, -v);
                    }
                }
            }
        }
        Ok(riem)
    }

    /// Ricci tensor by the configured strategy.
    pub fn ricci(&self, m: &dyn MetricProvider, x: &[f64]) -> Result<DMat> {
        match self.strategy {
            CurvatureStrategy::FullRiemann => Ok(self.riemann(m, x)?.ricci()),
            CurvatureStrategy::DirectRicci => {
                let n = m.dim();
                let (gamma, d_gamma) = self.connection_with_derivatives(m, x)?;
                let trace = gamma.contracted();
                let mut ricci = DMat::zeros(n, n);
                for mu in 0..n {
                    for nu in mu..n {
                        // R_{μν} = ∂_ρ Γ^ρ_{μν} − ∂_ν Γ^ρ_{μρ}
                        //        + Γ^ρ_{ρλ} Γ^λ_{μν} − Γ^ρ_{νλ} Γ^λ_{μρ}
                        let mut v = 0.0;
                        for rho in 0..n {
                            v += d_gamma[rho][(rho * n + mu) * n + nu]
                                - d_gamma[nu][(rho * n + mu) * n + rho];
                        }
                        for lam in 0..n {
                            v += trace[lam] * gamma.get(lam, mu, nu);
                            for rho in 0..n {
                                v -= gamma.get(rho, nu, lam) * gamma.get(lam, mu, rho);
                            }
                        }
                        ricci[(mu, nu)] = v;
                        ricci[(nu, mu)] = v;
                    }
                }
                Ok(ricci)
            }
        }
    }

    /// Scalar curvature R = g^{μν} R_{μν}.
    pub fn scalar(&self, m: &dyn MetricProvider, x: &[f64]) -> Result<f64> {
        let g = m.metric(x)?;
        let g_inv = inverse_metric(&g, x, self.builder.det_tolerance)?;
        let ricci = self.ricci(m, x)?;
        Ok((g_inv * ricci).trace())
    }

    /// Einstein tensor G_{μν} = R_{μν} − ½ g_{μν} R.
    pub fn einstein(&self, m: &dyn MetricProvider, x: &[f64]) -> Result<DMat> {
        let g = m.metric(x)?;
        let g_inv = inverse_metric(&g, x, self.builder.det_tolerance)?;
        let ricci = self.ricci(m, x)?;
        let scalar = (&g_inv * &ricci).trace();
        Ok(&ricci - &g * (0.5 * scalar))
    }

    /// Mixed Einstein tensor G^μ_ν = g^{μα} G_{αν}.
    ///
    /// Mixed components are the dimensionless form the vacuum thresholds
    /// apply to; the lowered g_TT row carries a c⁴ scale that would swamp
    /// any absolute tolerance.
    pub fn einstein_mixed(&self, m: &dyn MetricProvider, x: &[f64]) -> Result<DMat> {
        let g = m.metric(x)?;
        let g_inv = inverse_metric(&g, x, self.builder.det_tolerance)?;
        let lowered = self.einstein(m, x)?;
        Ok(g_inv * lowered)
    }

    /// Kretschmann invariant K = R_{ρσμν} R^{ρσμν}.
    pub fn kretschmann(&self, m: &dyn MetricProvider, x: &[f64]) -> Result<f64> {
        let n = m.dim();
        let g = m.metric(x)?;
        let g_inv = inverse_metric(&g, x, self.builder.det_tolerance)?;
        let riem = self.riemann(m, x)?;

        // Lower the first index, then raise all four on the copy.
        let mut low = Riemann::zeros(n);
        for rho in 0..n {
            for sigma in 0..n {
                for mu in 0..n {
                    for nu in 0..n {
                        let mut v = 0.0;
                        for a in 0..n {
                            v += g[(rho, a)] * riem.get(a, sigma, mu, nu);
                        }
                        low.set(rho, sigma, mu, nu, v);
                    }
                }
            }
        }
        let mut up = low.clone();
        for pos in 0..4 {
            let prev = up.clone();
            for rho in 0..n {
                for sigma in 0..n {
                    for mu in 0..n {
                        for nu in 0..n {
                            let mut v = 0.0;
                            for a in 0..n {
                                let idx = [rho, sigma, mu, nu];
                                let mut src = idx;
                                src[pos] = a;
                                v += g_inv[(idx[pos], a)]
                                    * prev.get(src[0], src[1], src[2], src[3]);
                            }
                            up.set(rho, sigma, mu, nu, v);
                        }
                    }
                }
            }
        }

        let mut k = 0.0;
        for i in 0..low.data.len() {
            k += low.data[i] * up.data[i];
        }
        Ok(k)
    }

    /// Max absolute difference between the two Ricci strategies at `x`.
    pub fn cross_check(&self, m: &dyn MetricProvider, x: &[f64]) -> Result<f64> {
        let direct = Self::new(CurvatureStrategy::DirectRicci)
            .with_builder(self.builder)
            .ricci(m, x)?;
        let contracted = Self::new(CurvatureStrategy::FullRiemann)
            .with_builder(self.builder)
            .ricci(m, x)?;
        Ok((direct - contracted).abs().max())
    }

    /// Residual of the two-dimensional identity R_{μν} = ½ g_{μν} R.
    ///
    /// Every 2-coordinate block satisfies it exactly, so the residual is a
    /// pure measure of the engine's numerical error.
    pub fn two_d_identity_residual(&self, m: &dyn MetricProvider, x: &[f64]) -> Result<f64> {
        let g = m.metric(x)?;
        let ricci = self.ricci(m, x)?;
        let g_inv = inverse_metric(&g, x, self.builder.det_tolerance)?;
        let scalar = (&g_inv * &ricci).trace();
        Ok((ricci - g * (0.5 * scalar)).abs().max())
    }
}

/// Exact Schwarzschild Kretschmann invariant 12 r_s²/r⁶, the regression
/// reference for [`CurvatureEngine::kretschmann`].
pub fn kretschmann_schwarzschild(r_s: f64, r: f64) -> f64 {
    12.0 * r_s * r_s / r.powi(6)
}

/// Far-field Kretschmann estimate 48 G²M²/(c⁴ r⁶) for a central mass.
///
/// Equals [`kretschmann_schwarzschild`] with r_s = 2GM/c²; for a general
/// static metric of mass M it is the leading order in r_s/r.
pub fn kretschmann_weak_field(mass: f64, constants: PhysicalConstants, r: f64) -> f64 {
    let gm = constants.g * mass;
    48.0 * gm * gm / (constants.c.powi(4) * r.powi(6))
}

fn dense(gamma: &Christoffel) -> Vec<f64> {
    let n = gamma.dim;
    let mut out = vec![0.0; n * n * n];
    for e in &gamma.entries {
        out[(e.rho * n + e.mu) * n + e.nu] = e.value;
        out[(e.rho * n + e.nu) * n + e.mu] = e.value;
    }
    out
}
