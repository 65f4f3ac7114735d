//! Christoffel symbols of the second kind from a metric provider.

use crate::derivative::{partial_component, DiffConfig};
use curv_metric::{inverse_metric, MetricProvider, Result, DET_TOLERANCE};

/// One nonzero Γ^ρ_{μν}, stored with μ ≤ ν.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChristoffelEntry {
    pub rho: usize,
    pub mu: usize,
    pub nu: usize,
    pub value: f64,
}

/// Sparse Christoffel symbols at one point.
///
/// Symmetry Γ^ρ_{μν} = Γ^ρ_{νμ} is structural: only the μ ≤ ν half is
/// stored and [`Christoffel::get`] folds the lower indices.
#[derive(Debug, Clone)]
pub struct Christoffel {
    pub dim: usize,
    pub entries: Vec<ChristoffelEntry>,
}

impl Christoffel {
    pub fn get(&self, rho: usize, mu: usize, nu: usize) -> f64 {
        let (mu, nu) = if mu <= nu { (mu, nu) } else { (nu, mu) };
        self.entries
            .iter()
            .find(|e| e.rho == rho && e.mu == mu && e.nu == nu)
            .map_or(0.0, |e| e.value)
    }

    /// Trace Γ^ρ_{μρ} over ρ, one value per μ.
    pub fn contracted(&self) -> Vec<f64> {
        let mut out = vec![0.0; self.dim];
        for (mu, slot) in out.iter_mut().enumerate() {
            for rho in 0..self.dim {
                *slot += self.get(rho, mu, rho);
            }
        }
        out
    }
}

/// Builds Christoffel symbols, using analytic metric partials when the
/// provider has them and clamped centered differences otherwise.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionBuilder {
    pub config: DiffConfig,
    pub det_tolerance: f64,
}

impl Default for ConnectionBuilder {
    fn default() -> Self {
        Self {
            config: DiffConfig::default(),
            det_tolerance: DET_TOLERANCE,
        }
    }
}

impl ConnectionBuilder {
    pub fn new(config: DiffConfig) -> Self {
        Self {
            config,
            det_tolerance: DET_TOLERANCE,
        }
    }

    /// Γ^ρ_{μν} = ½ g^{ρσ} (∂_μ g_{σν} + ∂_ν g_{σμ} − ∂_σ g_{μν}).
    pub fn christoffel(&self, m: &dyn MetricProvider, x: &[f64]) -> Result<Christoffel> {
        let n = m.dim();
        let g = m.metric(x)?;
        let g_inv = inverse_metric(&g, x, self.det_tolerance)?;

        // dg[alpha][mu*n + nu]
        let mut dg = vec![vec![0.0; n * n]; n];
        for (alpha, slice) in dg.iter_mut().enumerate() {
            for mu in 0..n {
                for nu in mu..n {
                    let v = partial_component(m, mu, nu, alpha, x, &self.config)?;
                    slice[mu * n + nu] = v;
                    slice[nu * n + mu] = v;
                }
            }
        }

        let mut entries = Vec::new();
        for rho in 0..n {
            for mu in 0..n {
                for nu in mu..n {
                    let mut sum = 0.0;
                    for sigma in 0..n {
                        sum += g_inv[(rho, sigma)]
                            * (dg[mu][sigma * n + nu] + dg[nu][sigma * n + mu]
                                - dg[sigma][mu * n + nu]);
                    }
                    let value = 0.5 * sum;
                    if value != 0.0 {
                        entries.push(ChristoffelEntry {
                            rho,
                            mu,
                            nu,
                            value,
                        });
                    }
                }
            }
        }
        Ok(Christoffel { dim: n, entries })
    }
}
