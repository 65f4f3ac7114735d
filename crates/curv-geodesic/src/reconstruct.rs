//! Reconstruction of companion coordinate time along a trajectory.

use crate::timelike::Trajectory;
use curv_metric::RadialMetric;

/// Rebuild the off-diagonal coordinate time t along a trajectory sampled in
/// the diagonal chart, from dt = dT + f(r)·dr with f the metric's
/// [`time_coupling`](RadialMetric::time_coupling).
///
/// Each segment uses the trapezoid average of f at its endpoints, so the
/// result is exact for affine f and second-order accurate otherwise. For a
/// metric with zero coupling this returns T unchanged.
pub fn reconstruct_time(m: &dyn RadialMetric, traj: &Trajectory) -> Vec<f64> {
    let mut out = Vec::with_capacity(traj.len());
    if traj.is_empty() {
        return out;
    }
    let mut t = traj.t[0];
    out.push(t);
    for i in 1..traj.len() {
        let d_cap_t = traj.t[i] - traj.t[i - 1];
        let dr = traj.r[i] - traj.r[i - 1];
        let f_avg = 0.5 * (m.time_coupling(traj.r[i - 1]) + m.time_coupling(traj.r[i]));
        t += d_cap_t + f_avg * dr;
        out.push(t);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timelike::{
        energy_at_rest, integrate_first_integral, IntegrationConfig, RungeKutta4,
    };
    use approx::assert_relative_eq;
    use curv_metric::constants::M_SUN;
    use curv_metric::families::{LapseMetric, Minkowski};
    use curv_metric::PhysicalConstants;

    #[test]
    fn test_zero_coupling_is_identity() {
        let m = Minkowski::new(PhysicalConstants::geometrized(), 1.0);
        let config = IntegrationConfig {
            step: 1e-2,
            lambda_end: 1.0,
            max_steps: 1_000,
        };
        let traj = integrate_first_integral(&m, 5.0, 1.5, 1.0, config, &RungeKutta4).unwrap();
        let t = reconstruct_time(&m, &traj);
        for (a, b) in t.iter().zip(&traj.t) {
            assert_relative_eq!(a, b);
        }
    }

    #[test]
    fn test_lapse_infall_time_lags() {
        // Inward motion, f = βγ²/c > 0 and dr < 0: reconstructed t lags T.
        let m = LapseMetric::calibrated(M_SUN, PhysicalConstants::si());
        let r0 = 2000.0 * m.length_scale();
        let e = 1.00001 * energy_at_rest(&m, r0);
        let config = IntegrationConfig {
            step: 1e-3,
            lambda_end: 0.2,
            max_steps: 10_000,
        };
        let traj = integrate_first_integral(&m, r0, e, -1.0, config, &RungeKutta4).unwrap();
        let t = reconstruct_time(&m, &traj);
        let last = traj.len() - 1;
        assert!(traj.r[last] < r0);
        assert!(t[last] < traj.t[last]);
    }
}
