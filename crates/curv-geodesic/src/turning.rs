//! Turning points of the radial first integral on a sampled grid.

use crate::timelike::radial_radicand;
use curv_metric::{MetricError, RadialMetric, Result};

/// All radii in the grid where the radial radicand changes sign, located by
/// linear interpolation between the bracketing samples.
///
/// Every crossing is reported, so a potential well yields both walls and a
/// single barrier yields its two faces. An exact zero at a grid point is
/// returned once.
pub fn turning_points(m: &dyn RadialMetric, energy: f64, r_grid: &[f64]) -> Result<Vec<f64>> {
    if r_grid.len() < 2 {
        return Err(MetricError::Malformed(
            "turning point scan needs at least two radii".into(),
        ));
    }
    let mut points = Vec::new();
    let mut prev_r = r_grid[0];
    let mut prev_v = radial_radicand(m, prev_r, energy);
    for &r in &r_grid[1..] {
        let v = radial_radicand(m, r, energy);
        if prev_v == 0.0 {
            points.push(prev_r);
        } else if v != 0.0 && prev_v.signum() != v.signum() {
            // Linear root between the bracketing samples.
            points.push(prev_r - prev_v * (r - prev_r) / (v - prev_v));
        }
        prev_r = r;
        prev_v = v;
    }
    if prev_v == 0.0 {
        points.push(prev_r);
    }
    Ok(points)
}
