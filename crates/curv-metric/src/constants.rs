//! Physical constants and the calibration context.
//!
//! Constants live in an immutable [`PhysicalConstants`] value passed at
//! construction, so metrics built for different unit systems (SI,
//! geometrized) coexist in one process for batch comparisons.

/// Speed of light (m/s).
pub const C_SI: f64 = 299_792_458.0;
/// Newtonian gravitational constant (m³/(kg·s²)).
pub const G_SI: f64 = 6.674_30e-11;
/// Solar mass (kg).
pub const M_SUN: f64 = 1.9885e30;
/// Earth mass (kg).
pub const M_EARTH: f64 = 5.9722e24;
/// Earth mean radius (m).
pub const R_EARTH: f64 = 6.371e6;
/// GPS orbital radius: Earth radius plus 20 200 km altitude (m).
pub const R_GPS: f64 = R_EARTH + 20_200e3;

/// Immutable physical-constants context.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalConstants {
    /// Speed of light (m/s).
    pub c: f64,
    /// Gravitational constant (m³/(kg·s²)).
    pub g: f64,
}

impl PhysicalConstants {
    /// SI units.
    pub const fn si() -> Self {
        Self { c: C_SI, g: G_SI }
    }

    /// Geometrized units, c = G = 1.
    pub const fn geometrized() -> Self {
        Self { c: 1.0, g: 1.0 }
    }

    /// Schwarzschild radius r_s = 2GM/c².
    pub fn schwarzschild_radius(&self, mass: f64) -> f64 {
        2.0 * self.g * mass / (self.c * self.c)
    }

    /// Newtonian potential Φ_N = −GM/r.
    pub fn newtonian_potential(&self, mass: f64, r: f64) -> f64 {
        -self.g * mass / r
    }

    /// Weak-field GR time dilation dτ/dt ≈ √(1 + 2Φ_N/c²).
    pub fn gr_time_dilation_weak(&self, mass: f64, r: f64) -> f64 {
        (1.0 + 2.0 * self.newtonian_potential(mass, r) / (self.c * self.c)).sqrt()
    }

    /// Weak-field GR redshift z ≈ (GM/c²)(1/r₁ − 1/r₂).
    pub fn gr_redshift_weak(&self, mass: f64, r1: f64, r2: f64) -> f64 {
        self.g * mass / (self.c * self.c) * (1.0 / r1 - 1.0 / r2)
    }
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self::si()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sun_schwarzschild_radius() {
        let c = PhysicalConstants::si();
        let r_s = c.schwarzschild_radius(M_SUN);
        // ~2.95 km for the Sun
        assert!((r_s - 2954.0).abs() < 2.0, "r_s = {r_s}");
    }

    #[test]
    fn test_gps_redshift_sign() {
        let c = PhysicalConstants::si();
        // Clock higher in the potential runs fast relative to the surface.
        let z = c.gr_redshift_weak(M_EARTH, R_EARTH, R_GPS);
        assert!(z > 0.0);
        assert!(z < 1e-9, "weak-field redshift should be tiny: {z}");
    }

    #[test]
    fn test_geometrized_units() {
        let c = PhysicalConstants::geometrized();
        assert_eq!(c.schwarzschild_radius(0.5), 1.0);
    }
}
