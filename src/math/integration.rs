//! Closed-form through-thickness integrals for piecewise-constant ply stiffness
//!
//! Within a ply the rotated stiffness is constant, so every laminate block
//! reduces to the ply stiffness times `∫ zⁿ dz` over the ply span.

/// `∫ zⁿ dz` from `z1` to `z2`
pub fn power_integral(z1: f64, z2: f64, n: i32) -> f64 {
    let m = n + 1;
    (z2.powi(m) - z1.powi(m)) / m as f64
}

/// Through-thickness moments of a single ply span `[z1, z2]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThicknessMoments {
    /// `∫ dz`
    pub a: f64,
    /// `∫ z dz`
    pub b: f64,
    /// `∫ z² dz`
    pub d: f64,
    /// `∫ z³ dz`
    pub e: f64,
    /// `∫ z⁴ dz`
    pub f: f64,
    /// `∫ z⁶ dz`
    pub h: f64,
}

impl ThicknessMoments {
    /// Moments for a ply spanning `z1` (bottom) to `z2` (top)
    pub fn new(z1: f64, z2: f64) -> Self {
        Self {
            a: z2 - z1,
            b: (z2 * z2 - z1 * z1) / 2.0,
            d: power_integral(z1, z2, 2),
            e: power_integral(z1, z2, 3),
            f: power_integral(z1, z2, 4),
            h: power_integral(z1, z2, 6),
        }
    }
}

/// Ply bottom/top coordinates for consecutive thicknesses
///
/// The first ply starts at `-total/2 + offset`; the bounds follow the
/// order of `thicknesses`.
pub fn ply_bounds(thicknesses: &[f64], offset: f64) -> Vec<(f64, f64)> {
    let total: f64 = thicknesses.iter().sum();
    let mut z1 = -total / 2.0 + offset;
    thicknesses
        .iter()
        .map(|t| {
            let z2 = z1 + t;
            let bounds = (z1, z2);
            z1 = z2;
            bounds
        })
        .collect()
}
