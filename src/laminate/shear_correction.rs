//! Transverse shear correction factors
//!
//! Energy-consistent factors after Vlachoutsis, S., "Shear correction
//! factors for plates and shells", Int. J. Numer. Meth. Engng. 33,
//! 1537-1552, 1992:
//!
//! ```text
//! k = R² / ( Σ G h · ∫ g(z)² / G(z) dz )
//! R = ∫ D(z) (z - e)² dz
//! g(z) = ∫ D(s) (s - e) ds   from the bottom surface to z
//! ```
//!
//! `D` is the rotated bending modulus of the ply (Q̄11 for k13, Q̄22 for
//! k23) and `G` its transverse shear modulus (Q̄55 for k13, Q̄44 for k23).
//! Every ply integral is evaluated in closed form.

use crate::error::{LaminateError, LaminateResult};
use crate::lamina::{Ply, PlyStiffness};
use crate::math::integration::ply_bounds;
use crate::results::ShearCorrection;

/// Shear correction factors of an ordered ply stack about `z = offset`
pub(crate) fn vlachoutsis(plies: &[Ply], offset: f64) -> LaminateResult<ShearCorrection> {
    if plies.is_empty() {
        return Err(LaminateError::EmptyLaminate);
    }
    let k13 = correction_factor(plies, offset, |q| (q.q11, q.q55))?;
    let k23 = correction_factor(plies, offset, |q| (q.q22, q.q44))?;
    Ok(ShearCorrection { k13, k23 })
}

/// Left fold over the plies carrying the running first moment `g`
fn correction_factor<F>(plies: &[Ply], offset: f64, moduli: F) -> LaminateResult<f64>
where
    F: Fn(&PlyStiffness) -> (f64, f64),
{
    let thicknesses: Vec<f64> = plies.iter().map(Ply::thickness).collect();

    let mut r = 0.0;
    let mut g_prev = 0.0;
    let mut shear_stiffness = 0.0;
    let mut energy = 0.0;

    for (ply, (z1, z2)) in plies.iter().zip(ply_bounds(&thicknesses, offset)) {
        let (d, g) = moduli(ply.stiffness());
        if !(g.is_finite() && g > f64::EPSILON * d.abs()) {
            return Err(LaminateError::InvalidProperty(format!(
                "transverse shear modulus {g} of the {} deg ply is not positive",
                ply.theta_deg()
            )));
        }
        let u1 = z1 - offset;
        let u2 = z2 - offset;

        r += d * (u2.powi(3) - u1.powi(3)) / 3.0;

        // g(u) = alpha + beta u² inside the ply
        let beta = d / 2.0;
        let alpha = g_prev - beta * u1 * u1;
        let g_squared = alpha * alpha * (u2 - u1)
            + 2.0 * alpha * beta * (u2.powi(3) - u1.powi(3)) / 3.0
            + beta * beta * (u2.powi(5) - u1.powi(5)) / 5.0;

        energy += g_squared / g;
        shear_stiffness += g * (z2 - z1);
        g_prev = alpha + beta * u2 * u2;
    }

    let den = shear_stiffness * energy;
    if !(den > 0.0) {
        return Err(LaminateError::InvalidInput(
            "laminate has no bending stiffness about the reference surface".to_string(),
        ));
    }
    Ok(r * r / den)
}
