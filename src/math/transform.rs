//! Coordinate transformations between the lamina (material) and laminate axes
//!
//! Stress and strain vectors use the Voigt ordering
//! `[11, 22, 33, 23, 13, 12]`. The angle is the rotation of the lamina
//! material axis 1 from the laminate x axis, positive about z.
//!
//! References:
//! - Reddy, J. N., "Mechanics of Laminated Composite Plates and Shells",
//!   2nd Edition, CRC Press, 2004

use super::{Mat3, Mat6};

/// Displacement transformation matrix [L] from laminate to lamina axes
pub fn displacement_to_laminate(theta_rad: f64) -> Mat3 {
    let (s, c) = theta_rad.sin_cos();
    Mat3::new(
         c,   s,   0.0,
        -s,   c,   0.0,
        0.0, 0.0,  1.0,
    )
}

/// Stress transformation matrix [R] taking laminate stresses to lamina axes
pub fn stress_to_lamina(theta_rad: f64) -> Mat6 {
    let (s, c) = theta_rad.sin_cos();
    let sin2t = (2.0 * theta_rad).sin();
    let (c2, s2, sc) = (c * c, s * s, s * c);

    Mat6::new(
        c2,   s2,  0.0, 0.0, 0.0,  sin2t,
        s2,   c2,  0.0, 0.0, 0.0, -sin2t,
        0.0,  0.0, 1.0, 0.0, 0.0,  0.0,
        0.0,  0.0, 0.0,  c,   -s,  0.0,
        0.0,  0.0, 0.0,  s,    c,  0.0,
        -sc,  sc,  0.0, 0.0, 0.0,  c2 - s2,
    )
}

/// Stress transformation matrix [T] taking lamina stresses to laminate axes
///
/// This is the inverse of [`stress_to_lamina`] for the same angle. The
/// corresponding engineering-strain transformations are the transposes:
/// `Tᵀ` takes laminate strains to the lamina and `Rᵀ` brings them back.
pub fn stress_to_laminate(theta_rad: f64) -> Mat6 {
    let (s, c) = theta_rad.sin_cos();
    let sin2t = (2.0 * theta_rad).sin();
    let (c2, s2, sc) = (c * c, s * s, s * c);

    Mat6::new(
        c2,   s2,  0.0, 0.0, 0.0, -sin2t,
        s2,   c2,  0.0, 0.0, 0.0,  sin2t,
        0.0,  0.0, 1.0, 0.0, 0.0,  0.0,
        0.0,  0.0, 0.0,  c,    s,  0.0,
        0.0,  0.0, 0.0, -s,    c,  0.0,
        sc,  -sc,  0.0, 0.0, 0.0,  c2 - s2,
    )
}
