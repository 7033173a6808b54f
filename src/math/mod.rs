//! Mathematical utilities for laminate calculations

pub mod integration;
pub mod transform;

use nalgebra::{Matrix2, Matrix3, Matrix4, Matrix6, SMatrix, SVector};

pub type Mat2 = Matrix2<f64>;
pub type Mat3 = Matrix3<f64>;
pub type Mat4 = Matrix4<f64>;
pub type Mat6 = Matrix6<f64>;

/// 5x5 ply stiffness: in-plane 3x3 block followed by the transverse shear 2x2 block
pub type Mat5 = SMatrix<f64, 5, 5>;
/// 8x8 ABDE matrix for first-order shear deformation theory
pub type Mat8 = SMatrix<f64, 8, 8>;
/// 9x9 in-plane constitutive matrix for third-order shear deformation theory
pub type Mat9 = SMatrix<f64, 9, 9>;
/// 9x5 matrix mapping a lamination parameter vector onto the nine stiffness terms
pub type Mat95 = SMatrix<f64, 9, 5>;
/// Lamination parameter vector [leading constant, cos2t, sin2t, cos4t, sin4t]
pub type Vec5 = SVector<f64, 5>;

// Re-export the helpers used across modules
pub use integration::ThicknessMoments;
pub use transform::{
    displacement_to_laminate, stress_to_lamina, stress_to_laminate,
};

/// Entries of the in-plane 3x3 blocks that couple normal and shear terms (16, 26 and their transposes)
pub const SHEAR_COUPLING_ENTRIES: [(usize, usize); 4] = [(0, 2), (1, 2), (2, 0), (2, 1)];

/// Relative difference between two matrices, measured against the largest entry of `reference`
pub fn relative_difference<const R: usize, const C: usize>(
    value: &SMatrix<f64, R, C>,
    reference: &SMatrix<f64, R, C>,
) -> f64 {
    let scale = reference.amax();
    let diff = (value - reference).amax();
    if scale == 0.0 {
        diff
    } else {
        diff / scale
    }
}
