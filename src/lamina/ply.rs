//! Single ply (lamina) of a laminate
//!
//! A ply owns its orientation and thickness and shares its material. The
//! rotated stiffness and the transformation matrices are derived when the
//! ply is created and are a pure function of (angle, material).

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::material::Material;
use crate::error::{LaminateError, LaminateResult};
use crate::math::{
    displacement_to_laminate, stress_to_lamina, stress_to_laminate, Mat2, Mat3, Mat5, Mat6, Mat95,
    Vec5,
};

/// Trigonometric weights `[1, cos2t, sin2t, cos4t, sin4t]` of an orientation
pub fn trig_moments(theta_deg: f64) -> Vec5 {
    let theta = theta_deg.to_radians();
    let (sin2t, cos2t) = (2.0 * theta).sin_cos();
    let (sin4t, cos4t) = (4.0 * theta).sin_cos();
    Vec5::new(1.0, cos2t, sin2t, cos4t, sin4t)
}

/// Reduced stiffness of a ply in the laminate axes
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlyStiffness {
    pub q11: f64,
    pub q12: f64,
    pub q16: f64,
    pub q22: f64,
    pub q26: f64,
    pub q66: f64,
    pub q44: f64,
    pub q45: f64,
    pub q55: f64,
}

impl PlyStiffness {
    /// Build from a term vector ordered as [`super::STIFFNESS_TERMS`]
    pub fn from_terms(t: &[f64; 9]) -> Self {
        Self {
            q11: t[0],
            q22: t[1],
            q12: t[2],
            q66: t[3],
            q16: t[4],
            q26: t[5],
            q44: t[6],
            q55: t[7],
            q45: t[8],
        }
    }

    /// Closed-form rotation through the invariant matrix: `Q = U · [1, cos2t, sin2t, cos4t, sin4t]`
    pub fn from_invariants(u: &Mat95, moments: &Vec5) -> Self {
        let t = u * moments;
        Self::from_terms(&[t[0], t[1], t[2], t[3], t[4], t[5], t[6], t[7], t[8]])
    }

    /// In-plane 3x3 block `[11 12 16; 12 22 26; 16 26 66]`
    pub fn in_plane(&self) -> Mat3 {
        Mat3::new(
            self.q11, self.q12, self.q16,
            self.q12, self.q22, self.q26,
            self.q16, self.q26, self.q66,
        )
    }

    /// Transverse shear 2x2 block `[44 45; 45 55]` (yz first, then xz)
    pub fn transverse(&self) -> Mat2 {
        Mat2::new(
            self.q44, self.q45,
            self.q45, self.q55,
        )
    }

    /// Combined 5x5 block with the in-plane terms first
    pub fn combined(&self) -> Mat5 {
        let mut q = Mat5::zeros();
        q.fixed_view_mut::<3, 3>(0, 0).copy_from(&self.in_plane());
        q.fixed_view_mut::<2, 2>(3, 3).copy_from(&self.transverse());
        q
    }
}

/// Transformation matrices between the lamina and laminate axes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlyTransforms {
    /// Displacements from laminate to lamina axes
    pub l: Mat3,
    /// Stresses from laminate to lamina axes
    pub r: Mat6,
    /// Stresses from lamina to laminate axes
    pub t: Mat6,
}

impl PlyTransforms {
    pub fn new(theta_deg: f64) -> Self {
        let theta = theta_deg.to_radians();
        Self {
            l: displacement_to_laminate(theta),
            r: stress_to_lamina(theta),
            t: stress_to_laminate(theta),
        }
    }
}

/// Serialized form of a ply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlyDefinition {
    pub theta_deg: f64,
    pub thickness: f64,
    pub material: Arc<Material>,
}

/// A single ply with a fixed orientation and thickness
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PlyDefinition", into = "PlyDefinition")]
pub struct Ply {
    theta_deg: f64,
    thickness: f64,
    material: Arc<Material>,
    stiffness: PlyStiffness,
    transforms: PlyTransforms,
}

impl Ply {
    /// Create a ply
    ///
    /// # Arguments
    /// * `theta_deg` - Orientation of material axis 1 from the laminate x axis (degrees)
    /// * `thickness` - Ply thickness
    /// * `material` - Shared lamina material
    pub fn new(theta_deg: f64, thickness: f64, material: Arc<Material>) -> LaminateResult<Self> {
        if !theta_deg.is_finite() {
            return Err(LaminateError::InvalidInput(format!(
                "ply angle must be finite, got {theta_deg}"
            )));
        }
        if !(thickness.is_finite() && thickness > 0.0) {
            return Err(LaminateError::InvalidInput(format!(
                "ply thickness must be positive, got {thickness}"
            )));
        }
        let stiffness = PlyStiffness::from_invariants(&material.invariant_matrix(), &trig_moments(theta_deg));
        Ok(Self {
            theta_deg,
            thickness,
            material,
            stiffness,
            transforms: PlyTransforms::new(theta_deg),
        })
    }

    /// Same thickness and material at another orientation
    pub fn rotated(&self, theta_deg: f64) -> LaminateResult<Self> {
        Self::new(theta_deg, self.thickness, Arc::clone(&self.material))
    }

    pub fn theta_deg(&self) -> f64 {
        self.theta_deg
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    pub fn material(&self) -> &Arc<Material> {
        &self.material
    }

    /// Rotated reduced stiffness in the laminate axes
    pub fn stiffness(&self) -> &PlyStiffness {
        &self.stiffness
    }

    pub fn transforms(&self) -> &PlyTransforms {
        &self.transforms
    }

    /// Trigonometric weights of this ply's orientation
    pub fn trig_moments(&self) -> Vec5 {
        trig_moments(self.theta_deg)
    }

    /// Rotated stiffness computed as `T Q Tᵀ` with the stress transformation
    /// to the laminate axes; agrees with [`Ply::stiffness`] to rounding.
    pub fn rotated_stiffness_by_transformation(&self) -> PlyStiffness {
        let q = self.material.reduced_stiffness();
        let t = &self.transforms.t;

        // in-plane rows/columns 11, 22, 12 and transverse 23, 13 of the Voigt order
        let idx = [0, 1, 5];
        let t_plane = Mat3::from_fn(|i, j| t[(idx[i], idx[j])]);
        let q_plane = Mat3::new(
            q.q11, q.q12, 0.0,
            q.q12, q.q22, 0.0,
            0.0,   0.0,   q.q66,
        );
        let plane = t_plane * q_plane * t_plane.transpose();

        let t_shear = Mat2::from_fn(|i, j| t[(3 + i, 3 + j)]);
        let q_shear = Mat2::new(q.q44, 0.0, 0.0, q.q55);
        let shear = t_shear * q_shear * t_shear.transpose();

        PlyStiffness {
            q11: plane[(0, 0)],
            q12: plane[(0, 1)],
            q16: plane[(0, 2)],
            q22: plane[(1, 1)],
            q26: plane[(1, 2)],
            q66: plane[(2, 2)],
            q44: shear[(0, 0)],
            q45: shear[(0, 1)],
            q55: shear[(1, 1)],
        }
    }
}

impl TryFrom<PlyDefinition> for Ply {
    type Error = LaminateError;

    fn try_from(def: PlyDefinition) -> LaminateResult<Self> {
        Self::new(def.theta_deg, def.thickness, def.material)
    }
}

impl From<Ply> for PlyDefinition {
    fn from(ply: Ply) -> Self {
        Self {
            theta_deg: ply.theta_deg,
            thickness: ply.thickness,
            material: ply.material,
        }
    }
}
