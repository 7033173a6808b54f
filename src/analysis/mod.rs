//! Plate theories and laminate build options

use serde::{Deserialize, Serialize};

/// Plate theory selecting the constitutive matrix of a laminate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlateTheory {
    /// Classical laminated plate theory (ABD, 6x6)
    Classical,
    /// First-order shear deformation theory (ABDE, 8x8)
    FirstOrder,
    /// Third-order shear deformation theory (9x9 in-plane and 4x4 transverse)
    ThirdOrder,
}

impl Default for PlateTheory {
    fn default() -> Self {
        Self::FirstOrder
    }
}

impl PlateTheory {
    /// Whether the theory carries transverse shear terms
    pub fn has_transverse_shear(&self) -> bool {
        !matches!(self, Self::Classical)
    }
}

/// Options used when a laminate is (re)built
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaminateOptions {
    /// Plate theory for [`crate::laminate::Laminate::constitutive_matrix`]
    pub theory: PlateTheory,
    /// Compute the shear correction factors on every rebuild of a ply stack
    pub calc_scf: bool,
}

impl Default for LaminateOptions {
    fn default() -> Self {
        Self {
            theory: PlateTheory::FirstOrder,
            calc_scf: true,
        }
    }
}

impl LaminateOptions {
    /// Options for classical laminated plate theory
    pub fn classical() -> Self {
        Self {
            theory: PlateTheory::Classical,
            calc_scf: false,
        }
    }

    /// Options for third-order shear deformation theory
    pub fn third_order() -> Self {
        Self {
            theory: PlateTheory::ThirdOrder,
            ..Self::default()
        }
    }

    /// Set the plate theory
    pub fn with_theory(mut self, theory: PlateTheory) -> Self {
        self.theory = theory;
        self
    }

    /// Enable or disable the shear correction factor computation
    pub fn with_shear_correction(mut self, calc_scf: bool) -> Self {
        self.calc_scf = calc_scf;
        self
    }
}
