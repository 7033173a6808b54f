//! Sensitivities of the ABDE matrix with respect to the lamination parameters
//!
//! The stiffness is linear in each parameter vector, so every derivative
//! is a constant matrix for a given material and thickness.

use serde::{Deserialize, Serialize};

use super::{LaminationParameters, ParameterVector};
use crate::error::{LaminateError, LaminateResult};
use crate::lamina::Material;
use crate::math::{Mat8, Mat95};

/// Precomputed `∂ABDE/∂ξ` for the 16 free lamination parameter components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaminationParameterGradient {
    thickness: f64,
    /// Derivatives ordered ξA1..ξA4, ξB1..ξB4, ξD1..ξD4, ξE1..ξE4
    derivatives: Vec<Mat8>,
}

impl LaminationParameterGradient {
    pub fn new(thickness: f64, material: &Material) -> LaminateResult<Self> {
        if !(thickness.is_finite() && thickness > 0.0) {
            return Err(LaminateError::InvalidInput(format!(
                "laminate thickness must be positive, got {thickness}"
            )));
        }
        let u = material.invariant_matrix();
        let derivatives = ParameterVector::ALL
            .iter()
            .flat_map(|&which| (1..=4).map(move |k| (which, k)))
            .map(|(which, k)| unit_derivative(thickness, &u, which, k))
            .collect();
        Ok(Self {
            thickness,
            derivatives,
        })
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    /// `∂ABDE/∂ξ` of component `k` (1..=4) of one parameter vector
    pub fn derivative(&self, which: ParameterVector, k: usize) -> LaminateResult<&Mat8> {
        if !(1..=4).contains(&k) {
            return Err(LaminateError::InvalidInput(format!(
                "lamination parameter component must be 1 to 4, got {k}"
            )));
        }
        let offset = match which {
            ParameterVector::A => 0,
            ParameterVector::B => 4,
            ParameterVector::D => 8,
            ParameterVector::E => 12,
        };
        Ok(&self.derivatives[offset + k - 1])
    }

    /// All 16 derivatives, ordered ξA1..ξA4, ξB1..ξB4, ξD1..ξD4, ξE1..ξE4
    pub fn derivatives(&self) -> &[Mat8] {
        &self.derivatives
    }

    /// First-order change of ABDE for a parameter step `delta`
    ///
    /// Leading constants of `delta` are ignored.
    pub fn directional(&self, delta: &LaminationParameters) -> Mat8 {
        let mut total = Mat8::zeros();
        for (i, &which) in ParameterVector::ALL.iter().enumerate() {
            let xi = delta.vector(which);
            for k in 1..=4 {
                total += self.derivatives[4 * i + k - 1] * xi[k];
            }
        }
        total
    }
}

fn unit_derivative(thickness: f64, u: &Mat95, which: ParameterVector, k: usize) -> Mat8 {
    let mut unit = LaminationParameters::zeros();
    unit.vector_mut(which)[k] = 1.0;
    unit.stiffness(thickness, u).abde()
}
