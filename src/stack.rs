//! Laminate definitions and plate builders
//!
//! [`StackDefinition`] is the serialized form of a ply stack (JSON via
//! serde). The free functions build the common plates directly.

use std::path::Path;
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::{LaminateOptions, PlateTheory};
use crate::error::{LaminateError, LaminateResult};
use crate::lamina::{Material, Ply};
use crate::laminate::Laminate;
use crate::math::{Mat3, Vec5};
use crate::parameters::LaminationParameters;

fn default_calc_scf() -> bool {
    true
}

/// Stacking sequence with uniform or per-ply thicknesses and properties
///
/// `plyt` or `plyts` must be given, and `laminaprop` or `laminaprops`.
/// The per-ply forms take precedence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackDefinition {
    /// Ply angles in degrees, bottom to top
    pub stack: Vec<f64>,
    #[serde(default)]
    pub plyt: Option<f64>,
    #[serde(default)]
    pub plyts: Option<Vec<f64>>,
    #[serde(default)]
    pub laminaprop: Option<Vec<f64>>,
    #[serde(default)]
    pub laminaprops: Option<Vec<Vec<f64>>>,
    #[serde(default)]
    pub rho: Option<f64>,
    #[serde(default)]
    pub rhos: Option<Vec<f64>>,
    #[serde(default)]
    pub offset: f64,
    #[serde(default = "default_calc_scf")]
    pub calc_scf: bool,
    #[serde(default)]
    pub theory: PlateTheory,
}

impl StackDefinition {
    /// Uniform stack: one thickness and one property tuple for every ply
    pub fn uniform(stack: &[f64], plyt: f64, laminaprop: &[f64]) -> Self {
        Self {
            stack: stack.to_vec(),
            plyt: Some(plyt),
            plyts: None,
            laminaprop: Some(laminaprop.to_vec()),
            laminaprops: None,
            rho: None,
            rhos: None,
            offset: 0.0,
            calc_scf: true,
            theory: PlateTheory::default(),
        }
    }

    pub fn with_density(mut self, rho: f64) -> Self {
        self.rho = Some(rho);
        self
    }

    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_shear_correction(mut self, calc_scf: bool) -> Self {
        self.calc_scf = calc_scf;
        self
    }

    /// Parse a JSON definition
    pub fn from_json(json: &str) -> LaminateResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON definition from a file
    pub fn from_path<P: AsRef<Path>>(path: P) -> LaminateResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> LaminateResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Ply thicknesses, one per angle
    fn thicknesses(&self) -> LaminateResult<Vec<f64>> {
        match (&self.plyts, self.plyt) {
            (Some(plyts), _) => {
                self.check_len("plyts", plyts.len())?;
                Ok(plyts.clone())
            }
            (None, Some(plyt)) => Ok(vec![plyt; self.stack.len()]),
            (None, None) => Err(LaminateError::MissingInput(
                "plyt or plyts must be supplied".to_string(),
            )),
        }
    }

    /// Ply densities, one per angle
    fn densities(&self) -> LaminateResult<Vec<Option<f64>>> {
        match &self.rhos {
            Some(rhos) => {
                self.check_len("rhos", rhos.len())?;
                Ok(rhos.iter().copied().map(Some).collect())
            }
            None => Ok(vec![self.rho; self.stack.len()]),
        }
    }

    /// Ply materials, one per angle; a uniform tuple gives a single shared material
    fn materials(&self) -> LaminateResult<Vec<Arc<Material>>> {
        let densities = self.densities()?;
        match (&self.laminaprops, &self.laminaprop, &self.rhos) {
            (Some(props), _, _) => {
                self.check_len("laminaprops", props.len())?;
                props
                    .iter()
                    .zip(densities)
                    .map(|(prop, rho)| Material::new(prop, rho).map(Arc::new))
                    .collect()
            }
            (None, Some(prop), None) => {
                let material = Arc::new(Material::new(prop, self.rho)?);
                Ok(vec![material; self.stack.len()])
            }
            (None, Some(prop), Some(_)) => densities
                .into_iter()
                .map(|rho| Material::new(prop, rho).map(Arc::new))
                .collect(),
            (None, None, _) => Err(LaminateError::MissingInput(
                "laminaprop or laminaprops must be supplied".to_string(),
            )),
        }
    }

    fn check_len(&self, name: &str, len: usize) -> LaminateResult<()> {
        if len == self.stack.len() {
            Ok(())
        } else {
            Err(LaminateError::InvalidInput(format!(
                "{name} has {len} entries for a stack of {} plies",
                self.stack.len()
            )))
        }
    }

    /// Build options carried by the definition
    pub fn options(&self) -> LaminateOptions {
        LaminateOptions::default()
            .with_theory(self.theory)
            .with_shear_correction(self.calc_scf)
    }

    /// Create the plies and build the laminate
    pub fn build(&self) -> LaminateResult<Laminate> {
        let thicknesses = self.thicknesses()?;
        let materials = self.materials()?;
        let plies = self
            .stack
            .iter()
            .zip(thicknesses)
            .zip(materials)
            .map(|((&theta, t), material)| Ply::new(theta, t, material))
            .collect::<LaminateResult<Vec<_>>>()?;
        debug!("Building laminate of {} plies", plies.len());
        Laminate::from_plies(plies, self.offset, self.options())
    }
}

/// Laminate with one thickness and one property tuple for every ply
pub fn laminated_plate(stack: &[f64], plyt: f64, laminaprop: &[f64]) -> LaminateResult<Laminate> {
    StackDefinition::uniform(stack, plyt, laminaprop).build()
}

/// Single-ply isotropic plate
pub fn isotropic_plate(thickness: f64, e: f64, nu: f64, offset: f64) -> LaminateResult<Laminate> {
    StackDefinition::uniform(&[0.0], thickness, &[e, nu])
        .with_offset(offset)
        .build()
}

/// In-plane stiffness of a homogenized `[±θ1, ..., ±θn]` laminate
/// divided by thickness and trace
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceNormalizedStiffness {
    /// Trace `q11 + q22 + 2 q66` of the material
    pub trace: f64,
    /// `A / (h · trace)`
    pub a_star: Mat3,
}

/// Lamination parameters of a homogenized `[±θ1, ..., ±θn]` laminate
fn n_double_parameters(angles: &[f64]) -> LaminateResult<LaminationParameters> {
    if angles.is_empty() {
        return Err(LaminateError::EmptyLaminate);
    }
    if let Some(bad) = angles.iter().find(|a| !a.is_finite()) {
        return Err(LaminateError::InvalidInput(format!("angle must be finite, got {bad}")));
    }
    let n = angles.len() as f64;
    let (cos2, cos4) = angles.iter().fold((0.0, 0.0), |(c2, c4), a| {
        let t = a.to_radians();
        (c2 + (2.0 * t).cos(), c4 + (4.0 * t).cos())
    });
    let xi = Vec5::new(1.0, cos2 / n, 0.0, cos4 / n, 0.0);
    Ok(LaminationParameters {
        xi_a: xi,
        xi_b: Vec5::zeros(),
        xi_d: xi,
        xi_e: xi,
    })
}

/// Trace-normalized stiffness of a homogenized `[±θ1, ..., ±θn]` laminate
pub fn n_double_normalized(angles: &[f64], material: &Material) -> LaminateResult<TraceNormalizedStiffness> {
    let parameters = n_double_parameters(angles)?;
    let normalized = material.trace_normalized();
    let a_star = parameters.stiffness(1.0, &normalized.invariants.matrix()).a;
    Ok(TraceNormalizedStiffness {
        trace: normalized.trace,
        a_star,
    })
}

/// Homogenized `[±θ1, ..., ±θn]` laminate of total thickness `thickness`
///
/// In the limit of many repeated sub-laminates `B = 0`, `D = h²/12 A` and
/// the 16/26 terms cancel.
pub fn n_double_plate(thickness: f64, angles: &[f64], material: Arc<Material>) -> LaminateResult<Laminate> {
    let parameters = n_double_parameters(angles)?;
    debug!("Homogenized laminate of angles {angles:?}, h = {thickness}");
    Laminate::from_lamination_parameters(thickness, material, parameters)
}

/// Double-double `[±φ, ±ψ]` laminate
pub fn double_double_plate(thickness: f64, phi_deg: f64, psi_deg: f64, material: Arc<Material>) -> LaminateResult<Laminate> {
    n_double_plate(thickness, &[phi_deg, psi_deg], material)
}
