//! Laminate - ordered ply stack or lamination-parameter definition
//!
//! A laminate is defined either by a stack of plies (direct path) or by a
//! total thickness, a single material and lamination parameters
//! (parametric path). The stiffness is cached after [`Laminate::rebuild`]
//! and dropped by every mutation, so reading it never mixes the two
//! definitions.

mod shear_correction;

use std::sync::Arc;

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::analysis::{LaminateOptions, PlateTheory};
use crate::error::{LaminateError, LaminateResult};
use crate::lamina::{Material, Ply};
use crate::math::integration::ply_bounds;
use crate::math::{Mat2, Mat3, Mat6, Mat8, ThicknessMoments};
use crate::parameters::LaminationParameters;
use crate::results::{
    ConstitutiveMatrix, EquivalentProperties, LaminateStiffness, ShearCorrection,
};

/// Definition a laminate is built from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Layup {
    /// Plies from the bottom surface to the top surface
    Stack(Vec<Ply>),
    /// Homogenized laminate of a single material
    Parametric {
        thickness: f64,
        material: Arc<Material>,
        parameters: LaminationParameters,
        /// Thickness-weighted density, 0 when unknown
        density: f64,
    },
}

impl Default for Layup {
    fn default() -> Self {
        Self::Stack(Vec::new())
    }
}

/// Constraints re-applied on every rebuild
///
/// Applied in the order balanced, orthotropic, symmetric, smeared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Constraints {
    pub balanced: bool,
    pub orthotropic: bool,
    pub symmetric: bool,
    pub smeared: bool,
}

impl Constraints {
    pub fn any(&self) -> bool {
        self.balanced || self.orthotropic || self.symmetric || self.smeared
    }

    /// Name of the first active constraint
    pub fn first_active(&self) -> Option<&'static str> {
        [
            (self.balanced, "balanced"),
            (self.orthotropic, "orthotropic"),
            (self.symmetric, "symmetric"),
            (self.smeared, "smeared"),
        ]
        .into_iter()
        .find_map(|(active, name)| active.then_some(name))
    }

    pub fn apply_to_stiffness(&self, stiffness: &mut LaminateStiffness, thickness: f64) {
        if self.balanced {
            stiffness.zero_extension_shear_coupling();
        }
        if self.orthotropic {
            stiffness.zero_all_shear_coupling();
        }
        if self.symmetric {
            stiffness.zero_coupling();
        }
        if self.smeared {
            stiffness.smear(thickness);
        }
    }

    pub fn apply_to_parameters(&self, parameters: &mut LaminationParameters) {
        if self.balanced {
            parameters.force_balanced();
        }
        if self.orthotropic {
            parameters.force_orthotropic();
        }
        if self.symmetric {
            parameters.force_symmetric();
        }
        if self.smeared {
            parameters.force_smeared();
        }
    }
}

/// Laminated plate
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Laminate {
    layup: Layup,
    /// Shift of the reference surface from the geometric mid-surface
    offset: f64,
    constraints: Constraints,
    options: LaminateOptions,

    #[serde(skip)]
    stiffness: Option<LaminateStiffness>,
    #[serde(skip)]
    shear_correction: ShearCorrection,
}

impl Laminate {
    /// Create an empty laminate
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty laminate with build options
    pub fn with_options(options: LaminateOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Build a laminate from an ordered ply stack
    pub fn from_plies(plies: Vec<Ply>, offset: f64, options: LaminateOptions) -> LaminateResult<Self> {
        check_offset(offset)?;
        let mut lam = Self {
            layup: Layup::Stack(plies),
            offset,
            options,
            ..Self::default()
        };
        lam.rebuild()?;
        Ok(lam)
    }

    /// Build a homogenized laminate from lamination parameters
    pub fn from_lamination_parameters(
        thickness: f64,
        material: Arc<Material>,
        parameters: LaminationParameters,
    ) -> LaminateResult<Self> {
        let mut lam = Self::new();
        lam.set_lamination_parameters(thickness, material, parameters)?;
        lam.rebuild()?;
        Ok(lam)
    }

    // ========================
    // Definition
    // ========================

    /// Append a ply on top of the stack
    pub fn add_ply(&mut self, theta_deg: f64, thickness: f64, material: Arc<Material>) -> LaminateResult<()> {
        let ply = Ply::new(theta_deg, thickness, material)?;
        self.push_ply(ply)
    }

    /// Append an existing ply on top of the stack
    pub fn push_ply(&mut self, ply: Ply) -> LaminateResult<()> {
        match &mut self.layup {
            Layup::Stack(plies) => plies.push(ply),
            Layup::Parametric { .. } => {
                return Err(LaminateError::InvalidInput(
                    "cannot add plies to a laminate defined by lamination parameters".to_string(),
                ))
            }
        }
        self.invalidate();
        Ok(())
    }

    /// Replace the definition by lamination parameters
    pub fn set_lamination_parameters(
        &mut self,
        thickness: f64,
        material: Arc<Material>,
        parameters: LaminationParameters,
    ) -> LaminateResult<()> {
        if !(thickness.is_finite() && thickness > 0.0) {
            return Err(LaminateError::InvalidInput(format!(
                "laminate thickness must be positive, got {thickness}"
            )));
        }
        let density = material.rho().unwrap_or(0.0);
        self.layup = Layup::Parametric {
            thickness,
            material,
            parameters,
            density,
        };
        self.invalidate();
        Ok(())
    }

    /// Shift the reference surface
    ///
    /// A non-zero offset is rejected while any constraint is active. A
    /// parametric laminate carries its offset in ξB0 and ξD0 and cannot be
    /// shifted.
    pub fn set_offset(&mut self, offset: f64) -> LaminateResult<()> {
        check_offset(offset)?;
        if matches!(self.layup, Layup::Parametric { .. }) {
            return Err(LaminateError::InvalidInput(
                "the offset of a laminate defined by lamination parameters is fixed by its parameters".to_string(),
            ));
        }
        if offset != 0.0 {
            if let Some(constraint) = self.constraints.first_active() {
                return Err(LaminateError::OffsetConstraint { constraint, offset });
            }
        }
        self.offset = offset;
        self.invalidate();
        Ok(())
    }

    pub fn set_options(&mut self, options: LaminateOptions) {
        self.options = options;
        self.invalidate();
    }

    pub fn layup(&self) -> &Layup {
        &self.layup
    }

    /// Plies of a stack definition, empty for a parametric laminate
    pub fn plies(&self) -> &[Ply] {
        match &self.layup {
            Layup::Stack(plies) => plies,
            Layup::Parametric { .. } => &[],
        }
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    pub fn options(&self) -> &LaminateOptions {
        &self.options
    }

    /// Total thickness
    pub fn thickness(&self) -> f64 {
        match &self.layup {
            Layup::Stack(plies) => plies.iter().map(Ply::thickness).sum(),
            Layup::Parametric { thickness, .. } => *thickness,
        }
    }

    /// Thickness-weighted average density, plies without density count as 0
    pub fn density(&self) -> LaminateResult<f64> {
        match &self.layup {
            Layup::Stack(plies) if plies.is_empty() => Err(LaminateError::EmptyLaminate),
            Layup::Stack(plies) => {
                let mass: f64 = plies
                    .iter()
                    .map(|p| p.material().rho().unwrap_or(0.0) * p.thickness())
                    .sum();
                Ok(mass / self.thickness())
            }
            Layup::Parametric { density, .. } => Ok(*density),
        }
    }

    // ========================
    // Build
    // ========================

    fn invalidate(&mut self) {
        self.stiffness = None;
        self.shear_correction = ShearCorrection::default();
    }

    /// Whether the stiffness is up to date with the definition
    pub fn is_built(&self) -> bool {
        self.stiffness.is_some()
    }

    /// Recompute the stiffness from the current definition and constraints
    pub fn rebuild(&mut self) -> LaminateResult<()> {
        self.invalidate();
        let stiffness = match &self.layup {
            Layup::Stack(plies) => {
                if plies.is_empty() {
                    return Err(LaminateError::EmptyLaminate);
                }
                debug!(
                    "Integrating {} plies (offset {}, constraints {:?})",
                    plies.len(),
                    self.offset,
                    self.constraints
                );
                let mut stiffness = integrate(plies, self.offset);
                self.constraints.apply_to_stiffness(&mut stiffness, self.thickness());
                stiffness
            }
            Layup::Parametric {
                thickness,
                material,
                parameters,
                ..
            } => {
                debug!(
                    "Assembling stiffness from lamination parameters (h = {}, constraints {:?})",
                    thickness, self.constraints
                );
                let mut parameters = *parameters;
                self.constraints.apply_to_parameters(&mut parameters);
                parameters.stiffness(*thickness, &material.invariant_matrix())
            }
        };

        let shear_correction = match &self.layup {
            Layup::Stack(plies) if self.options.calc_scf => {
                let k = shear_correction::vlachoutsis(plies, self.offset)?;
                debug!("Shear correction factors k13 = {:.6}, k23 = {:.6}", k.k13, k.k23);
                k
            }
            _ => ShearCorrection::default(),
        };
        self.stiffness = Some(stiffness);
        self.shear_correction = shear_correction;
        Ok(())
    }

    // ========================
    // Constraints
    // ========================

    fn add_constraint(&mut self, name: &'static str, set: impl FnOnce(&mut Constraints)) -> LaminateResult<()> {
        if self.offset != 0.0 {
            return Err(LaminateError::OffsetConstraint {
                constraint: name,
                offset: self.offset,
            });
        }
        set(&mut self.constraints);
        debug!("Laminate forced {name}");
        if self.is_built() {
            self.rebuild()?;
        }
        Ok(())
    }

    /// Zero A16 and A26
    pub fn force_balanced(&mut self) -> LaminateResult<()> {
        self.add_constraint("balanced", |c| c.balanced = true)
    }

    /// Zero the coupling block B (and the third-order block E)
    pub fn force_symmetric(&mut self) -> LaminateResult<()> {
        self.add_constraint("symmetric", |c| c.symmetric = true)
    }

    /// Zero every 16/26 term of A, B, D and of the third-order blocks
    pub fn force_orthotropic(&mut self) -> LaminateResult<()> {
        self.add_constraint("orthotropic", |c| c.orthotropic = true)
    }

    /// Homogeneous thin-plate limit: `B = 0`, `D = h²/12 A`
    pub fn force_smeared(&mut self) -> LaminateResult<()> {
        self.add_constraint("smeared", |c| c.smeared = true)
    }

    /// Remove every constraint
    pub fn clear_constraints(&mut self) {
        self.constraints = Constraints::default();
        self.invalidate();
    }

    fn modify_parameters(
        &mut self,
        name: &'static str,
        modify: impl FnOnce(&mut LaminationParameters),
    ) -> LaminateResult<()> {
        if self.offset != 0.0 {
            return Err(LaminateError::OffsetConstraint {
                constraint: name,
                offset: self.offset,
            });
        }
        self.to_parametric()?;
        if let Layup::Parametric { parameters, .. } = &mut self.layup {
            modify(parameters);
        }
        debug!("Lamination parameters forced {name}");
        self.invalidate();
        self.rebuild()
    }

    /// Zero ξA2 and ξA4
    pub fn force_balanced_lp(&mut self) -> LaminateResult<()> {
        self.modify_parameters("balanced", LaminationParameters::force_balanced)
    }

    /// Zero ξB
    pub fn force_symmetric_lp(&mut self) -> LaminateResult<()> {
        self.modify_parameters("symmetric", LaminationParameters::force_symmetric)
    }

    /// Zero the sine components of ξA, ξB and ξD
    pub fn force_orthotropic_lp(&mut self) -> LaminateResult<()> {
        self.modify_parameters("orthotropic", LaminationParameters::force_orthotropic)
    }

    /// ξB = 0 and ξD = ξA
    pub fn force_smeared_lp(&mut self) -> LaminateResult<()> {
        self.modify_parameters("smeared", LaminationParameters::force_smeared)
    }

    // ========================
    // Lamination parameters
    // ========================

    /// Lamination parameters of the current definition with the active
    /// constraints applied
    pub fn lamination_parameters(&self) -> LaminateResult<LaminationParameters> {
        let mut parameters = match &self.layup {
            Layup::Stack(plies) => LaminationParameters::from_plies(plies, self.offset)?,
            Layup::Parametric { parameters, .. } => *parameters,
        };
        self.constraints.apply_to_parameters(&mut parameters);
        Ok(parameters)
    }

    /// Material shared by every ply, or the parametric material
    pub fn common_material(&self) -> LaminateResult<Arc<Material>> {
        match &self.layup {
            Layup::Parametric { material, .. } => Ok(Arc::clone(material)),
            Layup::Stack(plies) => {
                let first = plies.first().ok_or(LaminateError::EmptyLaminate)?.material();
                for ply in &plies[1..] {
                    if !same_invariants(first, ply.material()) {
                        return Err(LaminateError::InvalidInput(
                            "plies with different materials have no common lamination parameter material"
                                .to_string(),
                        ));
                    }
                }
                Ok(Arc::clone(first))
            }
        }
    }

    /// Replace a ply stack by its lamination parameters
    ///
    /// The third-order blocks and the computed shear correction factors
    /// are not representable by lamination parameters and are dropped.
    pub fn to_parametric(&mut self) -> LaminateResult<()> {
        if let Layup::Stack(plies) = &self.layup {
            let material = self.common_material()?;
            let parameters = LaminationParameters::from_plies(plies, self.offset)?;
            let thickness = self.thickness();
            let density = self.density()?;
            warn!("Converting {} plies to lamination parameters", plies.len());
            self.layup = Layup::Parametric {
                thickness,
                material,
                parameters,
                density,
            };
            self.invalidate();
        }
        Ok(())
    }

    // ========================
    // Results
    // ========================

    /// Cached stiffness matrices
    pub fn stiffness(&self) -> LaminateResult<&LaminateStiffness> {
        self.stiffness.as_ref().ok_or(LaminateError::NotBuilt)
    }

    pub fn a(&self) -> LaminateResult<Mat3> {
        Ok(self.stiffness()?.a)
    }

    pub fn b(&self) -> LaminateResult<Mat3> {
        Ok(self.stiffness()?.b)
    }

    pub fn d(&self) -> LaminateResult<Mat3> {
        Ok(self.stiffness()?.d)
    }

    /// Transverse shear stiffness ordered `[yz, xz]`, without correction factors
    pub fn atrans(&self) -> LaminateResult<Mat2> {
        Ok(self.stiffness()?.atrans)
    }

    pub fn abd(&self) -> LaminateResult<Mat6> {
        Ok(self.stiffness()?.abd())
    }

    pub fn abde(&self) -> LaminateResult<Mat8> {
        Ok(self.stiffness()?.abde())
    }

    /// Constitutive matrix of the configured plate theory
    pub fn constitutive(&self) -> LaminateResult<ConstitutiveMatrix> {
        self.constitutive_matrix(self.options.theory)
    }

    /// Constitutive matrix for a plate theory
    pub fn constitutive_matrix(&self, theory: PlateTheory) -> LaminateResult<ConstitutiveMatrix> {
        let stiffness = self.stiffness()?;
        match theory {
            PlateTheory::Classical => Ok(ConstitutiveMatrix::Classical(stiffness.abd())),
            PlateTheory::FirstOrder => Ok(ConstitutiveMatrix::FirstOrder(stiffness.abde())),
            PlateTheory::ThirdOrder => match (stiffness.tsdt_in_plane(), stiffness.tsdt_transverse()) {
                (Some(in_plane), Some(transverse)) => Ok(ConstitutiveMatrix::ThirdOrder {
                    in_plane,
                    transverse,
                }),
                _ => Err(LaminateError::MissingInput(
                    "third-order blocks need a ply stack".to_string(),
                )),
            },
        }
    }

    /// Compute and store the transverse shear correction factors
    pub fn compute_shear_correction_factors(&mut self) -> LaminateResult<ShearCorrection> {
        let plies = match &self.layup {
            Layup::Stack(plies) => plies,
            Layup::Parametric { .. } => {
                return Err(LaminateError::MissingInput(
                    "shear correction factors need a ply stack".to_string(),
                ))
            }
        };
        let k = shear_correction::vlachoutsis(plies, self.offset)?;
        debug!("Shear correction factors k13 = {:.6}, k23 = {:.6}", k.k13, k.k23);
        self.shear_correction = k;
        Ok(k)
    }

    /// Last computed shear correction factors, 5/6 until computed
    pub fn shear_correction(&self) -> ShearCorrection {
        self.shear_correction
    }

    /// Transverse shear stiffness scaled by the shear correction factors
    pub fn corrected_transverse_shear(&self) -> LaminateResult<Mat2> {
        Ok(self.shear_correction.apply(&self.stiffness()?.atrans))
    }

    /// Equivalent membrane properties from the inverse of ABD
    pub fn equivalent_properties(&self) -> LaminateResult<EquivalentProperties> {
        let compliance = self
            .stiffness()?
            .abd()
            .try_inverse()
            .ok_or(LaminateError::SingularMatrix)?;
        let h = self.thickness();
        let (a11, a12, a22, a66) = (
            compliance[(0, 0)],
            compliance[(0, 1)],
            compliance[(1, 1)],
            compliance[(2, 2)],
        );
        Ok(EquivalentProperties {
            e1: 1.0 / (h * a11),
            e2: 1.0 / (h * a22),
            g12: 1.0 / (h * a66),
            nu12: -a12 / a11,
            nu21: -a12 / a22,
        })
    }
}

/// Through-thickness integration in stack order
fn integrate(plies: &[Ply], offset: f64) -> LaminateStiffness {
    let thicknesses: Vec<f64> = plies.iter().map(Ply::thickness).collect();
    let mut stiffness = LaminateStiffness::zeros_with_higher_order();
    for (ply, (z1, z2)) in plies.iter().zip(ply_bounds(&thicknesses, offset)) {
        trace!("ply {} deg from z = {z1} to z = {z2}", ply.theta_deg());
        stiffness.accumulate(ply.stiffness(), &ThicknessMoments::new(z1, z2));
    }
    stiffness
}

fn check_offset(offset: f64) -> LaminateResult<()> {
    if offset.is_finite() {
        Ok(())
    } else {
        Err(LaminateError::InvalidInput(format!("offset must be finite, got {offset}")))
    }
}

fn same_invariants(a: &Arc<Material>, b: &Arc<Material>) -> bool {
    if Arc::ptr_eq(a, b) {
        return true;
    }
    let (ua, ub) = (a.invariants(), b.invariants());
    let pairs = [
        (ua.u1, ub.u1),
        (ua.u2, ub.u2),
        (ua.u3, ub.u3),
        (ua.u4, ub.u4),
        (ua.u5, ub.u5),
        (ua.u6, ub.u6),
        (ua.u7, ub.u7),
    ];
    let scale = ua.u1.abs().max(ua.u6.abs());
    pairs.iter().all(|(x, y)| (x - y).abs() <= 1e-9 * scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn material() -> Arc<Material> {
        Arc::new(Material::new(&[71e9, 7e9, 0.28, 7e9, 7e9, 7e9], None).unwrap())
    }

    fn stack(angles: &[f64]) -> Laminate {
        let mat = material();
        let mut lam = Laminate::new();
        for &a in angles {
            lam.add_ply(a, 1.25e-4, Arc::clone(&mat)).unwrap();
        }
        lam
    }

    #[test]
    fn test_not_built_until_rebuild() {
        let mut lam = stack(&[0.0, 45.0]);
        assert!(matches!(lam.a(), Err(LaminateError::NotBuilt)));
        lam.rebuild().unwrap();
        assert!(lam.a().is_ok());

        lam.add_ply(90.0, 1.25e-4, material()).unwrap();
        assert!(!lam.is_built());
    }

    #[test]
    fn test_empty_laminate() {
        let mut lam = Laminate::new();
        assert!(matches!(lam.rebuild(), Err(LaminateError::EmptyLaminate)));
        assert!(matches!(lam.lamination_parameters(), Err(LaminateError::EmptyLaminate)));
    }

    #[test]
    fn test_constraints_survive_rebuild() {
        let mut lam = stack(&[0.0, 45.0, 90.0]);
        lam.rebuild().unwrap();
        lam.force_symmetric().unwrap();
        assert_eq!(lam.b().unwrap(), Mat3::zeros());

        lam.add_ply(30.0, 1.25e-4, material()).unwrap();
        lam.rebuild().unwrap();
        assert_eq!(lam.b().unwrap(), Mat3::zeros());
        assert_eq!(lam.constraints().first_active(), Some("symmetric"));
    }

    #[test]
    fn test_offset_rejected_with_constraints() {
        let mut lam = stack(&[0.0, 45.0]);
        lam.force_balanced().unwrap();
        assert!(matches!(
            lam.set_offset(1e-4),
            Err(LaminateError::OffsetConstraint { constraint: "balanced", .. })
        ));
        lam.clear_constraints();
        lam.set_offset(1e-4).unwrap();
        assert!(matches!(
            lam.force_smeared(),
            Err(LaminateError::OffsetConstraint { constraint: "smeared", .. })
        ));
        assert!(lam.force_symmetric_lp().is_err());
    }

    #[test]
    fn test_parametric_rejects_plies() {
        let lp = LaminationParameters::new([0.0; 4], [0.0; 4], [0.0; 4], [0.0; 4]);
        let mut lam = Laminate::from_lamination_parameters(1e-3, material(), lp).unwrap();
        assert!(lam.add_ply(0.0, 1e-4, material()).is_err());
        assert!(matches!(
            lam.constitutive_matrix(PlateTheory::ThirdOrder),
            Err(LaminateError::MissingInput(_))
        ));
        assert!(lam.compute_shear_correction_factors().is_err());
    }

    #[test]
    fn test_mixed_materials_cannot_be_parametric() {
        let mut lam = stack(&[0.0, 90.0]);
        let other = Arc::new(Material::isotropic(71e9, 0.3).unwrap());
        lam.add_ply(45.0, 1.25e-4, other).unwrap();
        assert!(matches!(lam.to_parametric(), Err(LaminateError::InvalidInput(_))));

        // equal properties behind different allocations are accepted
        let mut lam = stack(&[0.0]);
        lam.add_ply(45.0, 1.25e-4, material()).unwrap();
        assert!(lam.to_parametric().is_ok());
    }

    #[test]
    fn test_density() {
        let mat = Arc::new(Material::isotropic(71e9, 0.3).unwrap().with_density(2700.0).unwrap());
        let light = Arc::new(Material::isotropic(1e9, 0.3).unwrap());
        let mut lam = Laminate::new();
        lam.add_ply(0.0, 1.0, mat).unwrap();
        lam.add_ply(0.0, 3.0, light).unwrap();
        assert_relative_eq!(lam.density().unwrap(), 675.0);
        assert_relative_eq!(lam.thickness(), 4.0);
    }

    #[test]
    fn test_density_survives_parametric_conversion() {
        let dense = Arc::new(
            Material::new(&[71e9, 7e9, 0.28, 7e9, 7e9, 7e9], Some(1600.0)).unwrap(),
        );
        let mut lam = Laminate::new();
        lam.add_ply(0.0, 1.25e-4, dense).unwrap();
        lam.add_ply(90.0, 1.25e-4, material()).unwrap();
        lam.rebuild().unwrap();
        assert_relative_eq!(lam.density().unwrap(), 800.0);

        lam.force_symmetric_lp().unwrap();
        assert!(matches!(lam.layup(), Layup::Parametric { .. }));
        assert_relative_eq!(lam.density().unwrap(), 800.0);
    }

    #[test]
    fn test_parametric_offset_is_fixed() {
        let lp = LaminationParameters::new([0.0; 4], [0.0; 4], [0.0; 4], [0.0; 4]);
        let mut lam = Laminate::from_lamination_parameters(1e-3, material(), lp).unwrap();
        assert!(matches!(lam.set_offset(2e-4), Err(LaminateError::InvalidInput(_))));
        assert_eq!(lam.offset(), 0.0);
        assert!(lam.is_built());
        lam.force_symmetric().unwrap();
    }

    #[test]
    fn test_failed_shear_correction_leaves_laminate_unbuilt() {
        // transverse shear moduli far below the bending modulus
        let soft = Arc::new(Material::orthotropic(1e11, 1e10, 0.3, 1e9, 1e-10, 1e-10).unwrap());
        let mut lam = Laminate::new();
        lam.add_ply(0.0, 1e-3, soft).unwrap();
        assert!(matches!(lam.rebuild(), Err(LaminateError::InvalidProperty(_))));
        assert!(!lam.is_built());
        assert_eq!(lam.shear_correction(), ShearCorrection::default());

        lam.set_options(LaminateOptions::classical());
        lam.rebuild().unwrap();
        assert!(lam.is_built());
    }

    #[test]
    fn test_set_options_selects_theory() {
        let mut lam = stack(&[0.0, 45.0, 90.0]);
        lam.set_options(LaminateOptions::third_order());
        assert!(!lam.is_built());
        lam.rebuild().unwrap();
        assert_eq!(lam.constitutive().unwrap().size(), 13);
        assert!(lam.options().calc_scf);
        assert!(lam.shear_correction() != ShearCorrection::default());
    }

    #[test]
    fn test_equivalent_properties_of_isotropic_plate() {
        let mat = Arc::new(Material::isotropic(71e9, 0.3).unwrap());
        let mut lam = Laminate::new();
        lam.add_ply(0.0, 2e-3, mat).unwrap();
        lam.rebuild().unwrap();
        let eq = lam.equivalent_properties().unwrap();
        assert_relative_eq!(eq.e1, 71e9, max_relative = 1e-9);
        assert_relative_eq!(eq.e2, 71e9, max_relative = 1e-9);
        assert_relative_eq!(eq.nu12, 0.3, max_relative = 1e-9);
        assert_relative_eq!(eq.g12, 71e9 / 2.6, max_relative = 1e-9);
    }

    #[test]
    fn test_serde_drops_cached_stiffness() {
        let mut lam = stack(&[0.0, 45.0]);
        lam.rebuild().unwrap();
        let json = serde_json::to_string(&lam).unwrap();
        let mut back: Laminate = serde_json::from_str(&json).unwrap();
        assert!(!back.is_built());
        back.rebuild().unwrap();
        assert_eq!(back.a().unwrap(), lam.a().unwrap());
    }
}
