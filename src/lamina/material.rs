//! Orthotropic lamina material properties
//!
//! References:
//! - Reddy, J. N., "Mechanics of Laminated Composite Plates and Shells",
//!   2nd Edition, CRC Press, 2004
//! - Jones, R. M., "Mechanics of Composite Materials", 2nd Edition, 1999
//! - Melo, J. D. D., Bi, J. and Tsai, S. W., "A Novel Invariant-Based Design
//!   Approach to Carbon Fiber Reinforced Laminates", Compos. Struct., 2017

use serde::{Deserialize, Serialize};

use crate::error::{LaminateError, LaminateResult};
use crate::math::{Mat6, Mat95};

/// Out-of-plane properties, only present for tri-axial materials
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutOfPlane {
    /// Young's modulus in direction 3
    pub e3: f64,
    /// Poisson's ratio 13
    pub nu13: f64,
    /// Poisson's ratio 31, from `nu31/e3 = nu13/e1`
    pub nu31: f64,
    /// Poisson's ratio 23
    pub nu23: f64,
    /// Poisson's ratio 32, from `nu32/e3 = nu23/e2`
    pub nu32: f64,
}

/// Raw property tuple used to define a material
///
/// Supported lengths:
/// - 2: `(E, nu)` isotropic
/// - 3: `(E1, E2, nu12)` legacy isotropic, only `E1` and `nu12` are used
/// - 6: `(E1, E2, nu12, G12, G13, G23)` orthotropic
/// - 9: `(E1, E2, nu12, G12, G13, G23, E3, nu13, nu23)` tri-axial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperties {
    pub laminaprop: Vec<f64>,
    #[serde(default)]
    pub rho: Option<f64>,
}

/// Reduced stiffness terms of a lamina in its material axes
///
/// Plane terms use the 3-D orthotropic relations; for materials without
/// out-of-plane data they are exactly the plane-stress reduced stiffness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReducedStiffness {
    pub q11: f64,
    pub q12: f64,
    pub q13: f64,
    pub q22: f64,
    pub q23: f64,
    pub q33: f64,
    /// Transverse shear 23 (G23)
    pub q44: f64,
    /// Transverse shear 13 (G13)
    pub q55: f64,
    /// In-plane shear 12 (G12)
    pub q66: f64,
}

impl ReducedStiffness {
    /// All terms multiplied by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            q11: self.q11 * factor,
            q12: self.q12 * factor,
            q13: self.q13 * factor,
            q22: self.q22 * factor,
            q23: self.q23 * factor,
            q33: self.q33 * factor,
            q44: self.q44 * factor,
            q55: self.q55 * factor,
            q66: self.q66 * factor,
        }
    }

    /// Trace of the plane stiffness `q11 + q22 + 2 q66`
    pub fn trace(&self) -> f64 {
        self.q11 + self.q22 + 2.0 * self.q66
    }
}

/// Rotation invariants of the reduced stiffness
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Invariants {
    pub u1: f64,
    pub u2: f64,
    pub u3: f64,
    pub u4: f64,
    pub u5: f64,
    /// Transverse shear mean `(q44 + q55)/2`
    pub u6: f64,
    /// Transverse shear deviation `(q44 - q55)/2`
    pub u7: f64,
}

impl Invariants {
    pub fn from_reduced(q: &ReducedStiffness) -> Self {
        let u1 = (3.0 * q.q11 + 3.0 * q.q22 + 2.0 * q.q12 + 4.0 * q.q66) / 8.0;
        let u2 = (q.q11 - q.q22) / 2.0;
        let u3 = (q.q11 + q.q22 - 2.0 * q.q12 - 4.0 * q.q66) / 8.0;
        let u4 = (q.q11 + q.q22 + 6.0 * q.q12 - 4.0 * q.q66) / 8.0;
        let u5 = (u1 - u4) / 2.0;
        let u6 = (q.q44 + q.q55) / 2.0;
        let u7 = (q.q44 - q.q55) / 2.0;
        Self { u1, u2, u3, u4, u5, u6, u7 }
    }

    /// Matrix mapping `[1, cos2t, sin2t, cos4t, sin4t]` weights onto the nine
    /// stiffness terms, rows ordered as [`STIFFNESS_TERMS`]
    pub fn matrix(&self) -> Mat95 {
        let Self { u1, u2, u3, u4, u5, u6, u7 } = *self;
        Mat95::from_row_slice(&[
            u1,   u2,  0.0,        u3,  0.0,    // 11
            u1,  -u2,  0.0,        u3,  0.0,    // 22
            u4,  0.0,  0.0,       -u3,  0.0,    // 12
            u5,  0.0,  0.0,       -u3,  0.0,    // 66
            0.0, 0.0,  u2 / 2.0,  0.0,   u3,    // 16
            0.0, 0.0,  u2 / 2.0,  0.0,  -u3,    // 26
            u6,   u7,  0.0,       0.0,  0.0,    // 44
            u6,  -u7,  0.0,       0.0,  0.0,    // 55
            0.0, 0.0,  -u7,       0.0,  0.0,    // 45
        ])
    }
}

/// Row order of [`Invariants::matrix`] and of rotated stiffness term vectors
pub const STIFFNESS_TERMS: [&str; 9] = ["11", "22", "12", "66", "16", "26", "44", "55", "45"];

/// Invariants rescaled by the trace `q11 + q22 + 2 q66`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceNormalized {
    pub trace: f64,
    pub stiffness: ReducedStiffness,
    pub invariants: Invariants,
}

/// Orthotropic lamina material
///
/// Built once from a validated property tuple; the reduced stiffness and
/// the invariants are derived at construction and never change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MaterialProperties", into = "MaterialProperties")]
pub struct Material {
    e1: f64,
    e2: f64,
    nu12: f64,
    nu21: f64,
    g12: f64,
    g13: f64,
    g23: f64,
    out_of_plane: Option<OutOfPlane>,
    rho: Option<f64>,
    stiffness: ReducedStiffness,
    invariants: Invariants,
}

impl Material {
    /// Create a material from a property tuple of length 2, 3, 6 or 9
    ///
    /// See [`MaterialProperties`] for the tuple layouts. For the isotropic
    /// forms the shear moduli are `G = E / (2 (1 + nu))`.
    pub fn new(laminaprop: &[f64], rho: Option<f64>) -> LaminateResult<Self> {
        if let Some(bad) = laminaprop.iter().find(|v| !v.is_finite()) {
            return Err(LaminateError::InvalidProperty(format!(
                "non-finite value {bad} in laminaprop"
            )));
        }
        match *laminaprop {
            [e, nu] => {
                let g = isotropic_shear_modulus(e, nu)?;
                Self::build(e, e, nu, g, g, g, None, rho)
            }
            [e, e2, nu] => {
                // legacy form, E2 is validated but unused
                check_modulus("e2", e2)?;
                let g = isotropic_shear_modulus(e, nu)?;
                Self::build(e, e, nu, g, g, g, None, rho)
            }
            [e1, e2, nu12, g12, g13, g23] => Self::build(e1, e2, nu12, g12, g13, g23, None, rho),
            [e1, e2, nu12, g12, g13, g23, e3, nu13, nu23] => {
                check_modulus("e3", e3)?;
                let out_of_plane = OutOfPlane {
                    e3,
                    nu13,
                    nu31: nu13 * e3 / e1,
                    nu23,
                    nu32: nu23 * e3 / e2,
                };
                Self::build(e1, e2, nu12, g12, g13, g23, Some(out_of_plane), rho)
            }
            _ => Err(LaminateError::InvalidProperty(format!(
                "laminaprop must have 2, 3, 6 or 9 entries, got {}",
                laminaprop.len()
            ))),
        }
    }

    /// Isotropic material for in-plane stresses
    pub fn isotropic(e: f64, nu: f64) -> LaminateResult<Self> {
        Self::new(&[e, nu], None)
    }

    /// Orthotropic material for in-plane stresses
    pub fn orthotropic(e1: f64, e2: f64, nu12: f64, g12: f64, g13: f64, g23: f64) -> LaminateResult<Self> {
        Self::new(&[e1, e2, nu12, g12, g13, g23], None)
    }

    /// Set the material density
    pub fn with_density(mut self, rho: f64) -> LaminateResult<Self> {
        check_density(Some(rho))?;
        self.rho = Some(rho);
        Ok(self)
    }

    #[allow(clippy::too_many_arguments)]
    fn build(
        e1: f64,
        e2: f64,
        nu12: f64,
        g12: f64,
        g13: f64,
        g23: f64,
        out_of_plane: Option<OutOfPlane>,
        rho: Option<f64>,
    ) -> LaminateResult<Self> {
        check_modulus("e1", e1)?;
        check_modulus("e2", e2)?;
        check_modulus("g12", g12)?;
        check_modulus("g13", g13)?;
        check_modulus("g23", g23)?;
        check_density(rho)?;

        let nu21 = nu12 * e2 / e1;
        let stiffness = reduced_stiffness(e1, e2, nu12, nu21, g12, g13, g23, out_of_plane.as_ref())?;
        let invariants = Invariants::from_reduced(&stiffness);

        Ok(Self {
            e1,
            e2,
            nu12,
            nu21,
            g12,
            g13,
            g23,
            out_of_plane,
            rho,
            stiffness,
            invariants,
        })
    }

    pub fn e1(&self) -> f64 {
        self.e1
    }

    pub fn e2(&self) -> f64 {
        self.e2
    }

    pub fn nu12(&self) -> f64 {
        self.nu12
    }

    pub fn nu21(&self) -> f64 {
        self.nu21
    }

    pub fn g12(&self) -> f64 {
        self.g12
    }

    pub fn g13(&self) -> f64 {
        self.g13
    }

    pub fn g23(&self) -> f64 {
        self.g23
    }

    /// Out-of-plane properties, `None` for plane-stress materials
    pub fn out_of_plane(&self) -> Option<&OutOfPlane> {
        self.out_of_plane.as_ref()
    }

    pub fn rho(&self) -> Option<f64> {
        self.rho
    }

    /// Reduced stiffness terms in the material axes
    pub fn reduced_stiffness(&self) -> &ReducedStiffness {
        &self.stiffness
    }

    /// Rotation invariants u1..u7
    pub fn invariants(&self) -> &Invariants {
        &self.invariants
    }

    /// Invariant matrix mapping lamination parameters to stiffness terms
    pub fn invariant_matrix(&self) -> Mat95 {
        self.invariants.matrix()
    }

    /// Trace of the plane reduced stiffness `q11 + q22 + 2 q66`
    pub fn trace(&self) -> f64 {
        self.stiffness.trace()
    }

    /// Stiffness and invariants divided by the trace
    pub fn trace_normalized(&self) -> TraceNormalized {
        let trace = self.trace();
        let stiffness = self.stiffness.scaled(1.0 / trace);
        TraceNormalized {
            trace,
            stiffness,
            invariants: Invariants::from_reduced(&stiffness),
        }
    }

    /// Full 6x6 stiffness matrix in Voigt order `[11, 22, 33, 23, 13, 12]`
    pub fn stiffness_3d(&self) -> Mat6 {
        let q = &self.stiffness;
        Mat6::new(
            q.q11, q.q12, q.q13, 0.0,   0.0,   0.0,
            q.q12, q.q22, q.q23, 0.0,   0.0,   0.0,
            q.q13, q.q23, q.q33, 0.0,   0.0,   0.0,
            0.0,   0.0,   0.0,   q.q44, 0.0,   0.0,
            0.0,   0.0,   0.0,   0.0,   q.q55, 0.0,
            0.0,   0.0,   0.0,   0.0,   0.0,   q.q66,
        )
    }

    /// The property tuple this material was built from, in its 6 or 9 entry form
    pub fn laminaprop(&self) -> Vec<f64> {
        let mut prop = vec![self.e1, self.e2, self.nu12, self.g12, self.g13, self.g23];
        if let Some(o) = &self.out_of_plane {
            prop.extend([o.e3, o.nu13, o.nu23]);
        }
        prop
    }
}

impl TryFrom<MaterialProperties> for Material {
    type Error = LaminateError;

    fn try_from(props: MaterialProperties) -> LaminateResult<Self> {
        Self::new(&props.laminaprop, props.rho)
    }
}

impl From<Material> for MaterialProperties {
    fn from(material: Material) -> Self {
        Self {
            laminaprop: material.laminaprop(),
            rho: material.rho,
        }
    }
}

fn check_modulus(name: &str, value: f64) -> LaminateResult<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(LaminateError::InvalidProperty(format!(
            "{name} must be positive, got {value}"
        )))
    }
}

fn check_density(rho: Option<f64>) -> LaminateResult<()> {
    match rho {
        Some(rho) if !(rho.is_finite() && rho >= 0.0) => Err(LaminateError::InvalidProperty(
            format!("density must be non-negative, got {rho}"),
        )),
        _ => Ok(()),
    }
}

fn isotropic_shear_modulus(e: f64, nu: f64) -> LaminateResult<f64> {
    check_modulus("e", e)?;
    if nu <= -1.0 {
        return Err(LaminateError::InvalidProperty(format!(
            "isotropic Poisson's ratio must be greater than -1, got {nu}"
        )));
    }
    Ok(e / (2.0 * (1.0 + nu)))
}

/// Closed-form stiffness of an orthotropic solid, Jones (1999) eq. 2.80
#[allow(clippy::too_many_arguments)]
fn reduced_stiffness(
    e1: f64,
    e2: f64,
    nu12: f64,
    nu21: f64,
    g12: f64,
    g13: f64,
    g23: f64,
    out_of_plane: Option<&OutOfPlane>,
) -> LaminateResult<ReducedStiffness> {
    let (e3, nu13, nu31, nu23, nu32) = match out_of_plane {
        Some(o) => (o.e3, o.nu13, o.nu31, o.nu23, o.nu32),
        None => (0.0, 0.0, 0.0, 0.0, 0.0),
    };

    for (pair, product) in [
        ("12", nu12 * nu21),
        ("13", nu13 * nu31),
        ("23", nu23 * nu32),
    ] {
        if product >= 1.0 {
            return Err(LaminateError::InvalidProperty(format!(
                "Poisson's ratios {pair} give a non positive-definite compliance"
            )));
        }
    }

    let den = 1.0 - nu12 * nu21 - nu13 * nu31 - nu23 * nu32 - 2.0 * nu21 * nu32 * nu13;
    if den <= 0.0 {
        return Err(LaminateError::InvalidProperty(
            "Poisson's ratios give a non positive-definite compliance".to_string(),
        ));
    }

    Ok(ReducedStiffness {
        q11: e1 * (1.0 - nu23 * nu32) / den,
        q12: e1 * (nu21 + nu23 * nu31) / den,
        q13: e1 * (nu31 + nu21 * nu32) / den,
        q22: e2 * (1.0 - nu13 * nu31) / den,
        q23: e2 * (nu32 + nu12 * nu31) / den,
        q33: e3 * (1.0 - nu12 * nu21) / den,
        q44: g23,
        q55: g13,
        q66: g12,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_isotropic_shorthand_forms() {
        let a = Material::new(&[71e9, 0.33], None).unwrap();
        let b = Material::new(&[71e9, 71e9, 0.33], None).unwrap();
        assert_eq!(a, b);

        let g = 71e9 / (2.0 * 1.33);
        assert_relative_eq!(a.g12(), g);
        assert_relative_eq!(a.g13(), g);
        assert_relative_eq!(a.g23(), g);
        assert!(a.out_of_plane().is_none());
    }

    #[test]
    fn test_plane_stress_reduction() {
        let e = 71e9;
        let nu = 0.28;
        let mat = Material::isotropic(e, nu).unwrap();
        let q = mat.reduced_stiffness();
        assert_relative_eq!(q.q11, e / (1.0 - nu * nu), max_relative = 1e-12);
        assert_relative_eq!(q.q12, nu * e / (1.0 - nu * nu), max_relative = 1e-12);
        assert_eq!(q.q33, 0.0);
        assert_eq!(q.q13, 0.0);
    }

    #[test]
    fn test_reciprocity() {
        let mat = Material::new(&[142e9, 7.72e9, 0.34, 3.8e9, 3.8e9, 2.9e9, 8.1e9, 0.31, 0.45], None)
            .unwrap();
        assert_relative_eq!(mat.nu12() / mat.e1(), mat.nu21() / mat.e2(), max_relative = 1e-12);
        let o = mat.out_of_plane().unwrap();
        assert_relative_eq!(o.nu13 / mat.e1(), o.nu31 / o.e3, max_relative = 1e-12);
        assert_relative_eq!(o.nu23 / mat.e2(), o.nu32 / o.e3, max_relative = 1e-12);
    }

    #[test]
    fn test_tri_axial_isotropic_stiffness() {
        let e = 71e9;
        let nu = 0.33;
        let g = e / (2.0 * (1.0 + nu));
        let mat = Material::new(&[e, e, nu, g, g, g, e, nu, nu], None).unwrap();
        let q = mat.reduced_stiffness();
        let factor = e / ((1.0 + nu) * (1.0 - 2.0 * nu));
        assert_relative_eq!(q.q11, factor * (1.0 - nu), max_relative = 1e-12);
        assert_relative_eq!(q.q12, factor * nu, max_relative = 1e-12);
        assert_relative_eq!(q.q13, factor * nu, max_relative = 1e-12);
        assert_relative_eq!(q.q33, factor * (1.0 - nu), max_relative = 1e-12);

        let c = mat.stiffness_3d();
        assert_relative_eq!(c, c.transpose());
    }

    #[test]
    fn test_invalid_properties() {
        assert!(matches!(
            Material::new(&[71e9, 0.3, 1.0, 2.0], None),
            Err(LaminateError::InvalidProperty(_))
        ));
        assert!(Material::new(&[-71e9, 0.3], None).is_err());
        assert!(Material::new(&[71e9, 7e9, 0.28, 0.0, 7e9, 7e9], None).is_err());
        assert!(Material::new(&[71e9, 7e9, 0.28, 7e9, 7e9, 7e9, -1.0, 0.3, 0.3], None).is_err());
        assert!(Material::new(&[71e9, f64::NAN], None).is_err());
        assert!(matches!(
            Material::new(&[71e9, -5.0, 0.3], None),
            Err(LaminateError::InvalidProperty(_))
        ));
        // nu12 * nu21 > 1
        assert!(Material::new(&[10e9, 10e9, 1.2, 4e9, 4e9, 4e9], None).is_err());
        assert!(Material::isotropic(71e9, 0.3).unwrap().with_density(-1.0).is_err());
    }

    #[test]
    fn test_invariants_of_isotropic_material() {
        let mat = Material::isotropic(71e9, 0.3).unwrap();
        let u = mat.invariants();
        let q = mat.reduced_stiffness();
        assert_relative_eq!(u.u1, q.q11, max_relative = 1e-10);
        assert_relative_eq!(u.u2, 0.0);
        assert_relative_eq!(u.u3, 0.0, epsilon = 1e-3);
        assert_relative_eq!(u.u4, q.q12, max_relative = 1e-10);
        assert_relative_eq!(u.u5, q.q66, max_relative = 1e-10);
        assert_relative_eq!(u.u7, 0.0);
    }

    #[test]
    fn test_invariant_matrix_rows() {
        let mat = Material::orthotropic(142e9, 7.72e9, 0.34, 3.8e9, 3.8e9, 2.9e9).unwrap();
        let u = mat.invariant_matrix();
        let q = mat.reduced_stiffness();
        // a 0 deg ply has weights [1, 1, 0, 1, 0]
        let terms = u * crate::math::Vec5::new(1.0, 1.0, 0.0, 1.0, 0.0);
        let row = |name: &str| STIFFNESS_TERMS.iter().position(|t| *t == name).unwrap();
        assert_eq!(STIFFNESS_TERMS.len(), 9);
        assert_relative_eq!(terms[row("11")], q.q11, max_relative = 1e-12);
        assert_relative_eq!(terms[row("22")], q.q22, max_relative = 1e-12);
        assert_relative_eq!(terms[row("12")], q.q12, max_relative = 1e-12);
        assert_relative_eq!(terms[row("66")], q.q66, max_relative = 1e-12);
        assert_relative_eq!(terms[row("44")], q.q44, max_relative = 1e-12);
        assert_relative_eq!(terms[row("55")], q.q55, max_relative = 1e-12);
        assert_eq!(terms[row("45")], 0.0);
    }

    #[test]
    fn test_trace_normalization() {
        // IM6/epoxy, trace reported as 232 GPa
        let mat = Material::orthotropic(203e9, 11.2e9, 0.32, 8.4e9, 8.4e9, 8.4e9).unwrap();
        let normalized = mat.trace_normalized();
        assert_relative_eq!(normalized.trace, 232e9, max_relative = 0.01);
        assert_relative_eq!(normalized.stiffness.trace(), 1.0, max_relative = 1e-12);

        let u = mat.invariants();
        let un = normalized.invariants;
        assert_relative_eq!(un.u1 * normalized.trace, u.u1, max_relative = 1e-12);
        assert_relative_eq!(un.u3 * normalized.trace, u.u3, max_relative = 1e-12);
        assert_relative_eq!(un.u6 * normalized.trace, u.u6, max_relative = 1e-12);
    }

    #[test]
    fn test_serde_roundtrip() {
        let mat = Material::new(&[71e9, 7e9, 0.28, 7e9, 7e9, 7e9], Some(1600.0)).unwrap();
        let json = serde_json::to_string(&mat).unwrap();
        let back: Material = serde_json::from_str(&json).unwrap();
        assert_eq!(mat, back);
    }
}
