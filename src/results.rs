//! Result types for laminate calculations

use serde::{Deserialize, Serialize};

use crate::lamina::PlyStiffness;
use crate::math::{Mat2, Mat3, Mat4, Mat6, Mat8, Mat9, ThicknessMoments, SHEAR_COUPLING_ENTRIES};

/// Default shear correction factor of a homogeneous plate
pub const DEFAULT_SHEAR_CORRECTION: f64 = 5.0 / 6.0;

/// Higher-order blocks used by the third-order shear deformation theory
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HigherOrderStiffness {
    /// `∫ Q z³ dz`
    pub e: Mat3,
    /// `∫ Q z⁴ dz`
    pub f: Mat3,
    /// `∫ Q z⁶ dz`
    pub h: Mat3,
    /// `∫ Qs z² dz`
    pub dtrans: Mat2,
    /// `∫ Qs z⁴ dz`
    pub ftrans: Mat2,
}

/// Laminate stiffness matrices
///
/// Transverse shear blocks are ordered with the yz (44) term first and the
/// xz (55) term second.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LaminateStiffness {
    /// Extensional stiffness
    pub a: Mat3,
    /// Extension-bending coupling
    pub b: Mat3,
    /// Bending stiffness
    pub d: Mat3,
    /// Transverse shear stiffness
    pub atrans: Mat2,
    /// Third-order blocks, only available when the ply distribution is known
    pub higher_order: Option<HigherOrderStiffness>,
}

impl LaminateStiffness {
    /// Empty accumulator for through-thickness integration
    pub(crate) fn zeros_with_higher_order() -> Self {
        Self {
            higher_order: Some(HigherOrderStiffness::default()),
            ..Self::default()
        }
    }

    /// Add the contribution of one ply spanning the given moments
    pub(crate) fn accumulate(&mut self, q: &PlyStiffness, m: &ThicknessMoments) {
        let qp = q.in_plane();
        let qs = q.transverse();
        self.a += qp * m.a;
        self.b += qp * m.b;
        self.d += qp * m.d;
        self.atrans += qs * m.a;
        if let Some(ho) = self.higher_order.as_mut() {
            ho.e += qp * m.e;
            ho.f += qp * m.f;
            ho.h += qp * m.h;
            ho.dtrans += qs * m.d;
            ho.ftrans += qs * m.f;
        }
    }

    /// Classical laminated plate theory ABD matrix (6x6)
    pub fn abd(&self) -> Mat6 {
        let mut abd = Mat6::zeros();
        abd.fixed_view_mut::<3, 3>(0, 0).copy_from(&self.a);
        abd.fixed_view_mut::<3, 3>(0, 3).copy_from(&self.b);
        abd.fixed_view_mut::<3, 3>(3, 0).copy_from(&self.b);
        abd.fixed_view_mut::<3, 3>(3, 3).copy_from(&self.d);
        abd
    }

    /// First-order shear deformation ABDE matrix (8x8)
    pub fn abde(&self) -> Mat8 {
        let mut abde = Mat8::zeros();
        abde.fixed_view_mut::<6, 6>(0, 0).copy_from(&self.abd());
        abde.fixed_view_mut::<2, 2>(6, 6).copy_from(&self.atrans);
        abde
    }

    /// Third-order in-plane matrix `[A B E; B D F; E F H]`
    pub fn tsdt_in_plane(&self) -> Option<Mat9> {
        let ho = self.higher_order.as_ref()?;
        let mut m = Mat9::zeros();
        let blocks = [
            [&self.a, &self.b, &ho.e],
            [&self.b, &self.d, &ho.f],
            [&ho.e, &ho.f, &ho.h],
        ];
        for (i, row) in blocks.iter().enumerate() {
            for (j, block) in row.iter().enumerate() {
                m.fixed_view_mut::<3, 3>(3 * i, 3 * j).copy_from(*block);
            }
        }
        Some(m)
    }

    /// Third-order transverse shear matrix `[Atrans Dtrans; Dtrans Ftrans]`
    pub fn tsdt_transverse(&self) -> Option<Mat4> {
        let ho = self.higher_order.as_ref()?;
        let mut m = Mat4::zeros();
        m.fixed_view_mut::<2, 2>(0, 0).copy_from(&self.atrans);
        m.fixed_view_mut::<2, 2>(0, 2).copy_from(&ho.dtrans);
        m.fixed_view_mut::<2, 2>(2, 0).copy_from(&ho.dtrans);
        m.fixed_view_mut::<2, 2>(2, 2).copy_from(&ho.ftrans);
        Some(m)
    }

    /// Zero the extension-bending coupling (and the odd third-order block E)
    pub(crate) fn zero_coupling(&mut self) {
        self.b = Mat3::zeros();
        if let Some(ho) = self.higher_order.as_mut() {
            ho.e = Mat3::zeros();
        }
    }

    /// Zero A16 and A26
    pub(crate) fn zero_extension_shear_coupling(&mut self) {
        zero_shear_coupling(&mut self.a);
    }

    /// Zero every 16/26 term of the in-plane blocks
    pub(crate) fn zero_all_shear_coupling(&mut self) {
        zero_shear_coupling(&mut self.a);
        zero_shear_coupling(&mut self.b);
        zero_shear_coupling(&mut self.d);
        if let Some(ho) = self.higher_order.as_mut() {
            zero_shear_coupling(&mut ho.e);
            zero_shear_coupling(&mut ho.f);
            zero_shear_coupling(&mut ho.h);
        }
    }

    /// Homogeneous thin-plate limit: bending and higher-order terms follow from A
    pub(crate) fn smear(&mut self, thickness: f64) {
        let h2 = thickness * thickness;
        let h4 = h2 * h2;
        self.b = Mat3::zeros();
        self.d = self.a * (h2 / 12.0);
        if let Some(ho) = self.higher_order.as_mut() {
            ho.e = Mat3::zeros();
            ho.f = self.a * (h4 / 80.0);
            ho.h = self.a * (h4 * h2 / 448.0);
            ho.dtrans = self.atrans * (h2 / 12.0);
            ho.ftrans = self.atrans * (h4 / 80.0);
        }
    }
}

fn zero_shear_coupling(m: &mut Mat3) {
    for (i, j) in SHEAR_COUPLING_ENTRIES {
        m[(i, j)] = 0.0;
    }
}

/// Constitutive matrix of a laminate for a given plate theory
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ConstitutiveMatrix {
    /// ABD (6x6)
    Classical(Mat6),
    /// ABDE (8x8) with the transverse shear block
    FirstOrder(Mat8),
    /// `[A B E; B D F; E F H]` (9x9) and `[Atrans Dtrans; Dtrans Ftrans]` (4x4)
    ThirdOrder { in_plane: Mat9, transverse: Mat4 },
}

impl ConstitutiveMatrix {
    /// Matrix size along one dimension, transverse block included
    pub fn size(&self) -> usize {
        match self {
            Self::Classical(_) => 6,
            Self::FirstOrder(_) => 8,
            Self::ThirdOrder { .. } => 13,
        }
    }
}

/// Transverse shear correction factors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShearCorrection {
    /// Factor for the xz (13) shear
    pub k13: f64,
    /// Factor for the yz (23) shear
    pub k23: f64,
}

impl Default for ShearCorrection {
    fn default() -> Self {
        Self {
            k13: DEFAULT_SHEAR_CORRECTION,
            k23: DEFAULT_SHEAR_CORRECTION,
        }
    }
}

impl ShearCorrection {
    /// Scale a transverse shear block ordered `[yz, xz]`
    pub fn apply(&self, atrans: &Mat2) -> Mat2 {
        let k45 = (self.k13 * self.k23).sqrt();
        Mat2::new(
            self.k23 * atrans[(0, 0)], k45 * atrans[(0, 1)],
            k45 * atrans[(1, 0)],      self.k13 * atrans[(1, 1)],
        )
    }
}

/// Equivalent (smeared) membrane properties of a laminate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquivalentProperties {
    pub e1: f64,
    pub e2: f64,
    pub g12: f64,
    pub nu12: f64,
    pub nu21: f64,
}
