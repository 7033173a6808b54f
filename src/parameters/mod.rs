//! Lamination parameters
//!
//! Four 5-component vectors summarize the orientation distribution of a
//! stack. Component 0 is the leading constant, components 1..4 are the
//! thickness-weighted `cos2t, sin2t, cos4t, sin4t` moments. Together with
//! a material and a total thickness they give the homogenized stiffness:
//!
//! ```text
//! A      = h      U ξA
//! B      = h²/4   U ξB
//! D      = h³/12  U ξD
//! Atrans = h      U ξE
//! ```
//!
//! References:
//! - Tsai, S. W. and Pagano, N. J., "Invariant properties of composite
//!   materials", 1968

mod gradient;

pub use gradient::LaminationParameterGradient;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::error::{LaminateError, LaminateResult};
use crate::lamina::{Ply, PlyStiffness};
use crate::math::integration::ply_bounds;
use crate::math::{Mat95, Vec5};
use crate::results::LaminateStiffness;

/// Identifies one of the four lamination parameter vectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterVector {
    /// Extensional parameters ξA
    A,
    /// Coupling parameters ξB
    B,
    /// Bending parameters ξD
    D,
    /// Transverse shear parameters ξE
    E,
}

impl ParameterVector {
    pub const ALL: [ParameterVector; 4] = [Self::A, Self::B, Self::D, Self::E];
}

/// Lamination parameter vectors ξA, ξB, ξD and ξE
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaminationParameters {
    pub xi_a: Vec5,
    pub xi_b: Vec5,
    pub xi_d: Vec5,
    pub xi_e: Vec5,
}

impl LaminationParameters {
    /// Parameters of a laminate without offset
    ///
    /// Each argument holds components 1..4; the leading constants are
    /// 1 for ξA, ξD and ξE and 0 for ξB.
    pub fn new(xi_a: [f64; 4], xi_b: [f64; 4], xi_d: [f64; 4], xi_e: [f64; 4]) -> Self {
        let vector = |lead: f64, xi: [f64; 4]| Vec5::new(lead, xi[0], xi[1], xi[2], xi[3]);
        Self {
            xi_a: vector(1.0, xi_a),
            xi_b: vector(0.0, xi_b),
            xi_d: vector(1.0, xi_d),
            xi_e: vector(1.0, xi_e),
        }
    }

    /// All vectors zero, leading constants included
    pub fn zeros() -> Self {
        Self {
            xi_a: Vec5::zeros(),
            xi_b: Vec5::zeros(),
            xi_d: Vec5::zeros(),
            xi_e: Vec5::zeros(),
        }
    }

    /// Parameters of an ordered ply stack whose reference surface is shifted by `offset`
    pub fn from_plies(plies: &[Ply], offset: f64) -> LaminateResult<Self> {
        if plies.is_empty() {
            return Err(LaminateError::EmptyLaminate);
        }
        let thicknesses: Vec<f64> = plies.iter().map(Ply::thickness).collect();
        let h: f64 = thicknesses.iter().sum();

        let mut lp = Self::zeros();
        for (ply, (z1, z2)) in plies.iter().zip(ply_bounds(&thicknesses, offset)) {
            let a_fac = (z2 - z1) / h;
            let b_fac = 2.0 / h.powi(2) * (z2 * z2 - z1 * z1);
            let d_fac = 4.0 / h.powi(3) * (z2.powi(3) - z1.powi(3));
            let e_fac = a_fac;

            let moments = ply.trig_moments();
            lp.xi_a += moments * a_fac;
            lp.xi_b += moments * b_fac;
            lp.xi_d += moments * d_fac;
            lp.xi_e += moments * e_fac;
        }

        // the leading constants only depend on the offset
        let ratio = offset / h;
        lp.xi_a[0] = 1.0;
        lp.xi_b[0] = 4.0 * ratio;
        lp.xi_d[0] = 1.0 + 12.0 * ratio * ratio;
        lp.xi_e[0] = 1.0;

        trace!("lamination parameters of {} plies: {:?}", plies.len(), lp);
        Ok(lp)
    }

    pub fn vector(&self, which: ParameterVector) -> &Vec5 {
        match which {
            ParameterVector::A => &self.xi_a,
            ParameterVector::B => &self.xi_b,
            ParameterVector::D => &self.xi_d,
            ParameterVector::E => &self.xi_e,
        }
    }

    pub fn vector_mut(&mut self, which: ParameterVector) -> &mut Vec5 {
        match which {
            ParameterVector::A => &mut self.xi_a,
            ParameterVector::B => &mut self.xi_b,
            ParameterVector::D => &mut self.xi_d,
            ParameterVector::E => &mut self.xi_e,
        }
    }

    /// Zero ξA2 and ξA4 (A16 = A26 = 0)
    pub fn force_balanced(&mut self) {
        self.xi_a[2] = 0.0;
        self.xi_a[4] = 0.0;
    }

    /// Zero ξB (B = 0)
    pub fn force_symmetric(&mut self) {
        self.xi_b = Vec5::zeros();
    }

    /// Zero the sine components of ξA, ξB and ξD (all 16/26 terms vanish)
    pub fn force_orthotropic(&mut self) {
        for xi in [&mut self.xi_a, &mut self.xi_b, &mut self.xi_d] {
            xi[2] = 0.0;
            xi[4] = 0.0;
        }
    }

    /// Homogeneous through the thickness: ξB = 0 and ξD = ξA
    pub fn force_smeared(&mut self) {
        self.xi_b = Vec5::zeros();
        self.xi_d = self.xi_a;
    }

    /// Stiffness of a laminate of total thickness `thickness` whose
    /// material has the invariant matrix `u`
    ///
    /// The third-order blocks are not defined by lamination parameters and
    /// are left empty.
    pub fn stiffness(&self, thickness: f64, u: &Mat95) -> LaminateStiffness {
        let h = thickness;
        let block = |xi: &Vec5| PlyStiffness::from_invariants(u, xi);
        LaminateStiffness {
            a: block(&self.xi_a).in_plane() * h,
            b: block(&self.xi_b).in_plane() * (h * h / 4.0),
            d: block(&self.xi_d).in_plane() * (h.powi(3) / 12.0),
            atrans: block(&self.xi_e).transverse() * h,
            higher_order: None,
        }
    }
}
