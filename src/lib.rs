//! Composites - laminated plate stiffness in native Rust
//!
//! This library homogenizes a stack of orthotropic plies into plate
//! stiffness matrices, supporting:
//! - Classical, first-order and third-order shear deformation theories
//! - Lamination parameters and the parametric (inverse) stiffness path
//! - Symmetric, balanced, orthotropic and smeared constraints
//! - Improved transverse shear correction factors (Vlachoutsis)
//! - Homogenized double-double laminates
//!
//! ## Example
//! ```rust
//! use composites::prelude::*;
//!
//! let lam = laminated_plate(&[0.0, 45.0, 90.0], 1.25e-4, &[71e9, 7e9, 0.28, 7e9, 7e9, 7e9]).unwrap();
//!
//! let abd = lam.abd().unwrap();
//! assert!((abd[(0, 0)] - 1.3280892e7).abs() < 1.0);
//!
//! let lp = lam.lamination_parameters().unwrap();
//! let material = lam.common_material().unwrap();
//! let same = Laminate::from_lamination_parameters(lam.thickness(), material, lp).unwrap();
//! assert!((same.a().unwrap() - lam.a().unwrap()).amax() < 1e-3);
//! ```

pub mod analysis;
pub mod error;
pub mod lamina;
pub mod laminate;
pub mod math;
pub mod parameters;
pub mod results;
pub mod stack;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::{LaminateOptions, PlateTheory};
    pub use crate::error::{LaminateError, LaminateResult};
    pub use crate::lamina::{Material, Ply, PlyStiffness};
    pub use crate::laminate::{Constraints, Laminate, Layup};
    pub use crate::parameters::{LaminationParameterGradient, LaminationParameters, ParameterVector};
    pub use crate::results::{
        ConstitutiveMatrix, EquivalentProperties, HigherOrderStiffness, LaminateStiffness,
        ShearCorrection,
    };
    pub use crate::stack::{
        double_double_plate, isotropic_plate, laminated_plate, n_double_plate, StackDefinition,
    };
}
