//! Lamina-level building blocks: materials and plies

mod material;
mod ply;

pub use material::{
    Invariants, Material, MaterialProperties, OutOfPlane, ReducedStiffness, TraceNormalized,
    STIFFNESS_TERMS,
};
pub use ply::{trig_moments, Ply, PlyDefinition, PlyStiffness, PlyTransforms};
