//! Error types for laminate calculations

use thiserror::Error;

/// Main error type for laminate operations
#[derive(Error, Debug)]
pub enum LaminateError {
    #[error("Invalid material property: {0}")]
    InvalidProperty(String),

    #[error("Laminate has no plies and no lamination parameters")]
    EmptyLaminate,

    #[error("Laminate with offset {offset} cannot be forced {constraint}")]
    OffsetConstraint {
        constraint: &'static str,
        offset: f64,
    },

    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Convergence failed after {0} iterations")]
    ConvergenceFailed(usize),

    #[error("Laminate not built - run rebuild() first")]
    NotBuilt,

    #[error("Singular ABD matrix - equivalent properties are undefined")]
    SingularMatrix,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for laminate operations
pub type LaminateResult<T> = Result<T, LaminateError>;
