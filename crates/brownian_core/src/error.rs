use thiserror::Error;

use crate::config::ManifoldKind;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ManifoldError {
    #[error("{0} is not a recognized manifold!")]
    UnknownManifold(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A sphere-only operation was called on a cylinder configuration, or the reverse.
    #[error("the {configured} manifold is not used for the {operation} method!")]
    ManifoldMismatch {
        operation: &'static str,
        configured: ManifoldKind,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Numerical degeneracy: {0}")]
    NumericalDegeneracy(String),

    #[error("Invalid snapshot selection: {0}")]
    InvalidSnapshot(String),
}

pub type Result<T> = std::result::Result<T, ManifoldError>;
