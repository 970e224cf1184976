//! Error types for fembench operations.
//!
//! Numerical trouble inside a solver is never an `Error`: solvers log a
//! diagnostic and still hand back a vector of the right length. These variants
//! cover construction-time validation and the few operations that report
//! failure through their return value.

use thiserror::Error;

/// Result type alias using fembench Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during fembench operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Mesh-related errors.
    #[error("mesh error: {0}")]
    Mesh(String),

    /// Invalid material properties.
    #[error("invalid material: {0}")]
    InvalidMaterial(String),

    /// Assembly or boundary-condition errors.
    #[error("assembly error: {0}")]
    Assembly(String),

    /// Two vectors (or a matrix and a vector) that must agree in length do not.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// Cholesky factorization hit a non-positive diagonal or a vanishing pivot.
    #[error("matrix is not positive definite (row {row})")]
    NotPositiveDefinite { row: usize },

    /// I/O errors while exporting result tables.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
