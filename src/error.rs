//! Estimation and simulation errors.
//!
//! None of these are transient: the model parameters of a run are fixed, so a failure
//! indicates a configuration defect and is propagated to the caller unchanged.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EstimateError {
    /// Operand dimensions are incompatible, `lhs` and `rhs` are (rows, cols).
    #[error("shape mismatch in {op}: {lhs:?} and {rhs:?}")]
    ShapeMismatch {
        op: &'static str,
        lhs: (usize, usize),
        rhs: (usize, usize),
    },

    /// Inversion is undefined within the numerical tolerance.
    #[error("matrix is singular (rcond {rcond:e})")]
    Singular { rcond: f64 },

    #[error("{what} not PSD")]
    NotPsd { what: &'static str },

    /// Noise standard deviations must be finite and non-negative.
    #[error("invalid noise standard deviation {value} at component {index}")]
    InvalidStdDev { index: usize, value: f64 },

    #[error("simulation cancelled after {completed} steps")]
    Cancelled { completed: usize },
}

pub type Result<T> = std::result::Result<T, EstimateError>;
