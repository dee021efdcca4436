#![allow(non_snake_case)]

//! Matrix helpers shared by the estimators.

use crate::error::{EstimateError, Result};
use crate::linalg::{multiply, transpose, Matrix};

/// Computes the quadratic form `X.S.X'`.
pub fn prod_spd(X: &Matrix, S: &Matrix) -> Result<Matrix> {
    multiply(&multiply(X, S)?, &transpose(X))
}

/// Checks the reciprocal condition number is >= 0.
///
/// IEC 559 NaN values are never true
pub fn check_non_negativ(rcond: f64, what: &'static str) -> Result<f64> {
    if rcond >= 0. {
        Ok(rcond)
    } else {
        Err(EstimateError::NotPsd { what })
    }
}
