//! Linear algebra utilities.
//!
//! Shape checked construction and elementary operations over dynamically sized real matrices
//! and vectors. Values are nalgebra's [`DMatrix`] and [`DVector`]; every operation takes its
//! operands by reference and returns a new value, so no operation aliases or modifies its inputs.
//!
//! Non-conformant operands are reported as [`EstimateError::ShapeMismatch`] before any nalgebra
//! kernel can panic on them.

pub mod rcond;

use nalgebra::{DMatrix, DVector};

use crate::error::{EstimateError, Result};
use rcond::{rcond_abs_vec, RCOND_LIMIT};

/// Real valued matrix.
pub type Matrix = DMatrix<f64>;
/// Real valued column vector.
pub type Vector = DVector<f64>;

fn shape_check(op: &'static str, ok: bool, lhs: (usize, usize), rhs: (usize, usize)) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(EstimateError::ShapeMismatch { op, lhs, rhs })
    }
}

/// Creates a vector from an ordered list, the length is the list size.
pub fn create_vector(values: &[f64]) -> Vector {
    Vector::from_column_slice(values)
}

/// Creates a `rows` x `cols` matrix from a flat row-major list.
pub fn create_matrix(rows: usize, cols: usize, values: &[f64]) -> Result<Matrix> {
    shape_check("create_matrix", values.len() == rows * cols, (rows, cols), (values.len(), 1))?;
    Ok(Matrix::from_row_slice(rows, cols, values))
}

/// Matrix product A.B
pub fn multiply(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    shape_check("multiply", a.ncols() == b.nrows(), a.shape(), b.shape())?;
    Ok(a * b)
}

/// Matrix vector product A.v
pub fn multiply_vector(a: &Matrix, v: &Vector) -> Result<Vector> {
    shape_check("multiply_vector", a.ncols() == v.nrows(), a.shape(), v.shape())?;
    Ok(a * v)
}

/// Element wise sum A+B
pub fn add(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    shape_check("add", a.shape() == b.shape(), a.shape(), b.shape())?;
    Ok(a + b)
}

/// Element wise difference A-B
pub fn subtract(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    shape_check("subtract", a.shape() == b.shape(), a.shape(), b.shape())?;
    Ok(a - b)
}

pub fn add_vector(a: &Vector, b: &Vector) -> Result<Vector> {
    shape_check("add_vector", a.nrows() == b.nrows(), a.shape(), b.shape())?;
    Ok(a + b)
}

pub fn sub_vector(a: &Vector, b: &Vector) -> Result<Vector> {
    shape_check("sub_vector", a.nrows() == b.nrows(), a.shape(), b.shape())?;
    Ok(a - b)
}

pub fn transpose(a: &Matrix) -> Matrix {
    a.transpose()
}

pub fn identity(n: usize) -> Matrix {
    Matrix::identity(n, n)
}

/// Inverse of a square matrix.
///
/// The reciprocal condition number is estimated from the diagonal of the LU factor. A matrix
/// whose rcond is not above [`RCOND_LIMIT`] is [`EstimateError::Singular`], a pseudo inverse is
/// never substituted.
pub fn invert(a: &Matrix) -> Result<Matrix> {
    shape_check("invert", a.is_square(), a.shape(), a.shape())?;

    let lu = a.clone().lu();
    let rcond = rcond_abs_vec(&lu.u().diagonal());
    if !(rcond > RCOND_LIMIT) {
        return Err(EstimateError::Singular { rcond });
    }
    lu.try_inverse().ok_or(EstimateError::Singular { rcond })
}

/// Symmetric part of a square matrix, (C + C')/2
pub fn symmetrize(c: &Matrix) -> Result<Matrix> {
    shape_check("symmetrize", c.is_square(), c.shape(), c.shape())?;
    Ok((c + c.transpose()) * 0.5)
}

/// True if `c` is square and every element matches its transposed element within `epsilon`.
pub fn is_symmetric(c: &Matrix, epsilon: f64) -> bool {
    if !c.is_square() {
        return false;
    }
    for i in 0..c.nrows() {
        for j in 0..i {
            if (c[(i, j)] - c[(j, i)]).abs() > epsilon {
                return false;
            }
        }
    }
    true
}
