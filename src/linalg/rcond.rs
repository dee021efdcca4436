//! Numerical comparison of reciprocal condition numbers.
//!
//! Required for all inversions in models and filters.

use super::{Matrix, Vector};

/// Minimum allowable reciprocal condition number for an inversion.
///
/// 1e5 * epsilon gives 5 decimal digits of headroom.
pub const RCOND_LIMIT: f64 = f64::EPSILON * 1e5;

/// Estimate the reciprocal condition number of a diagonal, passed as a vector.
///
/// The max element magnitude is taken as the norm of the original matrix and the min element
/// magnitude as the norm of its inverse, therefore rcond = min/max.
///
/// Defined to be 0 for an empty or all zero diagonal, and for max infinite.
/// Defined to be -1 for any NaN element.
pub fn rcond_abs_vec(dv: &Vector) -> f64 {
    if dv.nrows() == 0 {
        return 0.;
    }

    let mut mind = dv[0].abs();
    let mut maxd = mind;
    for &d in dv.iter() {
        if d.is_nan() {
            return -1.;
        }
        mind = mind.min(d.abs());
        maxd = maxd.max(d.abs());
    }

    rcond_min_max(mind, maxd)
}

/// Estimate the reciprocal condition number of a symmetric matrix from its diagonal.
///
/// Unlike [`rcond_abs_vec`] the sign is kept: a negative diagonal element means the matrix
/// cannot be PSD and the result is < 0. NaN elements also give a result < 0.
pub fn rcond_symmetric(sm: &Matrix) -> f64 {
    let n = sm.nrows().min(sm.ncols());
    if n == 0 {
        return 0.;
    }

    let mut mind = sm[(0, 0)];
    let mut maxd = mind;
    for i in 0..n {
        let d = sm[(i, i)];
        if d.is_nan() {
            return -1.;
        }
        if d < mind {
            mind = d;
        }
        if d > maxd {
            maxd = d;
        }
    }

    if mind < 0. {
        // matrix is negative, mind does not represent a rcond
        mind
    } else {
        rcond_min_max(mind, maxd)
    }
}

fn rcond_min_max(mind: f64, maxd: f64) -> f64 {
    let rcond = mind / maxd;
    if rcond.is_nan() {
        // singular due to (mind == maxd) == (zero or infinity)
        0.
    } else {
        rcond
    }
}

