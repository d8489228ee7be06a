//! Matrix exponential by scaling and squaring.
//!
//! `exp(M)` is approximated by the diagonal [6/6] Padé quotient
//! `D(X)^-1 N(X)` of the scaled matrix `X = M / 2^s`, then squared `s` times.
//! The scaling brings the infinity norm of `X` under [`SCALED_NORM_BOUND`],
//! where the truncation error of the [6/6] approximant is below `1e-16`.

extern crate nalgebra as na;

use tracing::trace;

use crate::control::error::{ModelError, ModelResult};

/// Largest infinity norm accepted by the Padé approximant.
pub const SCALED_NORM_BOUND: f64 = 0.5;

/// Past this many squarings the result overflows for any physical system.
pub const MAX_SQUARINGS: u32 = 64;

/// Coefficients `c_k = (2q - k)! q! / ((2q)! k! (q - k)!)` for `q = 6`.
const PADE_6: [f64; 7] = [
    1.0,
    1.0 / 2.0,
    5.0 / 44.0,
    1.0 / 66.0,
    1.0 / 792.0,
    1.0 / 15840.0,
    1.0 / 665280.0,
];

/// Computes the matrix exponential of a square matrix.
///
/// # Errors
///
/// - [`ModelError::ShapeMismatch`] if `mat` is not square.
/// - [`ModelError::NumericalInstability`] if `mat` has non-finite entries,
///   needs more than [`MAX_SQUARINGS`] squarings, the Padé denominator is
///   singular, or the result is not finite.
pub fn expm(mat: &na::DMatrix<f64>) -> ModelResult<na::DMatrix<f64>> {
    ModelError::check_len("exponential operand columns", mat.nrows(), mat.ncols())?;

    if mat.iter().any(|v| !v.is_finite()) {
        return Err(ModelError::NumericalInstability {
            what: "matrix exponential operand has non-finite entries".into(),
        });
    }

    let n = mat.nrows();
    let norm = inf_norm(mat);
    let squarings = squarings_for(norm)?;
    let scaled = mat.scale(0.5_f64.powi(squarings as i32));

    trace!(n, norm, squarings, "matrix exponential");

    // Even powers feed both polynomials; odd powers flip sign in the denominator.
    let ident = na::DMatrix::<f64>::identity(n, n);
    let x2 = &scaled * &scaled;
    let x4 = &x2 * &x2;
    let x6 = &x4 * &x2;

    let even = &ident * PADE_6[0] + &x2 * PADE_6[2] + &x4 * PADE_6[4] + &x6 * PADE_6[6];
    let odd = &scaled * (&ident * PADE_6[1] + &x2 * PADE_6[3] + &x4 * PADE_6[5]);

    let numer = &even + &odd;
    let denom = &even - &odd;

    let mut result = denom
        .lu()
        .solve(&numer)
        .ok_or_else(|| ModelError::NumericalInstability {
            what: "Padé denominator is singular".into(),
        })?;

    for _ in 0..squarings {
        result = &result * &result;
    }

    if result.iter().any(|v| !v.is_finite()) {
        return Err(ModelError::NumericalInstability {
            what: format!("matrix exponential overflowed after {squarings} squarings"),
        });
    }

    Ok(result)
}

/// Maximum absolute row sum.
fn inf_norm(mat: &na::DMatrix<f64>) -> f64 {
    mat.row_iter()
        .map(|row| row.iter().map(|v| v.abs()).sum::<f64>())
        .fold(0.0, f64::max)
}

fn squarings_for(norm: f64) -> ModelResult<u32> {
    if norm <= SCALED_NORM_BOUND {
        return Ok(0);
    }

    let needed = (norm / SCALED_NORM_BOUND).log2().ceil();
    if needed > f64::from(MAX_SQUARINGS) {
        return Err(ModelError::NumericalInstability {
            what: format!("matrix norm {norm:e} is too large to exponentiate"),
        });
    }

    Ok(needed as u32)
}
