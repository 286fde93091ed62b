//! Closed-form least squares.
//!
//! Two solves over the same polynomial design matrix `Φ` (`N × (D+1)`):
//!
//! ```text
//! unregularized:  w* = pinv(Φ) · t
//! ridge:          w* = (ΦᵀΦ + λI)⁻¹ Φᵀ t
//! ```
//!
//! Implementation choices:
//! - The unregularized solve goes through an SVD, which yields the minimum-norm
//!   solution even when `Φ` is rank-deficient. Singular values below
//!   `1e-15 · σ_max` are treated as zero.
//! - The ridge solve never forms an explicit inverse; it LU-solves the normal
//!   equations, which are well-posed because `λ > 0`.

use nalgebra::{DMatrix, DVector};

use crate::error::FitError;

/// Relative cutoff for small singular values in the pseudo-inverse.
const PINV_RCOND: f64 = 1e-15;

/// Validate a design matrix / target pair.
///
/// Requires at least `D+1` rows, matching target length and finite entries.
pub(crate) fn check_system(
    design: &DMatrix<f64>,
    targets: &DVector<f64>,
) -> Result<(), FitError> {
    if design.nrows() == 0 || design.ncols() == 0 {
        return Err(FitError::invalid("Design matrix is empty."));
    }
    if targets.len() != design.nrows() {
        return Err(FitError::invalid(format!(
            "Target length {} does not match design rows {}.",
            targets.len(),
            design.nrows()
        )));
    }
    if design.nrows() < design.ncols() {
        return Err(FitError::invalid(format!(
            "Need at least {} samples for degree {}, got {}.",
            design.ncols(),
            design.ncols() - 1,
            design.nrows()
        )));
    }
    if design.iter().chain(targets.iter()).any(|v| !v.is_finite()) {
        return Err(FitError::invalid("Design matrix and targets must be finite."));
    }
    Ok(())
}

pub(crate) fn check_lambda(lambda: f64) -> Result<(), FitError> {
    if !(lambda.is_finite() && lambda > 0.0) {
        return Err(FitError::invalid(format!(
            "Ridge strength must be finite and > 0, got {lambda}."
        )));
    }
    Ok(())
}

/// Minimum-norm least-squares weights for `Φ w ≈ t`.
pub fn fit_unregularized(
    design: &DMatrix<f64>,
    targets: &DVector<f64>,
) -> Result<DVector<f64>, FitError> {
    check_system(design, targets)?;

    let svd = design.clone().svd(true, true);
    let sigma_max = svd.singular_values.max();
    if !sigma_max.is_finite() {
        return Err(FitError::unstable("Design matrix has non-finite singular values."));
    }
    // pinv(0) = 0
    if sigma_max == 0.0 {
        return Ok(DVector::zeros(design.ncols()));
    }

    let weights = svd
        .solve(targets, PINV_RCOND * sigma_max)
        .map_err(|e| FitError::unstable(format!("Pseudo-inverse solve failed: {e}")))?;
    ensure_finite(weights, "pseudo-inverse")
}

/// Ridge weights `(ΦᵀΦ + λI)⁻¹ Φᵀ t` for a raw `λ > 0`.
pub fn fit_ridge(
    design: &DMatrix<f64>,
    targets: &DVector<f64>,
    lambda: f64,
) -> Result<DVector<f64>, FitError> {
    check_system(design, targets)?;
    check_lambda(lambda)?;

    let (a, b) = normal_equations(design, targets, lambda);
    let weights = a
        .lu()
        .solve(&b)
        .ok_or_else(|| FitError::unstable(format!("Ridge system is singular (λ={lambda:e}).")))?;
    ensure_finite(weights, "ridge")
}

/// Regularized normal equations `(ΦᵀΦ + λI, Φᵀt)`.
pub fn normal_equations(
    design: &DMatrix<f64>,
    targets: &DVector<f64>,
    lambda: f64,
) -> (DMatrix<f64>, DVector<f64>) {
    let mut a = design.tr_mul(design);
    for i in 0..a.nrows() {
        a[(i, i)] += lambda;
    }
    let b = design.tr_mul(targets);
    (a, b)
}

fn ensure_finite(weights: DVector<f64>, what: &str) -> Result<DVector<f64>, FitError> {
    if weights.iter().all(|v| v.is_finite()) {
        Ok(weights)
    } else {
        Err(FitError::unstable(format!(
            "The {what} solve produced non-finite weights."
        )))
    }
}
