//! Regularized squared-error objective shared by the iterative solvers.
//!
//! ```text
//! E(w)  = (1/2N) · (‖Φw − t‖² + λ · wᵀw)
//! ∇E(w) = (1/N)  · (ΦᵀΦ w − Φᵀt + λ w)
//! ```
//!
//! `ΦᵀΦ` and `Φᵀt` are formed once so each gradient costs one small
//! `(D+1) × (D+1)` product.

use nalgebra::{DMatrix, DVector};

use crate::error::FitError;
use crate::math::ols::check_system;

#[derive(Debug, Clone)]
pub struct RidgeObjective<'a> {
    design: &'a DMatrix<f64>,
    targets: &'a DVector<f64>,
    gram: DMatrix<f64>,
    moment: DVector<f64>,
    lambda: f64,
    n: f64,
}

impl<'a> RidgeObjective<'a> {
    /// Build the objective for a raw ridge strength `λ ≥ 0`.
    pub fn new(
        design: &'a DMatrix<f64>,
        targets: &'a DVector<f64>,
        lambda: f64,
    ) -> Result<Self, FitError> {
        check_system(design, targets)?;
        if !(lambda.is_finite() && lambda >= 0.0) {
            return Err(FitError::invalid(format!(
                "Ridge strength must be finite and >= 0, got {lambda}."
            )));
        }
        Ok(Self {
            design,
            targets,
            gram: design.tr_mul(design),
            moment: design.tr_mul(targets),
            lambda,
            n: design.nrows() as f64,
        })
    }

    /// Number of weights the objective expects.
    pub fn dim(&self) -> usize {
        self.design.ncols()
    }

    pub fn loss(&self, weights: &DVector<f64>) -> f64 {
        let residual = self.design * weights - self.targets;
        (residual.norm_squared() + self.lambda * weights.dot(weights)) / (2.0 * self.n)
    }

    pub fn gradient(&self, weights: &DVector<f64>) -> DVector<f64> {
        (&self.gram * weights - &self.moment + weights * self.lambda) / self.n
    }
}
