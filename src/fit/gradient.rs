//! Fixed-step gradient descent on the ridge objective.
//!
//! `w_{k+1} = w_k − η ∇E(w_k)`, stopping once `|E(w_{k+1}) − E(w_k)| < δ`.
//! The loop is capped by `max_iterations`; a non-finite objective counts as
//! divergence and stops immediately. Both outcomes surface as
//! `FitError::NonConvergence` carrying the last finite iterate.

use log::{debug, trace};
use nalgebra::{DMatrix, DVector};

use crate::domain::{GradientDescentOptions, IterativeFit, SolverKind};
use crate::error::FitError;
use crate::fit::objective::RidgeObjective;

/// Minimize the ridge objective from `initial` by gradient descent.
pub fn gradient_descent(
    design: &DMatrix<f64>,
    targets: &DVector<f64>,
    lambda: f64,
    initial: &DVector<f64>,
    opts: &GradientDescentOptions,
) -> Result<IterativeFit, FitError> {
    let objective = RidgeObjective::new(design, targets, lambda)?;
    if initial.len() != objective.dim() {
        return Err(FitError::invalid(format!(
            "Initial weights have {} entries, expected {}.",
            initial.len(),
            objective.dim()
        )));
    }
    if !(opts.learning_rate.is_finite() && opts.learning_rate > 0.0) {
        return Err(FitError::invalid(format!(
            "Learning rate must be finite and > 0, got {}.",
            opts.learning_rate
        )));
    }
    if !(opts.tolerance.is_finite() && opts.tolerance > 0.0) {
        return Err(FitError::invalid(format!(
            "Tolerance must be finite and > 0, got {}.",
            opts.tolerance
        )));
    }
    if opts.max_iterations == 0 {
        return Err(FitError::invalid("Iteration cap must be >= 1."));
    }

    let mut weights = initial.clone();
    let mut loss = objective.loss(&weights);
    if !loss.is_finite() {
        return Err(FitError::unstable("Objective is not finite at the initial weights."));
    }

    let mut change = f64::INFINITY;
    for k in 0..opts.max_iterations {
        let next = &weights - objective.gradient(&weights) * opts.learning_rate;
        let next_loss = objective.loss(&next);

        if !next_loss.is_finite() {
            debug!("gradient descent diverged at iteration {k} (loss={loss:.6e})");
            return Err(FitError::NonConvergence {
                solver: SolverKind::GradientDescent,
                iterations: k + 1,
                criterion: change,
                diverged: true,
                partial: weights,
            });
        }

        change = (next_loss - loss).abs();
        trace!("gd iter={k} loss={next_loss:.9e} change={change:.3e}");
        weights = next;
        loss = next_loss;

        if change < opts.tolerance {
            debug!(
                "gradient descent converged after {} iterations (loss={loss:.6e})",
                k + 1
            );
            return Ok(IterativeFit {
                weights,
                iterations: k + 1,
                criterion: change,
            });
        }
    }

    debug!(
        "gradient descent hit the cap of {} iterations (change={change:.3e})",
        opts.max_iterations
    );
    Err(FitError::NonConvergence {
        solver: SolverKind::GradientDescent,
        iterations: opts.max_iterations,
        criterion: change,
        diverged: false,
        partial: weights,
    })
}
