//! Conjugate-gradient solve of the ridge normal equations.
//!
//! We solve `A w = b` with `A = ΦᵀΦ + λI` and `b = Φᵀt`. `A` is symmetric
//! positive-definite for `λ > 0`, so the iteration reaches the exact solution in
//! at most `D+1` steps in exact arithmetic. Rounding can add a few more; the
//! loop is capped and reports `NonConvergence` past the cap.

use log::{debug, trace};
use nalgebra::{DMatrix, DVector};

use crate::domain::{ConjugateGradientOptions, IterativeFit, SolverKind};
use crate::error::FitError;
use crate::math::ols::{check_lambda, check_system, normal_equations};

/// Ridge weights by conjugate gradient, starting from `initial`.
pub fn conjugate_gradient(
    design: &DMatrix<f64>,
    targets: &DVector<f64>,
    lambda: f64,
    initial: &DVector<f64>,
    opts: &ConjugateGradientOptions,
) -> Result<IterativeFit, FitError> {
    check_system(design, targets)?;
    check_lambda(lambda)?;

    let (a, b) = normal_equations(design, targets, lambda);
    solve_spd(&a, &b, initial, opts)
}

/// Conjugate-gradient solve of an explicit SPD system `A w = b`.
///
/// Stops once `‖r‖² < tolerance`. A non-positive curvature `pᵀAp` means `A`
/// is not positive-definite and is reported as numerical instability.
pub fn solve_spd(
    a: &DMatrix<f64>,
    b: &DVector<f64>,
    initial: &DVector<f64>,
    opts: &ConjugateGradientOptions,
) -> Result<IterativeFit, FitError> {
    let n = a.nrows();
    if n == 0 || a.ncols() != n {
        return Err(FitError::invalid(format!(
            "System matrix must be square and non-empty, got {}x{}.",
            a.nrows(),
            a.ncols()
        )));
    }
    if b.len() != n || initial.len() != n {
        return Err(FitError::invalid(format!(
            "System of size {n} given rhs of length {} and initial weights of length {}.",
            b.len(),
            initial.len()
        )));
    }
    if !(opts.tolerance.is_finite() && opts.tolerance > 0.0) {
        return Err(FitError::invalid(format!(
            "Tolerance must be finite and > 0, got {}.",
            opts.tolerance
        )));
    }
    let cap = opts.iteration_cap(n);
    if cap == 0 {
        return Err(FitError::invalid("Iteration cap must be >= 1."));
    }

    let mut w = initial.clone();
    let mut r = b - a * &w;
    let mut rr = r.norm_squared();
    if !rr.is_finite() {
        return Err(FitError::unstable("Initial residual is not finite."));
    }
    if rr < opts.tolerance {
        return Ok(IterativeFit {
            weights: w,
            iterations: 0,
            criterion: rr,
        });
    }

    let mut p = r.clone();
    for k in 0..cap {
        let ap = a * &p;
        let curvature = p.dot(&ap);
        if !(curvature.is_finite() && curvature > 0.0) {
            return Err(FitError::unstable(format!(
                "Non-positive curvature {curvature:e} at iteration {k}; system is not positive-definite."
            )));
        }

        let alpha = rr / curvature;
        w.axpy(alpha, &p, 1.0);
        r.axpy(-alpha, &ap, 1.0);
        let rr_next = r.norm_squared();
        trace!("cg iter={k} alpha={alpha:.6e} residual2={rr_next:.3e}");

        if !rr_next.is_finite() {
            return Err(FitError::unstable(format!(
                "Residual became non-finite at iteration {k}."
            )));
        }
        if rr_next < opts.tolerance {
            debug!("conjugate gradient converged after {} iterations", k + 1);
            return Ok(IterativeFit {
                weights: w,
                iterations: k + 1,
                criterion: rr_next,
            });
        }

        let beta = rr_next / rr;
        p = &r + &p * beta;
        rr = rr_next;
    }

    debug!("conjugate gradient hit the cap of {cap} iterations (residual2={rr:.3e})");
    Err(FitError::NonConvergence {
        solver: SolverKind::ConjugateGradient,
        iterations: cap,
        criterion: rr,
        diverged: false,
        partial: w,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::data::generate_samples;
    use crate::math::{expand, fit_ridge};

    #[test]
    fn identity_system_converges_in_one_step() {
        let a = DMatrix::<f64>::identity(3, 3);
        let b = DVector::from_row_slice(&[1.0, 2.0, 3.0]);
        let opts = ConjugateGradientOptions::default();
        let fit = solve_spd(&a, &b, &DVector::zeros(3), &opts).unwrap();

        assert_eq!(fit.iterations, 1);
        for (got, want) in fit.weights.iter().zip([1.0, 2.0, 3.0]) {
            assert!((got - want).abs() < 1e-12);
        }
    }

    #[test]
    fn finishes_within_dimension_steps_on_small_spd_system() {
        let a = DMatrix::from_row_slice(3, 3, &[4.0, 1.0, 0.0, 1.0, 3.0, 1.0, 0.0, 1.0, 2.0]);
        let b = DVector::from_row_slice(&[1.0, 2.0, 3.0]);
        let opts = ConjugateGradientOptions {
            tolerance: 1e-20,
            max_iterations: None,
        };
        let fit = solve_spd(&a, &b, &DVector::zeros(3), &opts).unwrap();

        assert!(fit.iterations <= 3 + 1, "took {} iterations", fit.iterations);
        let exact = a.clone().lu().solve(&b).unwrap();
        assert!((&fit.weights - &exact).norm() < 1e-9);
    }

    #[test]
    fn starting_at_solution_takes_zero_iterations() {
        let a = DMatrix::from_row_slice(2, 2, &[2.0, 0.0, 0.0, 4.0]);
        let b = DVector::from_row_slice(&[2.0, 4.0]);
        let start = DVector::from_row_slice(&[1.0, 1.0]);
        let fit = solve_spd(&a, &b, &start, &ConjugateGradientOptions::default()).unwrap();
        assert_eq!(fit.iterations, 0);
        assert_eq!(fit.weights, start);
    }

    #[test]
    fn matches_closed_form_ridge_on_cubic_fit() {
        let mut rng = StdRng::seed_from_u64(2024);
        let samples = generate_samples(20, 0.5, &mut rng).unwrap();
        let design = expand(&samples.x, 3).unwrap();
        let t = DVector::from_vec(samples.t);
        let lambda = (-18.0f64).exp();

        let opts = ConjugateGradientOptions {
            tolerance: 1e-16,
            max_iterations: Some(200),
        };
        let fit = conjugate_gradient(&design, &t, lambda, &DVector::zeros(4), &opts).unwrap();
        let exact = fit_ridge(&design, &t, lambda).unwrap();

        for (got, want) in fit.weights.iter().zip(exact.iter()) {
            assert!((got - want).abs() < 1e-4, "cg={got} closed-form={want}");
        }
    }

    #[test]
    fn indefinite_system_is_numerical_instability() {
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, -1.0]);
        let b = DVector::from_row_slice(&[0.0, 1.0]);
        assert!(matches!(
            solve_spd(&a, &b, &DVector::zeros(2), &ConjugateGradientOptions::default()),
            Err(FitError::NumericalInstability(_))
        ));
    }

    #[test]
    fn iteration_cap_is_reported_with_partial_weights() {
        let a = DMatrix::from_row_slice(3, 3, &[4.0, 1.0, 0.0, 1.0, 3.0, 1.0, 0.0, 1.0, 2.0]);
        let b = DVector::from_row_slice(&[1.0, 2.0, 3.0]);
        let opts = ConjugateGradientOptions {
            tolerance: 1e-20,
            max_iterations: Some(1),
        };
        match solve_spd(&a, &b, &DVector::zeros(3), &opts) {
            Err(FitError::NonConvergence {
                solver,
                iterations,
                diverged,
                partial,
                ..
            }) => {
                assert_eq!(solver, SolverKind::ConjugateGradient);
                assert_eq!(iterations, 1);
                assert!(!diverged);
                assert_eq!(partial.len(), 3);
            }
            other => panic!("expected NonConvergence, got {other:?}"),
        }
    }

    #[test]
    fn rejects_non_positive_lambda() {
        let design = expand(&[0.0, 0.5, 1.0], 1).unwrap();
        let t = DVector::from_row_slice(&[0.0, 1.0, 2.0]);
        assert!(matches!(
            conjugate_gradient(
                &design,
                &t,
                0.0,
                &DVector::zeros(2),
                &ConjugateGradientOptions::default()
            ),
            Err(FitError::InvalidArgument(_))
        ));
    }
}
