//! Shared experiment pipeline used by the `fit` and `sweep` commands.
//!
//! data generation -> polynomial expansion -> λ selection -> solvers -> evaluation
//!
//! The commands only differ in what they print.

use log::{info, warn};
use nalgebra::{DMatrix, DVector};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::data::{generate_samples, ground_truth, linspace};
use crate::domain::{
    ExperimentConfig, IterativeFit, LambdaChoice, SampleSet, SolverKind, lambda_from_log,
};
use crate::error::{AppError, FitError};
use crate::fit::{Sweep, conjugate_gradient, gradient_descent, log_lambda_grid, sweep_ridge};
use crate::math::{expand, fit_ridge, fit_unregularized};
use crate::models::{mean_squared_error, predict};

/// Training data, evaluation grid and their design matrices.
#[derive(Debug, Clone)]
pub struct PreparedData {
    pub train: SampleSet,
    pub test_x: Vec<f64>,
    /// `sin(2πx)` on the evaluation grid.
    pub truth: Vec<f64>,
    pub train_design: DMatrix<f64>,
    pub train_targets: DVector<f64>,
    pub test_design: DMatrix<f64>,
}

/// The ridge strength used for a run and how it was chosen.
#[derive(Debug, Clone)]
pub struct LambdaSelection {
    pub log_lambda: f64,
    pub lambda: f64,
    /// Present when λ came from a sweep.
    pub sweep: Option<Sweep>,
}

/// One solver's weights and how they score on the evaluation grid.
#[derive(Debug, Clone)]
pub struct SolverRun {
    pub solver: SolverKind,
    pub weights: DVector<f64>,
    /// `None` for closed-form solves.
    pub iterations: Option<usize>,
    pub converged: bool,
    pub predictions: DVector<f64>,
    pub test_mse: f64,
}

/// All computed outputs of a single `lsq fit` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub data: PreparedData,
    pub lambda: LambdaSelection,
    pub runs: Vec<SolverRun>,
}

/// Generate samples and expand them for the configured degree.
pub fn prepare_data(config: &ExperimentConfig) -> Result<PreparedData, AppError> {
    if config.test_count == 0 {
        return Err(AppError::new(2, "Test grid size must be > 0."));
    }
    if config.train_count <= config.degree {
        return Err(FitError::invalid(format!(
            "Need at least {} training samples for degree {}, got {}.",
            config.degree.saturating_add(1),
            config.degree,
            config.train_count
        ))
        .into());
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let train = generate_samples(config.train_count, config.noise_scale, &mut rng)?;
    let test_x = linspace(0.0, 1.0, config.test_count);
    let truth = ground_truth(&test_x);

    let train_design = expand(&train.x, config.degree)?;
    let test_design = expand(&test_x, config.degree)?;
    let train_targets = DVector::from_column_slice(&train.t);

    Ok(PreparedData {
        train,
        test_x,
        truth,
        train_design,
        train_targets,
        test_design,
    })
}

/// Resolve λ: either the fixed value, or the sweep winner.
pub fn select_lambda(
    config: &ExperimentConfig,
    data: &PreparedData,
) -> Result<LambdaSelection, AppError> {
    match config.lambda {
        LambdaChoice::Fixed { log_lambda } => {
            let lambda = lambda_from_log(log_lambda);
            if !(lambda.is_finite() && lambda > 0.0) {
                return Err(AppError::new(
                    2,
                    format!("ln(lambda)={log_lambda} does not give a usable ridge strength."),
                ));
            }
            Ok(LambdaSelection {
                log_lambda,
                lambda,
                sweep: None,
            })
        }
        LambdaChoice::Sweep { min, max } => {
            let grid = log_lambda_grid(min, max)?;
            let sweep = sweep_ridge(
                &data.train_design,
                &data.train_targets,
                &data.test_design,
                &data.truth,
                &grid,
            )?;
            info!(
                "sweep selected ln(lambda)={} (mse={:.6e})",
                sweep.best.log_lambda, sweep.best.mse
            );
            Ok(LambdaSelection {
                log_lambda: sweep.best.log_lambda,
                lambda: sweep.best.lambda,
                sweep: Some(sweep),
            })
        }
    }
}

/// Execute the full experiment and return the computed outputs.
pub fn run_experiment(config: &ExperimentConfig) -> Result<RunOutput, AppError> {
    let data = prepare_data(config)?;
    let lambda = select_lambda(config, &data)?;
    let runs = run_solvers(config, &data, lambda.lambda)?;
    Ok(RunOutput { data, lambda, runs })
}

/// Fit every solver at the chosen λ and score each on the evaluation grid.
pub fn run_solvers(
    config: &ExperimentConfig,
    data: &PreparedData,
    lambda: f64,
) -> Result<Vec<SolverRun>, AppError> {
    let x = &data.train_design;
    let t = &data.train_targets;
    let start = DVector::zeros(x.ncols());

    let mut runs = Vec::with_capacity(SolverKind::ALL.len());
    for solver in SolverKind::ALL {
        let (weights, iterations, converged) = match solver {
            SolverKind::Unregularized => (fit_unregularized(x, t)?, None, true),
            SolverKind::Ridge => (fit_ridge(x, t, lambda)?, None, true),
            SolverKind::GradientDescent => {
                iterative(gradient_descent(x, t, lambda, &start, &config.gradient_descent))?
            }
            SolverKind::ConjugateGradient => {
                iterative(conjugate_gradient(x, t, lambda, &start, &config.conjugate_gradient))?
            }
        };

        let predictions = predict(&data.test_design, &weights)?;
        let test_mse = mean_squared_error(&predictions, &data.truth)?;
        runs.push(SolverRun {
            solver,
            weights,
            iterations,
            converged,
            predictions,
            test_mse,
        });
    }
    Ok(runs)
}

/// Keep the partial weights of a solver that ran out of iterations.
fn iterative(
    result: Result<IterativeFit, FitError>,
) -> Result<(DVector<f64>, Option<usize>, bool), FitError> {
    match result {
        Ok(fit) => Ok((fit.weights, Some(fit.iterations), true)),
        Err(FitError::NonConvergence {
            solver,
            iterations,
            criterion,
            diverged,
            partial,
        }) => {
            if diverged {
                warn!(
                    "{} diverged after {iterations} iterations; keeping the last finite weights",
                    solver.display_name()
                );
            } else {
                warn!(
                    "{} stopped at its cap of {iterations} iterations (criterion {criterion:.3e}); keeping partial weights",
                    solver.display_name()
                );
            }
            Ok((partial, Some(iterations), false))
        }
        Err(err) => Err(err),
    }
}
