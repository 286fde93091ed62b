//! Shared domain types.
//!
//! Everything here is plain data: the core never keeps experiment state of its
//! own, callers build these values and pass them in.

use nalgebra::DVector;

use crate::error::FitError;

/// Ordered inputs `x` paired with targets `t`.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    pub x: Vec<f64>,
    pub t: Vec<f64>,
}

impl SampleSet {
    /// Pair inputs with targets. Both must be non-empty and of equal length.
    pub fn new(x: Vec<f64>, t: Vec<f64>) -> Result<Self, FitError> {
        if x.is_empty() {
            return Err(FitError::invalid("Sample set must contain at least one point."));
        }
        if x.len() != t.len() {
            return Err(FitError::invalid(format!(
                "Sample inputs and targets differ in length ({} vs {}).",
                x.len(),
                t.len()
            )));
        }
        Ok(Self { x, t })
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Which solver produced a weight vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolverKind {
    /// Minimum-norm least squares via pseudo-inverse.
    Unregularized,
    /// Closed-form ridge solve.
    Ridge,
    GradientDescent,
    ConjugateGradient,
}

impl SolverKind {
    pub const ALL: [SolverKind; 4] = [
        SolverKind::Unregularized,
        SolverKind::Ridge,
        SolverKind::GradientDescent,
        SolverKind::ConjugateGradient,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            SolverKind::Unregularized => "Analytical",
            SolverKind::Ridge => "Analytical (ridge)",
            SolverKind::GradientDescent => "Gradient descent",
            SolverKind::ConjugateGradient => "Conjugate gradient",
        }
    }

    /// Glyph used for this solver's curve in ASCII plots.
    pub fn glyph(&self) -> char {
        match self {
            SolverKind::Unregularized => 'a',
            SolverKind::Ridge => 'r',
            SolverKind::GradientDescent => 'g',
            SolverKind::ConjugateGradient => 'c',
        }
    }
}

/// Converged output of an iterative solver.
#[derive(Debug, Clone, PartialEq)]
pub struct IterativeFit {
    pub weights: DVector<f64>,
    pub iterations: usize,
    /// Value of the stopping criterion at exit: the objective change for
    /// gradient descent, the squared residual norm for conjugate gradient.
    pub criterion: f64,
}

/// Fixed-step gradient descent settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientDescentOptions {
    /// Step size `η`.
    pub learning_rate: f64,
    /// Stop once the objective changes by less than this between iterations.
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for GradientDescentOptions {
    fn default() -> Self {
        Self {
            learning_rate: 0.01,
            tolerance: 1e-6,
            max_iterations: 100_000,
        }
    }
}

/// Conjugate-gradient settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConjugateGradientOptions {
    /// Stop once the squared residual norm drops below this.
    pub tolerance: f64,
    /// Iteration cap. `None` means ten times the system dimension.
    pub max_iterations: Option<usize>,
}

impl Default for ConjugateGradientOptions {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_iterations: None,
        }
    }
}

impl ConjugateGradientOptions {
    pub fn iteration_cap(&self, dim: usize) -> usize {
        self.max_iterations.unwrap_or(10 * dim.max(1))
    }
}

/// Largest `|ln λ|` whose `exp` is still a finite, positive, normal `f64`.
pub const LOG_LAMBDA_LIMIT: f64 = 700.0;

/// Convert a log-scale hyperparameter into the raw ridge strength `λ`.
///
/// The core only ever takes raw `λ`; this is the single conversion point for
/// callers that scan `ln λ`.
pub fn lambda_from_log(log_lambda: f64) -> f64 {
    log_lambda.exp()
}

/// How the ridge strength is chosen for a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LambdaChoice {
    /// Use `exp(log_lambda)` directly.
    Fixed { log_lambda: f64 },
    /// Scan the integer `ln λ` grid `[min, max]` and keep the best.
    Sweep { min: f64, max: f64 },
}

/// Full configuration for one experiment run.
#[derive(Debug, Clone)]
pub struct ExperimentConfig {
    pub train_count: usize,
    pub test_count: usize,
    pub degree: usize,
    /// Standard deviation of the Gaussian noise added to training targets.
    pub noise_scale: f64,
    pub seed: u64,
    pub lambda: LambdaChoice,
    pub gradient_descent: GradientDescentOptions,
    pub conjugate_gradient: ConjugateGradientOptions,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            train_count: 20,
            test_count: 100,
            degree: 3,
            noise_scale: 0.5,
            seed: 42,
            lambda: LambdaChoice::Sweep {
                min: -30.0,
                max: 0.0,
            },
            gradient_descent: GradientDescentOptions::default(),
            conjugate_gradient: ConjugateGradientOptions::default(),
            plot: true,
            plot_width: 100,
            plot_height: 25,
        }
    }
}
