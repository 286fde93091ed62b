//! Command-line parsing for the polynomial least-squares experiment.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! solving code; `app` turns the parsed arguments into an `ExperimentConfig`.

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "lsq",
    version,
    about = "Ridge-regularized polynomial fits of sin(2πx): closed form vs gradient descent vs conjugate gradient"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit all solvers, print weights/diagnostics and optionally plot.
    Fit(FitArgs),
    /// Print the ridge hyperparameter sweep table only.
    Sweep(ExperimentArgs),
}

/// Data and regularization options shared by every command.
#[derive(Debug, Args, Clone)]
pub struct ExperimentArgs {
    /// Number of noisy training samples.
    #[arg(short = 'n', long, env = "LSQ_TRAIN", default_value_t = 20)]
    pub train: usize,

    /// Number of points on the evaluation grid.
    #[arg(long, default_value_t = 100)]
    pub test: usize,

    /// Polynomial degree.
    #[arg(short = 'd', long, env = "LSQ_DEGREE", default_value_t = 3)]
    pub degree: usize,

    /// Standard deviation of the Gaussian noise on training targets.
    #[arg(long, default_value_t = 0.5)]
    pub noise: f64,

    /// Random seed for sample generation.
    #[arg(long, env = "LSQ_SEED", default_value_t = 42)]
    pub seed: u64,

    /// Use a fixed ln(lambda) instead of sweeping.
    #[arg(long, allow_negative_numbers = true)]
    pub log_lambda: Option<f64>,

    /// Lower end of the ln(lambda) sweep.
    #[arg(long, allow_negative_numbers = true, default_value_t = -30.0)]
    pub sweep_min: f64,

    /// Upper end of the ln(lambda) sweep.
    #[arg(long, allow_negative_numbers = true, default_value_t = 0.0)]
    pub sweep_max: f64,
}

/// Options for `lsq fit`.
#[derive(Debug, Args, Clone)]
pub struct FitArgs {
    #[command(flatten)]
    pub experiment: ExperimentArgs,

    /// Gradient descent step size.
    #[arg(long, default_value_t = 0.01)]
    pub learning_rate: f64,

    /// Gradient descent stops once the objective changes by less than this.
    #[arg(long, default_value_t = 1e-6)]
    pub gd_tolerance: f64,

    /// Gradient descent iteration cap.
    #[arg(long, default_value_t = 100_000)]
    pub gd_max_iter: usize,

    /// Conjugate gradient stops once the squared residual norm drops below this.
    #[arg(long, default_value_t = 1e-6)]
    pub cg_tolerance: f64,

    /// Conjugate gradient iteration cap (default: 10 x number of weights).
    #[arg(long)]
    pub cg_max_iter: Option<usize>,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}
