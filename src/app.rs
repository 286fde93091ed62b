//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and sets up logging
//! - parses CLI arguments into an `ExperimentConfig`
//! - runs the experiment pipeline
//! - prints reports/plots

use clap::Parser;

use crate::cli::{Command, ExperimentArgs, FitArgs};
use crate::domain::{
    ConjugateGradientOptions, ExperimentConfig, GradientDescentOptions, LambdaChoice,
};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `lsq` binary.
pub fn run() -> Result<(), AppError> {
    // A missing .env is fine; values then come from the real environment or defaults.
    let _ = dotenvy::dotenv();
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .try_init();

    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Sweep(args) => handle_sweep(args),
    }
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = fit_config_from_args(&args);
    let run = pipeline::run_experiment(&config)?;

    println!("{}", crate::report::format_run_summary(&run, &config));

    if config.plot {
        let plot = crate::plot::render_run_plot(&run, config.plot_width, config.plot_height);
        println!("{plot}");
    }

    Ok(())
}

fn handle_sweep(args: ExperimentArgs) -> Result<(), AppError> {
    if args.log_lambda.is_some() {
        log::warn!("--log-lambda is ignored by `sweep`");
    }
    let config = ExperimentConfig {
        lambda: LambdaChoice::Sweep {
            min: args.sweep_min,
            max: args.sweep_max,
        },
        ..experiment_config_from_args(&args)
    };

    let data = pipeline::prepare_data(&config)?;
    let selection = pipeline::select_lambda(&config, &data)?;
    let Some(sweep) = &selection.sweep else {
        return Err(AppError::new(4, "Sweep produced no results."));
    };

    println!("{}", crate::report::format_sweep(sweep));
    Ok(())
}

/// Data/regularization settings; solver options keep their defaults.
pub fn experiment_config_from_args(args: &ExperimentArgs) -> ExperimentConfig {
    let lambda = match args.log_lambda {
        Some(log_lambda) => LambdaChoice::Fixed { log_lambda },
        None => LambdaChoice::Sweep {
            min: args.sweep_min,
            max: args.sweep_max,
        },
    };

    ExperimentConfig {
        train_count: args.train,
        test_count: args.test,
        degree: args.degree,
        noise_scale: args.noise,
        seed: args.seed,
        lambda,
        ..ExperimentConfig::default()
    }
}

pub fn fit_config_from_args(args: &FitArgs) -> ExperimentConfig {
    ExperimentConfig {
        gradient_descent: GradientDescentOptions {
            learning_rate: args.learning_rate,
            tolerance: args.gd_tolerance,
            max_iterations: args.gd_max_iter,
        },
        conjugate_gradient: ConjugateGradientOptions {
            tolerance: args.cg_tolerance,
            max_iterations: args.cg_max_iter,
        },
        plot: !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        ..experiment_config_from_args(&args.experiment)
    }
}

/// Rewrite argv so `lsq` defaults to `lsq fit`.
///
/// Rules:
/// - `lsq`                      -> `lsq fit`
/// - `lsq -d 5 ...`             -> `lsq fit -d 5 ...`
/// - `lsq --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("fit".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "fit".to_string());
    }
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_fit() {
        assert_eq!(rewrite_args(argv(&["lsq"])), argv(&["lsq", "fit"]));
        assert_eq!(
            rewrite_args(argv(&["lsq", "-d", "5"])),
            argv(&["lsq", "fit", "-d", "5"])
        );
        assert_eq!(rewrite_args(argv(&["lsq", "--help"])), argv(&["lsq", "--help"]));
        assert_eq!(rewrite_args(argv(&["lsq", "sweep"])), argv(&["lsq", "sweep"]));
    }

    #[test]
    fn fit_args_map_onto_config() {
        let cli = crate::cli::Cli::parse_from(argv(&[
            "lsq",
            "fit",
            "--degree",
            "5",
            "--log-lambda",
            "-12",
            "--learning-rate",
            "0.05",
            "--cg-max-iter",
            "9",
            "--no-plot",
        ]));
        let Command::Fit(args) = cli.command else {
            panic!("expected fit subcommand");
        };
        let config = fit_config_from_args(&args);
        assert_eq!(config.degree, 5);
        assert_eq!(config.lambda, LambdaChoice::Fixed { log_lambda: -12.0 });
        assert_eq!(config.gradient_descent.learning_rate, 0.05);
        assert_eq!(config.conjugate_gradient.max_iterations, Some(9));
        assert!(!config.plot);
    }
}
