//! Text summaries for `lsq fit` and `lsq sweep`.

use chrono::Local;

use crate::app::pipeline::{RunOutput, SolverRun};
use crate::domain::ExperimentConfig;
use crate::fit::Sweep;

/// Format the full run summary (data settings + λ choice + per-solver diagnostics).
pub fn format_run_summary(run: &RunOutput, config: &ExperimentConfig) -> String {
    let mut out = String::new();

    out.push_str("=== lsq - polynomial least squares on sin(2πx) ===\n");
    out.push_str(&format!("Generated: {}\n", Local::now().format("%Y-%m-%d %H:%M:%S")));
    out.push_str(&format!(
        "Data: train n={} | test n={} | degree={} | noise sd={:.3} | seed={}\n",
        run.data.train.len(),
        run.data.test_x.len(),
        config.degree,
        config.noise_scale,
        config.seed,
    ));

    let source = match &run.lambda.sweep {
        Some(sweep) => format!(
            "sweep over {} values, best test MSE={:.6}",
            sweep.points.len(),
            sweep.best.mse
        ),
        None => "fixed".to_string(),
    };
    out.push_str(&format!(
        "Lambda: ln(lambda)={} (lambda={:.6e}) [{source}]\n",
        run.lambda.log_lambda, run.lambda.lambda
    ));

    out.push_str("\nSolvers:\n");
    out.push_str(&format_solver_table(&run.runs));
    out
}

/// Format the sweep table; the selected row is marked with `*`.
pub fn format_sweep(sweep: &Sweep) -> String {
    let mut out = String::new();
    out.push_str(&format!("  {:>10} {:>14} {:>14}\n", "ln(lambda)", "lambda", "test MSE"));
    out.push_str(&format!("  {:->10} {:->14} {:->14}\n", "", "", ""));
    for p in &sweep.points {
        let mark = if p.log_lambda == sweep.best.log_lambda { '*' } else { ' ' };
        out.push_str(&format!(
            "{mark} {:>10} {:>14.6e} {:>14.6}\n",
            p.log_lambda, p.lambda, p.mse
        ));
    }
    out.push_str(&format!(
        "\nBest: ln(lambda)={} (lambda={:.6e}), test MSE={:.6}\n",
        sweep.best.log_lambda, sweep.best.lambda, sweep.best.mse
    ));
    out
}

fn format_solver_table(runs: &[SolverRun]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<20} {:>7} {:<14} {:>12}  {}\n",
        "solver", "iters", "status", "test MSE", "weights"
    ));
    out.push_str(&format!(
        "{:-<20} {:->7} {:-<14} {:->12}  {:-<7}\n",
        "", "", "", "", ""
    ));

    for r in runs {
        let iters = r
            .iterations
            .map(|k| k.to_string())
            .unwrap_or_else(|| "-".to_string());
        let status = match (r.iterations, r.converged) {
            (None, _) => "closed form",
            (Some(_), true) => "converged",
            (Some(_), false) => "NOT converged",
        };
        out.push_str(&format!(
            "{:<20} {:>7} {:<14} {:>12.6}  {}\n",
            r.solver.display_name(),
            iters,
            status,
            r.test_mse,
            fmt_vec(r.weights.as_slice())
        ));
    }
    out
}

fn fmt_vec(v: &[f64]) -> String {
    let parts: Vec<String> = v.iter().map(|x| format!("{x:.6}")).collect();
    format!("[{}]", parts.join(", "))
}
