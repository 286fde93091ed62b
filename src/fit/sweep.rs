//! Ridge hyperparameter sweep.
//!
//! We fit the closed-form ridge solution for each candidate `ln λ` on an
//! integer grid, score the predictions on a held-out grid against the ground
//! truth, and keep the lowest mean squared error. Selection is deterministic:
//! ties go to the earliest grid entry.

use log::{debug, warn};
use nalgebra::{DMatrix, DVector};

use crate::domain::{LOG_LAMBDA_LIMIT, lambda_from_log};
use crate::error::FitError;
use crate::math::fit_ridge;
use crate::models::{mean_squared_error, predict};

/// One scored candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepPoint {
    pub log_lambda: f64,
    pub lambda: f64,
    pub mse: f64,
}

/// All scored candidates plus the winner.
#[derive(Debug, Clone, PartialEq)]
pub struct Sweep {
    pub points: Vec<SweepPoint>,
    pub best: SweepPoint,
}

/// Integer-spaced `ln λ` grid `min, min+1, …` up to and including `max`.
pub fn log_lambda_grid(min: f64, max: f64) -> Result<Vec<f64>, FitError> {
    if !(min.is_finite() && max.is_finite() && max >= min) {
        return Err(FitError::invalid(format!(
            "Invalid ln(lambda) range: min={min}, max={max} (must be finite and max>=min)."
        )));
    }
    if min < -LOG_LAMBDA_LIMIT || max > LOG_LAMBDA_LIMIT {
        return Err(FitError::invalid(format!(
            "ln(lambda) range [{min}, {max}] leaves [-{LOG_LAMBDA_LIMIT}, {LOG_LAMBDA_LIMIT}]."
        )));
    }
    let steps = ((max - min).floor() as usize)
        .checked_add(1)
        .ok_or_else(|| FitError::invalid("ln(lambda) grid is too long."))?;
    Ok((0..steps).map(|i| min + i as f64).collect())
}

/// Score each `ln λ` in `grid` and pick the best.
pub fn sweep_ridge(
    train_design: &DMatrix<f64>,
    train_targets: &DVector<f64>,
    eval_design: &DMatrix<f64>,
    reference: &[f64],
    grid: &[f64],
) -> Result<Sweep, FitError> {
    if grid.is_empty() {
        return Err(FitError::invalid("ln(lambda) grid is empty."));
    }

    let mut points = Vec::with_capacity(grid.len());
    for &log_lambda in grid {
        let lambda = lambda_from_log(log_lambda);
        if !(lambda.is_finite() && lambda > 0.0) {
            warn!("skipping ln(lambda)={log_lambda}: exp gives {lambda}");
            continue;
        }
        let weights = match fit_ridge(train_design, train_targets, lambda) {
            Ok(w) => w,
            Err(FitError::NumericalInstability(msg)) => {
                warn!("skipping ln(lambda)={log_lambda}: {msg}");
                continue;
            }
            Err(e) => return Err(e),
        };
        let predicted = predict(eval_design, &weights)?;
        let mse = mean_squared_error(&predicted, reference)?;
        debug!("sweep ln(lambda)={log_lambda} mse={mse:.6e}");
        points.push(SweepPoint {
            log_lambda,
            lambda,
            mse,
        });
    }

    let Some(first) = points.first().copied() else {
        return Err(FitError::unstable("Every ridge candidate in the sweep failed."));
    };
    let best = points
        .iter()
        .skip(1)
        .fold(first, |best, p| if p.mse < best.mse { *p } else { best });

    Ok(Sweep { points, best })
}
