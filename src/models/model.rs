//! Prediction and evaluation for polynomial weight vectors.

use nalgebra::{DMatrix, DVector};

use crate::error::FitError;

/// Predict `Φ · w` for an evaluation design matrix.
pub fn predict(design: &DMatrix<f64>, weights: &DVector<f64>) -> Result<DVector<f64>, FitError> {
    if design.ncols() != weights.len() {
        return Err(FitError::invalid(format!(
            "Design matrix has {} columns but weight vector has {} entries.",
            design.ncols(),
            weights.len()
        )));
    }
    Ok(design * weights)
}

/// Mean squared error between predictions and reference values.
pub fn mean_squared_error(predicted: &DVector<f64>, reference: &[f64]) -> Result<f64, FitError> {
    if predicted.len() != reference.len() || reference.is_empty() {
        return Err(FitError::invalid(format!(
            "Cannot compare {} predictions against {} reference values.",
            predicted.len(),
            reference.len()
        )));
    }
    let sse: f64 = predicted
        .iter()
        .zip(reference.iter())
        .map(|(p, r)| (p - r) * (p - r))
        .sum();
    Ok(sse / reference.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::expand;

    #[test]
    fn predict_is_linear_in_weights() {
        let design = expand(&[-1.0, 0.0, 0.25, 0.8, 2.0], 3).unwrap();
        let w1 = DVector::from_row_slice(&[0.5, -1.0, 2.0, 0.25]);
        let w2 = DVector::from_row_slice(&[-3.0, 0.0, 1.5, -0.75]);

        let sum = predict(&design, &(&w1 + &w2)).unwrap();
        let parts = predict(&design, &w1).unwrap() + predict(&design, &w2).unwrap();
        for (a, b) in sum.iter().zip(parts.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn predict_rejects_wrong_weight_length() {
        let design = expand(&[0.0, 1.0], 2).unwrap();
        let w = DVector::from_row_slice(&[1.0, 2.0]);
        assert!(matches!(predict(&design, &w), Err(FitError::InvalidArgument(_))));
    }

    #[test]
    fn mean_squared_error_basic() {
        let p = DVector::from_row_slice(&[1.0, 2.0, 3.0]);
        let mse = mean_squared_error(&p, &[1.0, 2.0, 5.0]).unwrap();
        assert!((mse - 4.0 / 3.0).abs() < 1e-12);
        assert!(mean_squared_error(&p, &[1.0]).is_err());
    }
}
