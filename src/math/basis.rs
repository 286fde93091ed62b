//! Polynomial basis expansion.
//!
//! A 1-D sample `x` of length `N` becomes the `N × (D+1)` design matrix
//!
//! ```text
//! [ 1  x_0  x_0^2 ... x_0^D ]
//! [ 1  x_1  x_1^2 ... x_1^D ]
//! [ ...                     ]
//! ```
//!
//! Column `j` holds `x^j`, so column 0 is the bias. Every solver indexes its
//! weight vector in this same ascending-power order.

use nalgebra::DMatrix;

use crate::error::FitError;

/// Expand `x` into a polynomial design matrix of the given degree.
///
/// Powers are built by repeated multiplication (`x^{j+1} = x · x^j`), so
/// `0^0 = 1` and the bias column is exactly one.
pub fn expand(x: &[f64], degree: usize) -> Result<DMatrix<f64>, FitError> {
    if x.is_empty() {
        return Err(FitError::invalid("Cannot expand an empty sample."));
    }
    if let Some(bad) = x.iter().find(|v| !v.is_finite()) {
        return Err(FitError::invalid(format!(
            "Sample inputs must be finite (found {bad})."
        )));
    }

    let cols = degree
        .checked_add(1)
        .ok_or_else(|| FitError::invalid(format!("Degree {degree} is too large.")))?;
    let mut out = DMatrix::<f64>::zeros(x.len(), cols);
    for (i, &xi) in x.iter().enumerate() {
        let mut power = 1.0;
        for j in 0..cols {
            out[(i, j)] = power;
            power *= xi;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_linear_two_points() {
        let m = expand(&[0.0, 1.0], 1).unwrap();
        assert_eq!(m, DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 1.0, 1.0]));
    }

    #[test]
    fn expand_shape_and_bias_column() {
        let x: Vec<f64> = (0..17).map(|i| i as f64 * 0.37 - 2.0).collect();
        for degree in [0, 1, 3, 9] {
            let m = expand(&x, degree).unwrap();
            assert_eq!(m.nrows(), x.len());
            assert_eq!(m.ncols(), degree + 1);
            assert!(m.column(0).iter().all(|&v| v == 1.0));
        }
    }

    #[test]
    fn expand_powers_ascend() {
        let m = expand(&[2.0, -0.5], 3).unwrap();
        assert_eq!(m.row(0).iter().copied().collect::<Vec<_>>(), vec![1.0, 2.0, 4.0, 8.0]);
        assert_eq!(
            m.row(1).iter().copied().collect::<Vec<_>>(),
            vec![1.0, -0.5, 0.25, -0.125]
        );
    }

    #[test]
    fn expand_rejects_empty_and_non_finite() {
        assert!(matches!(expand(&[], 2), Err(FitError::InvalidArgument(_))));
        assert!(matches!(
            expand(&[0.0, f64::NAN], 2),
            Err(FitError::InvalidArgument(_))
        ));
    }

    #[test]
    fn expand_rejects_degree_without_column_count() {
        assert!(matches!(
            expand(&[0.0, 1.0], usize::MAX),
            Err(FitError::InvalidArgument(_))
        ));
    }
}
