//! Error types.
//!
//! - `FitError` is what the numerical core returns.
//! - `AppError` is what the binary reports (message + process exit code).

use nalgebra::DVector;

use crate::domain::SolverKind;

/// Failure modes of the solving core.
#[derive(Clone)]
pub enum FitError {
    /// Malformed shapes or out-of-range parameters.
    InvalidArgument(String),
    /// Singular / ill-conditioned system, or a result that is not finite.
    NumericalInstability(String),
    /// An iterative solver hit its iteration cap (or diverged) before meeting
    /// its tolerance. `partial` holds the last iterate.
    NonConvergence {
        solver: SolverKind,
        iterations: usize,
        criterion: f64,
        diverged: bool,
        partial: DVector<f64>,
    },
}

impl FitError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn unstable(message: impl Into<String>) -> Self {
        Self::NumericalInstability(message.into())
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidArgument(_) => 2,
            Self::NumericalInstability(_) => 4,
            Self::NonConvergence { .. } => 5,
        }
    }
}

impl std::fmt::Display for FitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
            Self::NumericalInstability(msg) => write!(f, "Numerical instability: {msg}"),
            Self::NonConvergence {
                solver,
                iterations,
                criterion,
                diverged,
                ..
            } => {
                if *diverged {
                    write!(
                        f,
                        "{} diverged after {iterations} iterations.",
                        solver.display_name()
                    )
                } else {
                    write!(
                        f,
                        "{} did not converge within {iterations} iterations (last criterion {criterion:.3e}).",
                        solver.display_name()
                    )
                }
            }
        }
    }
}

impl std::fmt::Debug for FitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(msg) => f.debug_tuple("InvalidArgument").field(msg).finish(),
            Self::NumericalInstability(msg) => {
                f.debug_tuple("NumericalInstability").field(msg).finish()
            }
            Self::NonConvergence {
                solver,
                iterations,
                criterion,
                diverged,
                partial,
            } => f
                .debug_struct("NonConvergence")
                .field("solver", solver)
                .field("iterations", iterations)
                .field("criterion", criterion)
                .field("diverged", diverged)
                .field("partial", &partial.as_slice())
                .finish(),
        }
    }
}

impl std::error::Error for FitError {}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<FitError> for AppError {
    fn from(err: FitError) -> Self {
        Self::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_error_maps_to_exit_codes() {
        let app: AppError = FitError::invalid("bad shape").into();
        assert_eq!(app.exit_code(), 2);
        assert!(app.to_string().contains("bad shape"));

        let app: AppError = FitError::unstable("singular").into();
        assert_eq!(app.exit_code(), 4);
    }

    #[test]
    fn non_convergence_reports_iteration_count() {
        let err = FitError::NonConvergence {
            solver: SolverKind::GradientDescent,
            iterations: 10,
            criterion: 0.5,
            diverged: false,
            partial: DVector::from_vec(vec![1.0, 2.0]),
        };
        assert_eq!(err.exit_code(), 5);
        assert!(err.to_string().contains("did not converge within 10"));
    }
}
