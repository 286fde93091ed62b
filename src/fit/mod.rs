//! Iterative solvers and the ridge hyperparameter sweep.
//!
//! Responsibilities:
//!
//! - the shared ridge objective and its gradient
//! - fixed-step gradient descent
//! - conjugate gradient on the normal equations
//! - scoring closed-form ridge fits over an `ln λ` grid

pub mod conjugate;
pub mod gradient;
pub mod objective;
pub mod sweep;

pub use conjugate::*;
pub use gradient::*;
pub use objective::*;
pub use sweep::*;
