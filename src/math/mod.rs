//! Mathematical utilities: polynomial basis expansion and closed-form least squares.

pub mod basis;
pub mod ols;

pub use basis::*;
pub use ols::*;
