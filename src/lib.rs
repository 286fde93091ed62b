//! `lsq-poly` library crate.
//!
//! Fits a polynomial to noisy samples of `sin(2πx)` by regularized least
//! squares, three ways: closed form, gradient descent and conjugate gradient.
//!
//! The binary (`lsq`) is a thin wrapper around this library so that:
//!
//! - the solvers are testable without spawning processes
//! - the core takes explicit inputs and holds no experiment state
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
