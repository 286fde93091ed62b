//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - sample sets handed to the solving core (`SampleSet`)
//! - solver identities and their options (`SolverKind`, `GradientDescentOptions`, ...)
//! - the explicit experiment configuration (`ExperimentConfig`)

pub mod types;

pub use types::*;
