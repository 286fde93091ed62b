//! Applying fitted weight vectors.
//!
//! Kept as small, pure functions so every solver's output is evaluated the
//! same way.

pub mod model;

pub use model::*;
