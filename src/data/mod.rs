//! Synthetic training/test data.

pub mod sample;

pub use sample::*;
