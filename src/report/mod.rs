//! Reporting utilities: formatted terminal output for runs and sweeps.
//!
//! Formatting lives in one place so the solving code stays free of
//! presentation concerns.

pub mod format;

pub use format::*;
