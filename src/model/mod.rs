//! Model artifact loading and inference.
//!
//! The classifier itself is an external artifact: a JSON file produced by the
//! training pipeline, loaded once at startup and read-only afterwards.

pub mod artifact;
pub mod predictor;

pub use artifact::*;
pub use predictor::*;
