//! Prediction against a loaded classifier.

pub mod predictor;

#[cfg(test)]
pub(crate) mod fixtures;

pub use predictor::*;
