//! Classifier implementations.
//!
//! `Classifier` is the interface the predictor talks to; `gbdt` implements it for
//! gradient-boosted tree artifacts stored as JSON.

pub mod classifier;
pub mod gbdt;

pub use classifier::*;
pub use gbdt::*;
