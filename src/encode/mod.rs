//! Categorical-to-numeric encoding.
//!
//! The encoder is a pure function so the form, the CLI, and tests all share it.

pub mod encoder;

pub use encoder::*;
