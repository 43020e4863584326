//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the categorical vocabularies (`InternetService`, `Contract`, `PaymentMethod`)
//! - raw and encoded customer records (`RawCustomerRecord`, `NumericFeatureRecord`)
//! - prediction outputs (`ChurnLabel`, `PredictionResult`)

pub mod types;

pub use types::*;
