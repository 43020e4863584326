//! Input/output helpers.
//!
//! - customer record JSON input (`record`)
//! - prediction JSON export (`export`)

pub mod export;
pub mod record;

pub use export::*;
pub use record::*;
