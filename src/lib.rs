//! `churn-predict` library crate.
//!
//! The binary (`churn`) is a thin wrapper around this library so that:
//!
//! - encoding and inference are testable without spawning processes
//! - the CLI and the terminal form share one prediction pipeline

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod encode;
pub mod error;
pub mod io;
pub mod logging;
pub mod models;
pub mod predict;
pub mod report;
pub mod tui;
