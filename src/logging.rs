//! `tracing` subscriber setup.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{AppConfig, LogTarget};
use crate::error::AppError;

/// Install the global subscriber for the configured target.
pub fn init_logging(config: &AppConfig) -> Result<(), AppError> {
    let filter = EnvFilter::try_new(&config.log_filter)
        .map_err(|e| AppError::new(2, format!("Invalid log filter '{}': {e}", config.log_filter)))?;

    match &config.log_target {
        LogTarget::Off => {}
        LogTarget::Stderr => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .try_init()
                .map_err(|e| AppError::new(4, format!("Failed to initialize logging: {e}")))?;
        }
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| AppError::new(2, format!("Failed to open log file '{}': {e}", path.display())))?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()
                .map_err(|e| AppError::new(4, format!("Failed to initialize logging: {e}")))?;
        }
    }

    Ok(())
}
