//! Error types.
//!
//! - `ChurnError` covers the prediction core (encoding, model loading, inference).
//! - `AppError` is what the binary reports: a message plus a process exit code.
//!
//! Exit codes:
//! - `2` invalid input or file errors
//! - `3` model artifact could not be loaded
//! - `4` schema mismatch or terminal/runtime failure

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the encoder, the classifier artifact, and the predictor.
#[derive(Debug, Error)]
pub enum ChurnError {
    /// A categorical input that is not a member of its fixed vocabulary.
    #[error("Invalid value for {field}: '{value}' (expected one of: {expected})")]
    InvalidCategoricalValue {
        field: &'static str,
        value: String,
        expected: String,
    },

    /// A numeric input outside the domain the form allows.
    #[error("Invalid value for {field}: {value} (expected {expected})")]
    InvalidFieldValue {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    /// The classifier artifact is missing, corrupted, or schema-incompatible.
    #[error("Failed to load model '{}': {reason}", path.display())]
    ModelLoad { path: PathBuf, reason: String },

    /// The feature vector handed to the classifier does not match its schema.
    #[error("Feature schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ChurnError {
    /// Exit code used when this error terminates the `churn` binary.
    pub fn exit_code(&self) -> u8 {
        match self {
            ChurnError::InvalidCategoricalValue { .. }
            | ChurnError::InvalidFieldValue { .. }
            | ChurnError::Io(_)
            | ChurnError::Json(_) => 2,
            ChurnError::ModelLoad { .. } => 3,
            ChurnError::SchemaMismatch(_) => 4,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<ChurnError> for AppError {
    fn from(err: ChurnError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
