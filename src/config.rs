//! Runtime configuration resolved from flags, the environment, and `.env`.
//!
//! Precedence for the model path: `--model` flag, then `CHURN_MODEL_PATH`, then
//! `final_gb_classifier.json` in the working directory. The log filter comes from
//! `CHURN_LOG` (an `EnvFilter` directive) and defaults to `warn`.

use std::path::{Path, PathBuf};

/// Artifact path used when nothing else is configured.
pub const DEFAULT_MODEL_PATH: &str = "final_gb_classifier.json";

/// Log filter used when `CHURN_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn";

pub const MODEL_PATH_ENV: &str = "CHURN_MODEL_PATH";
pub const LOG_FILTER_ENV: &str = "CHURN_LOG";

/// Where logs go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
    /// Logging disabled (the terminal form owns stdout/stderr).
    Off,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub model_path: PathBuf,
    pub log_filter: String,
    pub log_target: LogTarget,
}

impl AppConfig {
    /// Resolve configuration, loading `.env` first if present.
    pub fn from_env(model_flag: Option<&Path>, log_target: LogTarget) -> Self {
        dotenvy::dotenv().ok();
        Self {
            model_path: resolve_model_path(model_flag, std::env::var(MODEL_PATH_ENV).ok()),
            log_filter: resolve_log_filter(std::env::var(LOG_FILTER_ENV).ok()),
            log_target,
        }
    }
}

pub fn resolve_model_path(flag: Option<&Path>, env: Option<String>) -> PathBuf {
    if let Some(path) = flag {
        return path.to_path_buf();
    }
    match env {
        Some(value) if !value.trim().is_empty() => PathBuf::from(value.trim()),
        _ => PathBuf::from(DEFAULT_MODEL_PATH),
    }
}

pub fn resolve_log_filter(env: Option<String>) -> String {
    match env {
        Some(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => DEFAULT_LOG_FILTER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_beats_env_beats_default() {
        assert_eq!(
            resolve_model_path(Some(Path::new("flag.json")), Some("env.json".to_string())),
            PathBuf::from("flag.json")
        );
        assert_eq!(
            resolve_model_path(None, Some(" env.json ".to_string())),
            PathBuf::from("env.json")
        );
        assert_eq!(resolve_model_path(None, None), PathBuf::from(DEFAULT_MODEL_PATH));
        assert_eq!(
            resolve_model_path(None, Some("   ".to_string())),
            PathBuf::from(DEFAULT_MODEL_PATH)
        );
    }

    #[test]
    fn log_filter_defaults_to_warn() {
        assert_eq!(resolve_log_filter(None), "warn");
        assert_eq!(resolve_log_filter(Some("churn_predict=debug".to_string())), "churn_predict=debug");
    }
}
