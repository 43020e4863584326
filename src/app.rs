//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - resolves configuration and installs logging
//! - loads the model artifact once
//! - dispatches to the one-shot predictor, the model summary, or the TUI

use std::path::Path;

use clap::Parser;
use tracing::info;

use crate::cli::{Command, ModelArgs, PredictArgs, TuiArgs};
use crate::config::{AppConfig, LogTarget};
use crate::error::{AppError, ChurnError};
use crate::predict::Predictor;

pub mod pipeline;

/// Entry point for the `churn` binary.
pub fn run() -> Result<(), AppError> {
    // `churn` and `churn -m model.json` behave like `churn tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Predict(args) => handle_predict(args),
        Command::Tui(args) => handle_tui(args),
        Command::Model(args) => handle_model(args),
    }
}

/// Load the predictor; any failure here is fatal for the process.
fn load_predictor(config: &AppConfig) -> Result<Predictor, AppError> {
    let predictor = Predictor::load(&config.model_path)?;
    Ok(predictor)
}

fn handle_predict(args: PredictArgs) -> Result<(), AppError> {
    let config = AppConfig::from_env(args.model.model.as_deref(), LogTarget::Stderr);
    crate::logging::init_logging(&config)?;

    let raw = match &args.input {
        Some(path) => crate::io::read_record_json(path).map_err(|e| file_error(path, e))?,
        None => args.customer.to_record(),
    };

    let predictor = load_predictor(&config)?;
    let run = pipeline::predict_customer(&predictor, &raw)?;

    if args.quiet {
        println!("{}", crate::report::format_prediction(&run.result));
    } else {
        println!(
            "{}",
            crate::report::format_run_summary(&raw, &run.features, &run.result)
        );
    }

    if let Some(path) = &args.export {
        let export = crate::io::PredictionExport::new(&config.model_path, &raw, &run.features, &run.result);
        crate::io::write_prediction_json(path, &export).map_err(|e| file_error(path, e))?;
        info!(path = %path.display(), "exported prediction");
    }

    Ok(())
}

/// Prefix a record or export failure with the file it concerns.
fn file_error(path: &Path, err: ChurnError) -> AppError {
    AppError::new(err.exit_code(), format!("{}: {err}", path.display()))
}

fn handle_model(args: ModelArgs) -> Result<(), AppError> {
    let config = AppConfig::from_env(args.model.model.as_deref(), LogTarget::Stderr);
    crate::logging::init_logging(&config)?;

    let predictor = load_predictor(&config)?;
    println!("Model: {}", config.model_path.display());
    print!("{}", predictor.describe());
    Ok(())
}

fn handle_tui(args: TuiArgs) -> Result<(), AppError> {
    let target = match &args.log_file {
        Some(path) => LogTarget::File(path.clone()),
        None => LogTarget::Off,
    };
    let config = AppConfig::from_env(args.model.model.as_deref(), target);
    crate::logging::init_logging(&config)?;

    // Load before taking over the terminal so a bad artifact is reported plainly.
    let predictor = load_predictor(&config)?;
    crate::tui::run(predictor, &config.model_path)
}

/// Rewrite argv so `churn` defaults to `churn tui`.
///
/// Rules:
/// - `churn`                      -> `churn tui`
/// - `churn -m model.json ...`    -> `churn tui -m model.json ...`
/// - `churn --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "predict" | "tui" | "model");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}
