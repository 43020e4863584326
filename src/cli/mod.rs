//! Command-line parsing for the churn predictor.
//!
//! The goal of this module is to keep **argument parsing** separate from
//! encoding and inference.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{Contract, InternetService, PaymentMethod, RawCustomerRecord};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "churn", version, about = "Customer churn prediction (gradient-boosted trees)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Predict churn for one customer given as flags or a JSON record file.
    Predict(PredictArgs),
    /// Launch the interactive form.
    Tui(TuiArgs),
    /// Load the model artifact and print its schema and parameters.
    Model(ModelArgs),
}

/// Where to find the classifier artifact.
#[derive(Debug, Args, Clone)]
pub struct ModelOpt {
    /// Classifier artifact (JSON). Falls back to `CHURN_MODEL_PATH`, then
    /// `final_gb_classifier.json`.
    #[arg(short = 'm', long = "model", value_name = "JSON")]
    pub model: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct ModelArgs {
    #[command(flatten)]
    pub model: ModelOpt,
}

#[derive(Debug, Args, Clone)]
pub struct TuiArgs {
    #[command(flatten)]
    pub model: ModelOpt,

    /// Write logs to this file (the form owns the terminal, so nothing is logged
    /// otherwise).
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Options for a one-shot prediction.
#[derive(Debug, Args, Clone)]
pub struct PredictArgs {
    #[command(flatten)]
    pub model: ModelOpt,

    /// Read the customer record from a JSON file instead of flags.
    #[arg(short = 'i', long, value_name = "JSON")]
    pub input: Option<PathBuf>,

    /// Export the prediction (input, features, result) to JSON.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,

    /// Print only the result block.
    #[arg(short = 'q', long)]
    pub quiet: bool,

    #[command(flatten)]
    pub customer: CustomerArgs,
}

/// Customer attributes as flags. Defaults match the form's initial state.
#[derive(Debug, Args, Clone)]
pub struct CustomerArgs {
    /// Gender (0/1).
    #[arg(long, default_value_t = 0)]
    pub gender: u8,

    /// Senior citizen (0/1).
    #[arg(long, default_value_t = 0)]
    pub senior_citizen: u8,

    /// Has a partner (0/1).
    #[arg(long, default_value_t = 0)]
    pub partner: u8,

    /// Has dependents (0/1).
    #[arg(long, default_value_t = 0)]
    pub dependents: u8,

    /// Tenure group (0-6).
    #[arg(long, default_value_t = 0)]
    pub tenure_group: u8,

    /// Paperless billing (0/1).
    #[arg(long, default_value_t = 0)]
    pub paperless_billing: u8,

    /// Phone service (0/1).
    #[arg(long, default_value_t = 0)]
    pub phone_service: u8,

    /// Multiple lines (0/1).
    #[arg(long, default_value_t = 0)]
    pub multiple_lines: u8,

    /// Internet service.
    #[arg(long, value_enum, default_value_t = InternetService::Dsl)]
    pub internet_service: InternetService,

    /// Online security (0/1/2).
    #[arg(long, default_value_t = 0)]
    pub online_security: u8,

    /// Online backup (0/1/2).
    #[arg(long, default_value_t = 0)]
    pub online_backup: u8,

    /// Device protection (0/1/2).
    #[arg(long, default_value_t = 0)]
    pub device_protection: u8,

    /// Tech support (0/1/2).
    #[arg(long, default_value_t = 0)]
    pub tech_support: u8,

    /// Streaming TV (0/1).
    #[arg(long, default_value_t = 0)]
    pub streaming_tv: u8,

    /// Streaming movies (0/1).
    #[arg(long, default_value_t = 0)]
    pub streaming_movies: u8,

    /// Contract term.
    #[arg(long, value_enum, default_value_t = Contract::MonthToMonth)]
    pub contract: Contract,

    /// Payment method.
    #[arg(long, value_enum, default_value_t = PaymentMethod::ElectronicCheck)]
    pub payment_method: PaymentMethod,

    /// Monthly charges.
    #[arg(long, default_value_t = 0.0)]
    pub monthly_charges: f64,

    /// Total charges.
    #[arg(long, default_value_t = 0.0)]
    pub total_charges: f64,
}

impl CustomerArgs {
    /// Build the raw record the encoder consumes.
    pub fn to_record(&self) -> RawCustomerRecord {
        RawCustomerRecord {
            gender: self.gender,
            senior_citizen: self.senior_citizen,
            partner: self.partner,
            dependents: self.dependents,
            phone_service: self.phone_service,
            multiple_lines: self.multiple_lines,
            internet_service: self.internet_service.label().to_string(),
            online_security: self.online_security,
            online_backup: self.online_backup,
            device_protection: self.device_protection,
            tech_support: self.tech_support,
            streaming_tv: self.streaming_tv,
            streaming_movies: self.streaming_movies,
            contract: self.contract.label().to_string(),
            paperless_billing: self.paperless_billing,
            payment_method: self.payment_method.label().to_string(),
            monthly_charges: self.monthly_charges,
            total_charges: self.total_charges,
            tenure_group: self.tenure_group,
        }
    }
}
