//! Shared domain types.
//!
//! These types are kept lightweight and serializable so they can be:
//!
//! - filled from the terminal form, CLI flags, or a JSON record file
//! - encoded into the model's feature vector
//! - exported alongside a prediction

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Number of features the classifier consumes.
pub const FEATURE_COUNT: usize = 19;

/// Feature names in the order the classifier was trained on.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "gender",
    "SeniorCitizen",
    "Partner",
    "Dependents",
    "PhoneService",
    "MultipleLines",
    "InternetService",
    "OnlineSecurity",
    "OnlineBackup",
    "DeviceProtection",
    "TechSupport",
    "StreamingTV",
    "StreamingMovies",
    "Contract",
    "PaperlessBilling",
    "PaymentMethod",
    "MonthlyCharges",
    "TotalCharges",
    "tenure_group",
];

/// Highest tenure group the form accepts.
pub const TENURE_GROUP_MAX: u8 = 6;

/// Internet service plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum InternetService {
    #[serde(rename = "DSL")]
    Dsl,
    #[serde(rename = "Fiber optic")]
    FiberOptic,
    #[serde(rename = "No")]
    No,
}

impl InternetService {
    pub const fn label(self) -> &'static str {
        match self {
            InternetService::Dsl => "DSL",
            InternetService::FiberOptic => "Fiber optic",
            InternetService::No => "No",
        }
    }
}

/// Contract term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Contract {
    #[serde(rename = "Month-to-Month")]
    MonthToMonth,
    #[serde(rename = "One year")]
    OneYear,
    #[serde(rename = "Two year")]
    TwoYear,
}

impl Contract {
    pub const fn label(self) -> &'static str {
        match self {
            Contract::MonthToMonth => "Month-to-Month",
            Contract::OneYear => "One year",
            Contract::TwoYear => "Two year",
        }
    }
}

/// Billing payment method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum PaymentMethod {
    #[serde(rename = "Electronic check")]
    ElectronicCheck,
    #[serde(rename = "Mailed check")]
    MailedCheck,
    #[serde(rename = "Bank transfer (automatic)")]
    BankTransfer,
    #[serde(rename = "Credit card (automatic)")]
    CreditCard,
}

impl PaymentMethod {
    pub const fn label(self) -> &'static str {
        match self {
            PaymentMethod::ElectronicCheck => "Electronic check",
            PaymentMethod::MailedCheck => "Mailed check",
            PaymentMethod::BankTransfer => "Bank transfer (automatic)",
            PaymentMethod::CreditCard => "Credit card (automatic)",
        }
    }
}

/// Customer attributes as entered by a user.
///
/// The categorical fields are free text here; only the encoder decides whether
/// they belong to their vocabulary. Serialized field names match the model's
/// training-time column names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCustomerRecord {
    pub gender: u8,
    #[serde(rename = "SeniorCitizen")]
    pub senior_citizen: u8,
    #[serde(rename = "Partner")]
    pub partner: u8,
    #[serde(rename = "Dependents")]
    pub dependents: u8,
    #[serde(rename = "PhoneService")]
    pub phone_service: u8,
    #[serde(rename = "MultipleLines")]
    pub multiple_lines: u8,
    #[serde(rename = "InternetService")]
    pub internet_service: String,
    #[serde(rename = "OnlineSecurity")]
    pub online_security: u8,
    #[serde(rename = "OnlineBackup")]
    pub online_backup: u8,
    #[serde(rename = "DeviceProtection")]
    pub device_protection: u8,
    #[serde(rename = "TechSupport")]
    pub tech_support: u8,
    #[serde(rename = "StreamingTV")]
    pub streaming_tv: u8,
    #[serde(rename = "StreamingMovies")]
    pub streaming_movies: u8,
    #[serde(rename = "Contract")]
    pub contract: String,
    #[serde(rename = "PaperlessBilling")]
    pub paperless_billing: u8,
    #[serde(rename = "PaymentMethod")]
    pub payment_method: String,
    #[serde(rename = "MonthlyCharges")]
    pub monthly_charges: f64,
    #[serde(rename = "TotalCharges")]
    pub total_charges: f64,
    pub tenure_group: u8,
}

impl Default for RawCustomerRecord {
    /// The form's initial state: every radio on its first option, every select box
    /// on its first entry, charges at zero.
    fn default() -> Self {
        Self {
            gender: 0,
            senior_citizen: 0,
            partner: 0,
            dependents: 0,
            phone_service: 0,
            multiple_lines: 0,
            internet_service: InternetService::Dsl.label().to_string(),
            online_security: 0,
            online_backup: 0,
            device_protection: 0,
            tech_support: 0,
            streaming_tv: 0,
            streaming_movies: 0,
            contract: Contract::MonthToMonth.label().to_string(),
            paperless_billing: 0,
            payment_method: PaymentMethod::ElectronicCheck.label().to_string(),
            monthly_charges: 0.0,
            total_charges: 0.0,
            tenure_group: 0,
        }
    }
}

/// Customer attributes with every categorical field replaced by its integer code.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericFeatureRecord {
    pub gender: u8,
    #[serde(rename = "SeniorCitizen")]
    pub senior_citizen: u8,
    #[serde(rename = "Partner")]
    pub partner: u8,
    #[serde(rename = "Dependents")]
    pub dependents: u8,
    #[serde(rename = "PhoneService")]
    pub phone_service: u8,
    #[serde(rename = "MultipleLines")]
    pub multiple_lines: u8,
    #[serde(rename = "InternetService")]
    pub internet_service: u8,
    #[serde(rename = "OnlineSecurity")]
    pub online_security: u8,
    #[serde(rename = "OnlineBackup")]
    pub online_backup: u8,
    #[serde(rename = "DeviceProtection")]
    pub device_protection: u8,
    #[serde(rename = "TechSupport")]
    pub tech_support: u8,
    #[serde(rename = "StreamingTV")]
    pub streaming_tv: u8,
    #[serde(rename = "StreamingMovies")]
    pub streaming_movies: u8,
    #[serde(rename = "Contract")]
    pub contract: u8,
    #[serde(rename = "PaperlessBilling")]
    pub paperless_billing: u8,
    #[serde(rename = "PaymentMethod")]
    pub payment_method: u8,
    #[serde(rename = "MonthlyCharges")]
    pub monthly_charges: f64,
    #[serde(rename = "TotalCharges")]
    pub total_charges: f64,
    pub tenure_group: u8,
}

impl NumericFeatureRecord {
    /// Feature vector in `FEATURE_NAMES` order.
    pub fn to_vector(&self) -> [f64; FEATURE_COUNT] {
        [
            f64::from(self.gender),
            f64::from(self.senior_citizen),
            f64::from(self.partner),
            f64::from(self.dependents),
            f64::from(self.phone_service),
            f64::from(self.multiple_lines),
            f64::from(self.internet_service),
            f64::from(self.online_security),
            f64::from(self.online_backup),
            f64::from(self.device_protection),
            f64::from(self.tech_support),
            f64::from(self.streaming_tv),
            f64::from(self.streaming_movies),
            f64::from(self.contract),
            f64::from(self.paperless_billing),
            f64::from(self.payment_method),
            self.monthly_charges,
            self.total_charges,
            f64::from(self.tenure_group),
        ]
    }
}

/// Binary churn label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChurnLabel {
    NoChurn,
    Churn,
}

impl ChurnLabel {
    /// Class index as the classifier reports it.
    pub fn as_class(self) -> u8 {
        match self {
            ChurnLabel::NoChurn => 0,
            ChurnLabel::Churn => 1,
        }
    }

    /// Text shown to the user.
    pub fn risk_text(self) -> &'static str {
        match self {
            ChurnLabel::NoChurn => "Low Churn Risk",
            ChurnLabel::Churn => "High Churn Risk",
        }
    }
}

/// Outcome of one prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub label: ChurnLabel,
    /// Probability of the positive (churn) class, in `[0, 1]`.
    pub probability: f64,
}
