//! Formatted terminal output for predictions.
//!
//! Formatting lives in one place so the CLI and the TUI render results identically.

use crate::domain::{FEATURE_NAMES, NumericFeatureRecord, PredictionResult, RawCustomerRecord};

/// Probability as a percentage with two decimals (`0.7342` -> `"73.42%"`).
pub fn format_probability(probability: f64) -> String {
    format!("{:.2}%", probability * 100.0)
}

/// Two-line result block: risk text, then the churn probability.
pub fn format_prediction(result: &PredictionResult) -> String {
    format!(
        "{}\nChurn Probability: {}",
        result.label.risk_text(),
        format_probability(result.probability)
    )
}

/// Full `churn predict` output: inputs, encoded feature vector, result.
pub fn format_run_summary(
    raw: &RawCustomerRecord,
    encoded: &NumericFeatureRecord,
    result: &PredictionResult,
) -> String {
    let mut out = String::new();

    out.push_str("=== churn - Customer Churn Prediction ===\n");

    out.push_str("\nCustomer Information:\n");
    out.push_str(&format!(
        "  gender={} | SeniorCitizen={} | Partner={} | Dependents={} | tenure_group={} | PaperlessBilling={}\n",
        raw.gender, raw.senior_citizen, raw.partner, raw.dependents, raw.tenure_group, raw.paperless_billing,
    ));

    out.push_str("\nServices:\n");
    out.push_str(&format!(
        "  PhoneService={} | MultipleLines={} | InternetService={}\n",
        raw.phone_service, raw.multiple_lines, raw.internet_service,
    ));
    out.push_str(&format!(
        "  OnlineSecurity={} | OnlineBackup={} | DeviceProtection={} | TechSupport={}\n",
        raw.online_security, raw.online_backup, raw.device_protection, raw.tech_support,
    ));
    out.push_str(&format!(
        "  StreamingTV={} | StreamingMovies={}\n",
        raw.streaming_tv, raw.streaming_movies,
    ));

    out.push_str("\nBilling Information:\n");
    out.push_str(&format!(
        "  Contract={} | PaymentMethod={}\n",
        raw.contract, raw.payment_method,
    ));
    out.push_str(&format!(
        "  MonthlyCharges={:.2} | TotalCharges={:.2}\n",
        raw.monthly_charges, raw.total_charges,
    ));

    out.push_str("\nFeature vector:\n");
    for (name, value) in FEATURE_NAMES.iter().zip(encoded.to_vector()) {
        out.push_str(&format!("  {name:<18} {value}\n"));
    }

    out.push_str("\nPrediction Result:\n");
    for line in format_prediction(result).lines() {
        out.push_str(&format!("  {line}\n"));
    }

    out
}
