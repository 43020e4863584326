//! Shared test fixtures: a small churn model and two customers it separates.

use crate::domain::{FEATURE_NAMES, RawCustomerRecord};
use crate::models::{GbdtArtifact, Node, Tree};

fn stump(feature: usize, threshold: f64, left: f64, right: f64) -> Tree {
    Tree {
        nodes: vec![
            Node::Split {
                feature,
                threshold,
                left: 1,
                right: 2,
            },
            Node::Leaf { value: left },
            Node::Leaf { value: right },
        ],
    }
}

/// Four stumps over Contract, tenure_group, MonthlyCharges and InternetService.
pub fn reference_artifact() -> GbdtArtifact {
    GbdtArtifact {
        format_version: 1,
        feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
        init_score: -1.0,
        learning_rate: 1.0,
        decision_threshold: 0.0,
        trees: vec![
            stump(13, 0.5, 1.2, -1.5),
            stump(18, 1.5, 0.8, -0.6),
            stump(16, 65.0, -0.4, 0.7),
            stump(6, 0.5, -0.3, 0.5),
        ],
    }
}

/// Fiber optic, two-year contract: raw score -1.9.
pub fn low_risk_record() -> RawCustomerRecord {
    RawCustomerRecord {
        internet_service: "Fiber optic".to_string(),
        contract: "Two year".to_string(),
        payment_method: "Mailed check".to_string(),
        tenure_group: 3,
        monthly_charges: 70.35,
        total_charges: 1397.5,
        ..RawCustomerRecord::default()
    }
}

/// Fiber optic, month-to-month, new customer, high bill: raw score 2.2.
pub fn high_risk_record() -> RawCustomerRecord {
    RawCustomerRecord {
        internet_service: "Fiber optic".to_string(),
        contract: "Month-to-Month".to_string(),
        payment_method: "Electronic check".to_string(),
        paperless_billing: 1,
        tenure_group: 0,
        monthly_charges: 90.0,
        total_charges: 90.0,
        ..RawCustomerRecord::default()
    }
}
