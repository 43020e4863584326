//! Export a single prediction to JSON.
//!
//! The export carries the input record, the encoded feature vector, and the
//! result, so a prediction can be reproduced later against the same artifact.

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{ChurnLabel, NumericFeatureRecord, PredictionResult, RawCustomerRecord};
use crate::error::ChurnError;

/// A saved prediction (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionExport {
    pub tool: String,
    pub predicted_at: DateTime<Utc>,
    pub model_path: PathBuf,
    pub input: RawCustomerRecord,
    pub features: NumericFeatureRecord,
    pub label: ChurnLabel,
    pub risk: String,
    pub probability: f64,
}

impl PredictionExport {
    pub fn new(
        model_path: &Path,
        input: &RawCustomerRecord,
        features: &NumericFeatureRecord,
        result: &PredictionResult,
    ) -> Self {
        Self {
            tool: "churn".to_string(),
            predicted_at: Utc::now(),
            model_path: model_path.to_path_buf(),
            input: input.clone(),
            features: *features,
            label: result.label,
            risk: result.label.risk_text().to_string(),
            probability: result.probability,
        }
    }
}

/// Write a prediction JSON file.
pub fn write_prediction_json(path: &Path, export: &PredictionExport) -> Result<(), ChurnError> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, export)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode;

    #[test]
    fn export_keeps_input_features_and_result() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prediction.json");

        let raw = RawCustomerRecord {
            contract: "One year".to_string(),
            monthly_charges: 42.5,
            ..RawCustomerRecord::default()
        };
        let features = encode(&raw).unwrap();
        let result = PredictionResult {
            label: ChurnLabel::Churn,
            probability: 0.61,
        };
        let export = PredictionExport::new(Path::new("final_gb_classifier.json"), &raw, &features, &result);
        write_prediction_json(&path, &export).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let back: PredictionExport = serde_json::from_str(&text).unwrap();
        assert_eq!(back.input, raw);
        assert_eq!(back.features, features);
        assert_eq!(back.label, ChurnLabel::Churn);
        assert_eq!(back.risk, "High Churn Risk");
        assert_eq!(back.probability, 0.61);

        assert!(text.contains("\"label\": \"churn\""));
        assert!(text.contains("\"Contract\": \"One year\""));
    }

    #[test]
    fn unwritable_export_path_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("prediction.json");
        let raw = RawCustomerRecord::default();
        let features = encode(&raw).unwrap();
        let result = PredictionResult {
            label: ChurnLabel::NoChurn,
            probability: 0.2,
        };
        let export = PredictionExport::new(Path::new("model.json"), &raw, &features, &result);

        let err = write_prediction_json(&path, &export).unwrap_err();
        assert!(matches!(err, ChurnError::Io(_)));
        assert_eq!(err.exit_code(), 2);
    }
}
