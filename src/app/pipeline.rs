//! Shared prediction pipeline used by both the CLI and the TUI.
//!
//! raw record -> encode -> predict
//!
//! Encoding runs first and any error stops the pipeline before the classifier
//! is touched.

use crate::domain::{NumericFeatureRecord, PredictionResult, RawCustomerRecord};
use crate::encode::encode;
use crate::error::ChurnError;
use crate::predict::Predictor;

/// All computed outputs of a single prediction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunOutput {
    pub features: NumericFeatureRecord,
    pub result: PredictionResult,
}

/// Encode `raw` and run it through `predictor`.
pub fn predict_customer(predictor: &Predictor, raw: &RawCustomerRecord) -> Result<RunOutput, ChurnError> {
    let features = encode(raw)?;
    let result = predictor.predict_result(&features)?;
    Ok(RunOutput { features, result })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::domain::{ChurnLabel, FEATURE_NAMES};
    use crate::models::{Classifier, GradientBoostedClassifier};
    use crate::predict::fixtures::{high_risk_record, low_risk_record, reference_artifact};

    /// Counts calls so tests can assert the model was never reached.
    struct CountingClassifier {
        names: Vec<String>,
        calls: Arc<AtomicUsize>,
    }

    impl Classifier for CountingClassifier {
        fn feature_names(&self) -> &[String] {
            &self.names
        }

        fn decision_function(&self, _features: &[f64]) -> Result<f64, ChurnError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(0.0)
        }

        fn predict_proba(&self, _features: &[f64]) -> Result<f64, ChurnError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(0.5)
        }

        fn predict(&self, _features: &[f64]) -> Result<u8, ChurnError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(0)
        }

        fn describe(&self) -> String {
            "counting".to_string()
        }
    }

    #[test]
    fn invalid_category_never_reaches_the_model() {
        let calls = Arc::new(AtomicUsize::new(0));
        let predictor = Predictor::new(CountingClassifier {
            names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            calls: Arc::clone(&calls),
        })
        .unwrap();

        let raw = RawCustomerRecord {
            internet_service: "DSL-Lite".to_string(),
            ..low_risk_record()
        };
        let err = predict_customer(&predictor, &raw).unwrap_err();
        assert!(matches!(err, ChurnError::InvalidCategoricalValue { .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        predict_customer(&predictor, &low_risk_record()).unwrap();
        assert!(calls.load(Ordering::SeqCst) > 0);
    }

    #[test]
    fn reference_example_is_reproducible() {
        let model = GradientBoostedClassifier::try_from(reference_artifact()).unwrap();
        let predictor = Predictor::new(model).unwrap();

        let a = predict_customer(&predictor, &low_risk_record()).unwrap();
        let b = predict_customer(&predictor, &low_risk_record()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.features.internet_service, 1);
        assert_eq!(a.features.contract, 2);
        assert_eq!(a.features.payment_method, 1);
        assert_eq!(a.result.label, ChurnLabel::NoChurn);

        let expected = 1.0 / (1.0 + 1.9_f64.exp());
        assert!((a.result.probability - expected).abs() < 1e-12);

        let high = predict_customer(&predictor, &high_risk_record()).unwrap();
        assert_eq!(high.result.label, ChurnLabel::Churn);
    }
}
