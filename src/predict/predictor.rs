//! The predictor: one loaded classifier, shared read-only across predictions.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{ChurnLabel, FEATURE_NAMES, NumericFeatureRecord, PredictionResult};
use crate::error::ChurnError;
use crate::models::{Classifier, GradientBoostedClassifier};

/// Handle to a loaded classifier.
///
/// Cloning is cheap and the model is never mutated after load, so the handle
/// can be passed to every prediction without locking.
#[derive(Clone)]
pub struct Predictor {
    model: Arc<dyn Classifier>,
}

impl std::fmt::Debug for Predictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Predictor")
            .field("features", &self.model.feature_names().len())
            .finish()
    }
}

impl Predictor {
    /// Load a GBDT artifact and check it was trained on the churn feature schema.
    pub fn load(path: &Path) -> Result<Self, ChurnError> {
        let model = GradientBoostedClassifier::load(path)?;
        if let Err(reason) = schema_compatible(model.feature_names()) {
            return Err(ChurnError::ModelLoad {
                path: path.to_path_buf(),
                reason,
            });
        }
        info!(
            path = %path.display(),
            trees = model.n_trees(),
            features = model.feature_names().len(),
            "loaded churn model"
        );
        Ok(Self {
            model: Arc::new(model),
        })
    }

    /// Wrap an already constructed classifier.
    pub fn new(model: impl Classifier + 'static) -> Result<Self, ChurnError> {
        schema_compatible(model.feature_names()).map_err(ChurnError::SchemaMismatch)?;
        Ok(Self {
            model: Arc::new(model),
        })
    }

    /// Predicted label, as decided by the model.
    pub fn predict(&self, record: &NumericFeatureRecord) -> Result<ChurnLabel, ChurnError> {
        label_of(self.model.predict(&record.to_vector())?)
    }

    /// Probability of churn, in `[0, 1]`.
    pub fn predict_probability(&self, record: &NumericFeatureRecord) -> Result<f64, ChurnError> {
        checked_probability(self.model.predict_proba(&record.to_vector())?)
    }

    /// Label and probability from one model evaluation.
    pub fn predict_result(&self, record: &NumericFeatureRecord) -> Result<PredictionResult, ChurnError> {
        let (class, p) = self.model.predict_with_proba(&record.to_vector())?;
        let label = label_of(class)?;
        let probability = checked_probability(p)?;
        debug!(label = label.as_class(), probability, "prediction");
        Ok(PredictionResult { label, probability })
    }

    pub fn describe(&self) -> String {
        self.model.describe()
    }
}

fn label_of(class: u8) -> Result<ChurnLabel, ChurnError> {
    match class {
        0 => Ok(ChurnLabel::NoChurn),
        1 => Ok(ChurnLabel::Churn),
        other => Err(ChurnError::SchemaMismatch(format!(
            "classifier returned class {other}, expected 0 or 1"
        ))),
    }
}

fn checked_probability(p: f64) -> Result<f64, ChurnError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(ChurnError::SchemaMismatch(format!(
            "classifier returned probability {p} outside [0, 1]"
        )));
    }
    Ok(p)
}

fn schema_compatible(names: &[String]) -> Result<(), String> {
    if names.len() != FEATURE_NAMES.len() {
        return Err(format!(
            "model expects {} features, churn records have {}",
            names.len(),
            FEATURE_NAMES.len()
        ));
    }
    for (idx, (got, want)) in names.iter().zip(FEATURE_NAMES).enumerate() {
        if got != want {
            return Err(format!("feature {idx} is '{got}', expected '{want}'"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode;
    use crate::models::GbdtArtifact;
    use crate::predict::fixtures::{high_risk_record, low_risk_record, reference_artifact};

    fn predictor() -> Predictor {
        let model = GradientBoostedClassifier::try_from(reference_artifact()).unwrap();
        Predictor::new(model).unwrap()
    }

    #[test]
    fn repeated_predictions_are_identical() {
        let predictor = predictor();
        let record = encode(&low_risk_record()).unwrap();
        let first = predictor.predict_result(&record).unwrap();
        for _ in 0..10 {
            let again = predictor.predict_result(&record).unwrap();
            assert_eq!(again.label, first.label);
            assert_eq!(again.probability.to_bits(), first.probability.to_bits());
        }
    }

    #[test]
    fn predicts_both_classes() {
        let predictor = predictor();
        let low = predictor
            .predict_result(&encode(&low_risk_record()).unwrap())
            .unwrap();
        let high = predictor
            .predict_result(&encode(&high_risk_record()).unwrap())
            .unwrap();

        assert_eq!(low.label, ChurnLabel::NoChurn);
        assert!(low.probability < 0.5);
        assert_eq!(high.label, ChurnLabel::Churn);
        assert!(high.probability > 0.5);
        for p in [low.probability, high.probability] {
            assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn clones_share_the_same_model() {
        let a = predictor();
        let b = a.clone();
        let record = encode(&high_risk_record()).unwrap();
        assert_eq!(a.predict_result(&record).unwrap(), b.predict_result(&record).unwrap());
    }

    #[test]
    fn rejects_models_with_other_feature_order() {
        let mut artifact: GbdtArtifact = reference_artifact();
        artifact.feature_names.swap(0, 1);
        let model = GradientBoostedClassifier::try_from(artifact).unwrap();
        let err = Predictor::new(model).unwrap_err();
        assert!(matches!(err, ChurnError::SchemaMismatch(_)));
        assert!(err.to_string().contains("SeniorCitizen"));
    }

    #[test]
    fn rejects_models_with_fewer_features() {
        let err = Predictor::new(FixedClassifier::with_names(&FEATURE_NAMES[..18])).unwrap_err();
        assert!(matches!(err, ChurnError::SchemaMismatch(_)));
        assert!(err.to_string().contains("18 features"));
    }

    /// Returns whatever class and probability it was built with.
    struct FixedClassifier {
        names: Vec<String>,
        class: u8,
        probability: f64,
    }

    impl FixedClassifier {
        fn with_names(names: &[&str]) -> Self {
            Self {
                names: names.iter().map(|s| s.to_string()).collect(),
                class: 0,
                probability: 0.5,
            }
        }

        fn returning(class: u8, probability: f64) -> Self {
            Self {
                class,
                probability,
                ..Self::with_names(&FEATURE_NAMES)
            }
        }
    }

    impl Classifier for FixedClassifier {
        fn feature_names(&self) -> &[String] {
            &self.names
        }

        fn decision_function(&self, _features: &[f64]) -> Result<f64, ChurnError> {
            Ok(0.0)
        }

        fn predict_proba(&self, _features: &[f64]) -> Result<f64, ChurnError> {
            Ok(self.probability)
        }

        fn predict(&self, _features: &[f64]) -> Result<u8, ChurnError> {
            Ok(self.class)
        }

        fn describe(&self) -> String {
            "fixed".to_string()
        }
    }

    #[test]
    fn out_of_range_class_is_schema_mismatch() {
        let predictor = Predictor::new(FixedClassifier::returning(2, 0.5)).unwrap();
        let record = encode(&low_risk_record()).unwrap();

        let err = predictor.predict(&record).unwrap_err();
        assert!(matches!(err, ChurnError::SchemaMismatch(_)));
        assert!(err.to_string().contains("class 2"));
        assert!(matches!(
            predictor.predict_result(&record),
            Err(ChurnError::SchemaMismatch(_))
        ));
    }

    #[test]
    fn out_of_range_probability_is_schema_mismatch() {
        let record = encode(&low_risk_record()).unwrap();
        for p in [1.5, -0.1, f64::NAN] {
            let predictor = Predictor::new(FixedClassifier::returning(1, p)).unwrap();
            assert!(matches!(
                predictor.predict_probability(&record),
                Err(ChurnError::SchemaMismatch(_))
            ));
            assert!(matches!(
                predictor.predict_result(&record),
                Err(ChurnError::SchemaMismatch(_))
            ));
        }

        let predictor = Predictor::new(FixedClassifier::returning(1, 1.0)).unwrap();
        let result = predictor.predict_result(&record).unwrap();
        assert_eq!(result.label, ChurnLabel::Churn);
        assert_eq!(result.probability, 1.0);
    }

    #[test]
    fn result_matches_separate_label_and_probability() {
        let predictor = predictor();
        for raw in [low_risk_record(), high_risk_record()] {
            let record = encode(&raw).unwrap();
            let result = predictor.predict_result(&record).unwrap();
            assert_eq!(result.label, predictor.predict(&record).unwrap());
            assert_eq!(
                result.probability.to_bits(),
                predictor.predict_probability(&record).unwrap().to_bits()
            );
        }
    }
}
