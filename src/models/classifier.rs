//! The seam between the predictor and a concrete model format.

use crate::error::ChurnError;

/// A binary classifier over a fixed, named feature vector.
///
/// Implementations are immutable once constructed; every method takes `&self`
/// and must return the same answer for the same input.
pub trait Classifier: Send + Sync {
    /// Feature names in the order `features` slices must follow.
    fn feature_names(&self) -> &[String];

    /// Raw decision score for one sample.
    fn decision_function(&self, features: &[f64]) -> Result<f64, ChurnError>;

    /// Probability of the positive class, in `[0, 1]`.
    fn predict_proba(&self, features: &[f64]) -> Result<f64, ChurnError>;

    /// Predicted class (`0` or `1`) according to the model's own decision rule.
    fn predict(&self, features: &[f64]) -> Result<u8, ChurnError>;

    /// Class and positive-class probability for one sample.
    ///
    /// Implementations that derive both from one score should override this so
    /// the two come from a single evaluation.
    fn predict_with_proba(&self, features: &[f64]) -> Result<(u8, f64), ChurnError> {
        Ok((self.predict(features)?, self.predict_proba(features)?))
    }

    /// Multi-line, human-readable description of the model.
    fn describe(&self) -> String;
}

/// Reject feature vectors that do not match the classifier's schema.
pub fn check_features(expected: usize, features: &[f64]) -> Result<(), ChurnError> {
    if features.len() != expected {
        return Err(ChurnError::SchemaMismatch(format!(
            "expected {expected} features, got {}",
            features.len()
        )));
    }
    if let Some(idx) = features.iter().position(|v| !v.is_finite()) {
        return Err(ChurnError::SchemaMismatch(format!(
            "feature {idx} is not a finite number ({})",
            features[idx]
        )));
    }
    Ok(())
}

/// Numerically stable logistic function.
pub fn logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}
