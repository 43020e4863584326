//! Gradient-boosted decision tree classifier loaded from a JSON artifact.
//!
//! Scoring follows the usual binary log-loss boosting setup:
//!
//! `raw = init_score + learning_rate * Σ leaf(tree)`
//!
//! A sample goes to the left child when `x[feature] <= threshold`. The positive
//! class probability is `logistic(raw)` and the predicted label is `1` when
//! `raw > decision_threshold`.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ChurnError;
use crate::models::classifier::{Classifier, check_features, logistic};

/// Artifact format versions this build can read.
pub const SUPPORTED_FORMAT_VERSION: u32 = 1;

/// A tree node: either a split or a leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// A single regression tree; node `0` is the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

/// On-disk schema of the classifier artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GbdtArtifact {
    pub format_version: u32,
    pub feature_names: Vec<String>,
    pub init_score: f64,
    pub learning_rate: f64,
    /// Raw-score cut-off for the positive class.
    #[serde(default)]
    pub decision_threshold: f64,
    pub trees: Vec<Tree>,
}

/// A validated, immutable GBDT classifier.
///
/// Only obtainable through validation, so tree walks never go out of bounds and
/// always terminate.
#[derive(Debug, Clone)]
pub struct GradientBoostedClassifier {
    artifact: GbdtArtifact,
}

impl GradientBoostedClassifier {
    /// Load and validate an artifact file.
    pub fn load(path: &Path) -> Result<Self, ChurnError> {
        let load_err = |reason: String| ChurnError::ModelLoad {
            path: path.to_path_buf(),
            reason,
        };

        let file = File::open(path).map_err(|e| load_err(e.to_string()))?;
        let artifact: GbdtArtifact = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| load_err(format!("invalid artifact JSON: {e}")))?;
        Self::try_from(artifact).map_err(load_err)
    }

    pub fn artifact(&self) -> &GbdtArtifact {
        &self.artifact
    }

    pub fn n_trees(&self) -> usize {
        self.artifact.trees.len()
    }

    fn raw_score(&self, features: &[f64]) -> f64 {
        let sum: f64 = self
            .artifact
            .trees
            .iter()
            .map(|tree| eval_tree(tree, features))
            .sum();
        self.artifact.init_score + self.artifact.learning_rate * sum
    }

    fn class_of(&self, raw: f64) -> u8 {
        u8::from(raw > self.artifact.decision_threshold)
    }
}

impl TryFrom<GbdtArtifact> for GradientBoostedClassifier {
    type Error = String;

    fn try_from(artifact: GbdtArtifact) -> Result<Self, Self::Error> {
        validate(&artifact)?;
        Ok(Self { artifact })
    }
}

impl Classifier for GradientBoostedClassifier {
    fn feature_names(&self) -> &[String] {
        &self.artifact.feature_names
    }

    fn decision_function(&self, features: &[f64]) -> Result<f64, ChurnError> {
        check_features(self.artifact.feature_names.len(), features)?;
        Ok(self.raw_score(features))
    }

    fn predict_proba(&self, features: &[f64]) -> Result<f64, ChurnError> {
        Ok(logistic(self.decision_function(features)?))
    }

    fn predict(&self, features: &[f64]) -> Result<u8, ChurnError> {
        let raw = self.decision_function(features)?;
        Ok(self.class_of(raw))
    }

    fn predict_with_proba(&self, features: &[f64]) -> Result<(u8, f64), ChurnError> {
        let raw = self.decision_function(features)?;
        Ok((self.class_of(raw), logistic(raw)))
    }

    fn describe(&self) -> String {
        let a = &self.artifact;
        let n_nodes: usize = a.trees.iter().map(|t| t.nodes.len()).sum();
        let mut out = String::new();
        out.push_str("Gradient-boosted decision trees (binary, log-loss)\n");
        out.push_str(&format!("Format version: {}\n", a.format_version));
        out.push_str(&format!("Trees: {} ({} nodes)\n", a.trees.len(), n_nodes));
        out.push_str(&format!("Learning rate: {}\n", a.learning_rate));
        out.push_str(&format!("Init score: {:.6}\n", a.init_score));
        out.push_str(&format!(
            "Decision threshold: raw > {} (p > {:.4})\n",
            a.decision_threshold,
            logistic(a.decision_threshold)
        ));
        out.push_str(&format!("Features ({}):\n", a.feature_names.len()));
        for (idx, name) in a.feature_names.iter().enumerate() {
            out.push_str(&format!("{idx:>4}  {name}\n"));
        }
        out
    }
}

/// Walk one validated tree down to its leaf.
fn eval_tree(tree: &Tree, features: &[f64]) -> f64 {
    let mut idx = 0usize;
    loop {
        match &tree.nodes[idx] {
            Node::Leaf { value } => return *value,
            Node::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                idx = if features[*feature] <= *threshold { *left } else { *right };
            }
        }
    }
}

fn validate(a: &GbdtArtifact) -> Result<(), String> {
    if a.format_version != SUPPORTED_FORMAT_VERSION {
        return Err(format!(
            "unsupported format_version {} (supported: {SUPPORTED_FORMAT_VERSION})",
            a.format_version
        ));
    }
    if a.feature_names.is_empty() {
        return Err("artifact declares no features".to_string());
    }
    if !a.init_score.is_finite() || !a.learning_rate.is_finite() || !a.decision_threshold.is_finite() {
        return Err("init_score, learning_rate and decision_threshold must be finite".to_string());
    }
    if a.trees.is_empty() {
        return Err("artifact contains no trees".to_string());
    }

    let n_features = a.feature_names.len();
    for (t, tree) in a.trees.iter().enumerate() {
        if tree.nodes.is_empty() {
            return Err(format!("tree {t} has no nodes"));
        }
        let n_nodes = tree.nodes.len();
        for (i, node) in tree.nodes.iter().enumerate() {
            match node {
                Node::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(format!("tree {t} node {i}: non-finite leaf value"));
                    }
                }
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= n_features {
                        return Err(format!(
                            "tree {t} node {i}: feature index {feature} out of range (features: {n_features})"
                        ));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("tree {t} node {i}: non-finite threshold"));
                    }
                    // Children must come after their parent: bounds-checked and acyclic.
                    for child in [*left, *right] {
                        if child <= i || child >= n_nodes {
                            return Err(format!(
                                "tree {t} node {i}: child index {child} must be in {}..{n_nodes}",
                                i + 1
                            ));
                        }
                    }
                }
            }
        }
    }
    Ok(())
}
