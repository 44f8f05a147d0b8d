//! Mood classifier abstraction and the linear model adapter.
//!
//! The scoring pipeline treats classifiers as black boxes behind a single
//! capability: given a feature matrix, return one probability vector over
//! the four mood classes per row. Concrete model libraries plug in as
//! adapters of [`MoodClassifier`]; the shipped adapter is a multinomial
//! logistic model whose weights are trained offline and stored as a JSON
//! artifact, one artifact per starting mood.

use serde::{Deserialize, Serialize};

use crate::{
    features::{FEATURE_WIDTH, FeatureMatrix},
    mood::MOOD_COUNT,
};

#[derive(Debug)]
pub enum ModelError {
    /// No model artifact exists for the requested starting mood. This is a
    /// configuration error and is surfaced immediately, never retried.
    NotFound(String),
    IoError(std::io::Error),
    SerdeError(serde_json::Error),
    /// The feature matrix does not match the shape the model was trained
    /// on. A corrupted matrix cannot be partially trusted, so the whole
    /// request is rejected.
    ShapeMismatch { expected: usize, actual: usize },
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::NotFound(mood) => {
                write!(f, "no model artifact for starting mood '{}'", mood)
            }
            ModelError::IoError(e) => write!(f, "model artifact I/O error: {}", e),
            ModelError::SerdeError(e) => write!(f, "model artifact parse error: {}", e),
            ModelError::ShapeMismatch { expected, actual } => write!(
                f,
                "feature matrix has {} columns, model expects {}",
                actual, expected
            ),
        }
    }
}

impl From<std::io::Error> for ModelError {
    fn from(err: std::io::Error) -> Self {
        ModelError::IoError(err)
    }
}

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        ModelError::SerdeError(err)
    }
}

/// The single capability the pipeline needs from a classifier: per-row
/// probability distributions over the four mood codes.
pub trait MoodClassifier {
    /// Returns one probability vector per matrix row. Every vector sums to
    /// 1.0 within floating point tolerance and each component lies in
    /// [0,1]. A matrix whose width does not match the trained schema is
    /// rejected with [`ModelError::ShapeMismatch`].
    fn predict_proba(&self, matrix: &FeatureMatrix) -> Result<Vec<[f64; MOOD_COUNT]>, ModelError>;
}

/// Multinomial logistic classifier loaded from a JSON artifact.
///
/// One artifact exists per starting mood; the weights map a normalized
/// feature vector to four class logits which are turned into probabilities
/// with a softmax. The model is read-only for the life of the process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearMoodModel {
    /// One weight row per mood class, each as wide as the feature schema.
    pub weights: Vec<Vec<f64>>,
    /// One bias term per mood class.
    pub bias: Vec<f64>,
}

impl LinearMoodModel {
    /// Parses a model artifact and validates its shape against the fixed
    /// feature schema and mood universe.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let model: LinearMoodModel = serde_json::from_str(json)?;
        if model.weights.len() != MOOD_COUNT || model.bias.len() != MOOD_COUNT {
            return Err(ModelError::ShapeMismatch {
                expected: MOOD_COUNT,
                actual: model.weights.len(),
            });
        }
        for row in &model.weights {
            if row.len() != FEATURE_WIDTH {
                return Err(ModelError::ShapeMismatch {
                    expected: FEATURE_WIDTH,
                    actual: row.len(),
                });
            }
        }
        Ok(model)
    }
}

/// Numerically stable softmax over a fixed-size logit vector.
fn softmax(logits: [f64; MOOD_COUNT]) -> [f64; MOOD_COUNT] {
    let max = logits.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let mut exps = [0.0; MOOD_COUNT];
    let mut sum = 0.0;
    for (i, logit) in logits.iter().enumerate() {
        exps[i] = (logit - max).exp();
        sum += exps[i];
    }
    for e in exps.iter_mut() {
        *e /= sum;
    }
    exps
}

impl MoodClassifier for LinearMoodModel {
    fn predict_proba(&self, matrix: &FeatureMatrix) -> Result<Vec<[f64; MOOD_COUNT]>, ModelError> {
        let mut out = Vec::with_capacity(matrix.len());
        for row in &matrix.rows {
            if row.len() != FEATURE_WIDTH {
                return Err(ModelError::ShapeMismatch {
                    expected: FEATURE_WIDTH,
                    actual: row.len(),
                });
            }

            let mut logits = [0.0; MOOD_COUNT];
            for (class, (weights, bias)) in self.weights.iter().zip(self.bias.iter()).enumerate() {
                logits[class] = weights
                    .iter()
                    .zip(row.iter())
                    .map(|(w, x)| w * x)
                    .sum::<f64>()
                    + bias;
            }
            out.push(softmax(logits));
        }
        Ok(out)
    }
}
