//! Scaler and classifier seams.
//!
//! The engine only talks to [`Scaler`] and [`Classifier`]. The JSON-backed
//! [`StandardScaler`] and [`LinearClassifier`] are the shipped
//! implementations; any other backend can sit behind the same traits.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Fixed affine normalization fitted at training time.
pub trait Scaler: Send + Sync {
    fn n_features(&self) -> usize;

    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, EngineError>;
}

/// A pre-fitted probabilistic classifier over a fixed, ordered class list.
pub trait Classifier: Send + Sync {
    fn n_features(&self) -> usize;

    /// Class labels, in the order `predict_proba` reports them.
    fn classes(&self) -> &[String];

    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, EngineError>;

    /// Most probable label plus the full distribution. Ties go to the
    /// earlier class.
    fn predict(&self, features: &[f64]) -> Result<Prediction, EngineError> {
        let probabilities = self.predict_proba(features)?;
        if probabilities.len() != self.classes().len() {
            return Err(EngineError::Prediction(format!(
                "classifier returned {} probabilities for {} classes",
                probabilities.len(),
                self.classes().len()
            )));
        }
        if probabilities.iter().any(|p| !p.is_finite()) {
            return Err(EngineError::Prediction(
                "classifier returned a non-finite probability".to_string(),
            ));
        }

        let mut best = 0;
        for (i, p) in probabilities.iter().enumerate() {
            if *p > probabilities[best] {
                best = i;
            }
        }
        let label = self
            .classes()
            .get(best)
            .cloned()
            .ok_or_else(|| EngineError::Prediction("classifier has no classes".to_string()))?;

        Ok(Prediction {
            label,
            probabilities,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub probabilities: Vec<f64>,
}

impl Prediction {
    /// Probability of the predicted label.
    pub fn confidence(&self) -> f64 {
        self.probabilities.iter().copied().fold(0.0, f64::max)
    }
}

fn check_width(expected: usize, actual: usize) -> Result<(), EngineError> {
    if expected == actual {
        Ok(())
    } else {
        Err(EngineError::Prediction(format!(
            "expected {expected} features, got {actual}"
        )))
    }
}

/// `(x - mean) / scale`, with a zero scale treated as 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl Scaler for StandardScaler {
    fn n_features(&self) -> usize {
        self.mean.len()
    }

    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, EngineError> {
        check_width(self.mean.len(), features.len())?;
        Ok(features
            .iter()
            .zip(&self.mean)
            .zip(&self.scale)
            .map(|((x, mean), scale)| {
                let scale = if *scale == 0.0 { 1.0 } else { *scale };
                (x - mean) / scale
            })
            .collect())
    }
}

/// Multinomial linear model: softmax of `coefficients · x + intercepts`,
/// one coefficient row and intercept per class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearClassifier {
    pub classes: Vec<String>,
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

impl LinearClassifier {
    /// Shape problems that would make every prediction fail.
    pub fn shape_error(&self) -> Option<String> {
        let n_classes = self.classes.len();
        if n_classes == 0 {
            return Some("model has no classes".to_string());
        }
        if self.coefficients.len() != n_classes || self.intercepts.len() != n_classes {
            return Some(format!(
                "model has {n_classes} classes but {} coefficient rows and {} intercepts",
                self.coefficients.len(),
                self.intercepts.len()
            ));
        }
        let width = self.coefficients[0].len();
        if self.coefficients.iter().any(|row| row.len() != width) {
            return Some("coefficient rows have different widths".to_string());
        }
        None
    }
}

impl Classifier for LinearClassifier {
    fn n_features(&self) -> usize {
        self.coefficients.first().map_or(0, Vec::len)
    }

    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, EngineError> {
        if let Some(problem) = self.shape_error() {
            return Err(EngineError::Prediction(problem));
        }
        check_width(self.n_features(), features.len())?;

        let logits: Vec<f64> = self
            .coefficients
            .iter()
            .zip(&self.intercepts)
            .map(|(row, b)| row.iter().zip(features).map(|(w, x)| w * x).sum::<f64>() + b)
            .collect();
        let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exps: Vec<f64> = logits.iter().map(|z| (z - max).exp()).collect();
        let total: f64 = exps.iter().sum();
        Ok(exps.into_iter().map(|e| e / total).collect())
    }
}
