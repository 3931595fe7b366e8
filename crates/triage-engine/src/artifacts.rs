//! Loading and cross-checking the trained model artifacts.
//!
//! A model directory holds `metadata.json`, `scaler.json`,
//! `risk_model.json` and `dept_model.json`. Everything is loaded once and
//! checked against the feature layout this crate produces; any
//! disagreement is a load error rather than a silently wrong prediction.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::info;
use triage_core::models::verdict::{Department, RiskLevel};

use crate::error::EngineError;
use crate::features;
use crate::model::{Classifier, LinearClassifier, Scaler, StandardScaler};

pub const METADATA_FILE: &str = "metadata.json";
pub const SCALER_FILE: &str = "scaler.json";
pub const RISK_MODEL_FILE: &str = "risk_model.json";
pub const DEPT_MODEL_FILE: &str = "dept_model.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub feature_names: Vec<String>,
    /// Ordered as at training time.
    pub symptom_keywords: Vec<String>,
    pub n_features: usize,
    pub risk_classes: Vec<String>,
    pub dept_classes: Vec<String>,
}

/// The loaded, validated model set. Immutable once built.
pub struct ModelArtifacts {
    pub metadata: ModelMetadata,
    pub scaler: Box<dyn Scaler>,
    pub risk_model: Box<dyn Classifier>,
    pub dept_model: Box<dyn Classifier>,
}

impl std::fmt::Debug for ModelArtifacts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelArtifacts")
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

fn mismatch(message: String) -> EngineError {
    EngineError::ArtifactMismatch(message)
}

impl ModelArtifacts {
    /// Assemble from already-built parts, checking that they agree.
    pub fn new(
        metadata: ModelMetadata,
        scaler: Box<dyn Scaler>,
        risk_model: Box<dyn Classifier>,
        dept_model: Box<dyn Classifier>,
    ) -> Result<Self, EngineError> {
        let expected = features::feature_names(&metadata.symptom_keywords);
        if metadata.feature_names != expected {
            return Err(mismatch(format!(
                "feature_names do not match the layout derived from {} symptom keywords",
                metadata.symptom_keywords.len()
            )));
        }
        let width = expected.len();
        if metadata.n_features != width {
            return Err(mismatch(format!(
                "n_features is {} but the feature layout has {width} entries",
                metadata.n_features
            )));
        }
        if scaler.n_features() != width {
            return Err(mismatch(format!(
                "scaler expects {} features, layout has {width}",
                scaler.n_features()
            )));
        }

        for (name, model, classes) in [
            ("risk", &risk_model, &metadata.risk_classes),
            ("department", &dept_model, &metadata.dept_classes),
        ] {
            if model.n_features() != width {
                return Err(mismatch(format!(
                    "{name} model expects {} features, layout has {width}",
                    model.n_features()
                )));
            }
            if model.classes() != classes.as_slice() {
                return Err(mismatch(format!(
                    "{name} model classes {:?} differ from metadata {classes:?}",
                    model.classes()
                )));
            }
        }

        for label in &metadata.risk_classes {
            label
                .parse::<RiskLevel>()
                .map_err(|e| mismatch(e.to_string()))?;
        }
        for label in &metadata.dept_classes {
            label
                .parse::<Department>()
                .map_err(|e| mismatch(e.to_string()))?;
        }

        Ok(Self {
            metadata,
            scaler,
            risk_model,
            dept_model,
        })
    }

    /// Load the JSON artifacts from `dir`.
    pub fn load(dir: &Path) -> Result<Self, EngineError> {
        let metadata: ModelMetadata = read_artifact(&dir.join(METADATA_FILE))?;
        let scaler: StandardScaler = read_artifact(&dir.join(SCALER_FILE))?;
        if scaler.mean.len() != scaler.scale.len() {
            return Err(mismatch(format!(
                "scaler has {} means but {} scales",
                scaler.mean.len(),
                scaler.scale.len()
            )));
        }

        let risk_model = read_model(&dir.join(RISK_MODEL_FILE))?;
        let dept_model = read_model(&dir.join(DEPT_MODEL_FILE))?;

        let artifacts = Self::new(
            metadata,
            Box::new(scaler),
            Box::new(risk_model),
            Box::new(dept_model),
        )?;
        info!(
            dir = %dir.display(),
            n_features = artifacts.metadata.n_features,
            risk_classes = artifacts.metadata.risk_classes.len(),
            dept_classes = artifacts.metadata.dept_classes.len(),
            "model artifacts loaded"
        );
        Ok(artifacts)
    }
}

fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T, EngineError> {
    let contents = fs::read_to_string(path).map_err(|source| EngineError::ArtifactIo {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| EngineError::ArtifactParse {
        path: path.to_path_buf(),
        source,
    })
}

fn read_model(path: &Path) -> Result<LinearClassifier, EngineError> {
    let model: LinearClassifier = read_artifact(path)?;
    if let Some(problem) = model.shape_error() {
        return Err(mismatch(format!("{}: {problem}", path.display())));
    }
    Ok(model)
}
