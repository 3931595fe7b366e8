use std::path::PathBuf;

use thiserror::Error;
use triage_core::error::CoreError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid patient input: {0}")]
    InvalidInput(#[from] CoreError),

    #[error("failed to read model artifact {}: {source}", path.display())]
    ArtifactIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model artifact {}: {source}", path.display())]
    ArtifactParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("inconsistent model artifacts: {0}")]
    ArtifactMismatch(String),

    #[error("prediction failed: {0}")]
    Prediction(String),
}
