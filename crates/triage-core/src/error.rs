use thiserror::Error;

use crate::models::extraction::ChecklistField;
use crate::validation::ValidationErrors;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("missing required fields: {}", join_fields(.0))]
    MissingFields(Vec<ChecklistField>),

    #[error("unknown gender: {0}")]
    UnknownGender(String),

    #[error("unknown risk level: {0}")]
    UnknownRiskLevel(String),

    #[error("unknown department: {0}")]
    UnknownDepartment(String),
}

fn join_fields(fields: &[ChecklistField]) -> String {
    fields
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
