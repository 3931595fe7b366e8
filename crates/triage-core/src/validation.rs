use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ranges::PhysiologicalRange;

/// A single rejected field on a submitted [`PatientInput`].
///
/// [`PatientInput`]: crate::models::patient::PatientInput
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: String,
    pub constraint: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(
        field: impl Into<String>,
        constraint: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            constraint: constraint.into(),
            message: message.into(),
        }
    }

    pub(crate) fn out_of_range(field: &str, value: f64, range: PhysiologicalRange) -> Self {
        Self::new(
            field,
            format!("{} <= {field} <= {}", range.min, range.max),
            format!(
                "{field} value {value} is outside range [{}, {}]",
                range.min, range.max
            ),
        )
    }
}

/// Every violation found on one input, in check order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    pub fn fields(&self) -> Vec<&str> {
        self.0.iter().map(|e| e.field.as_str()).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<_> = self.0.iter().map(|e| e.message.as_str()).collect();
        f.write_str(&messages.join("; "))
    }
}
