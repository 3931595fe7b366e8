use serde::{Deserialize, Serialize};

use super::extraction::NO_HISTORY;
use super::gender::Gender;
use crate::error::CoreError;
use crate::ranges::{self, PhysiologicalRange};
use crate::validation::{ValidationError, ValidationErrors};

/// Complete vitals for a triage submission. Unlike [`VitalBundle`] every
/// value is required and bounds are enforced as hard validation.
///
/// [`VitalBundle`]: super::vitals::VitalBundle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VitalSigns {
    pub heart_rate: f64,
    #[serde(alias = "sbp")]
    pub systolic_bp: f64,
    #[serde(alias = "dbp")]
    pub diastolic_bp: f64,
    #[serde(alias = "temp_c")]
    pub temperature_celsius: f64,
    #[serde(alias = "spo2")]
    pub oxygen_saturation: f64,
}

impl VitalSigns {
    pub fn pulse_pressure(&self) -> f64 {
        self.systolic_bp - self.diastolic_bp
    }

    pub fn mean_arterial_pressure(&self) -> f64 {
        self.diastolic_bp + self.pulse_pressure() / 3.0
    }
}

/// The record submitted for triage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientInput {
    pub age: u32,
    pub gender: Gender,
    pub vitals: VitalSigns,
    pub symptoms: String,
    #[serde(default = "default_history")]
    pub medical_history: String,
}

fn default_history() -> String {
    NO_HISTORY.to_string()
}

impl PatientInput {
    /// Every hard-bound violation on this input, in field order.
    pub fn validation_errors(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let v = &self.vitals;

        let checks: [(&str, f64, PhysiologicalRange); 6] = [
            ("age", f64::from(self.age), ranges::AGE),
            ("heart_rate", v.heart_rate, ranges::HEART_RATE),
            ("systolic_bp", v.systolic_bp, ranges::SYSTOLIC_BP),
            ("diastolic_bp", v.diastolic_bp, ranges::DIASTOLIC_BP),
            (
                "temperature_celsius",
                v.temperature_celsius,
                ranges::TEMPERATURE_CELSIUS,
            ),
            (
                "oxygen_saturation",
                v.oxygen_saturation,
                ranges::OXYGEN_SATURATION,
            ),
        ];
        for (field, value, range) in checks {
            if !range.contains(value) {
                errors.push(ValidationError::out_of_range(field, value, range));
            }
        }

        if v.diastolic_bp >= v.systolic_bp {
            errors.push(ValidationError::new(
                "diastolic_bp",
                "diastolic_bp < systolic_bp",
                format!(
                    "diastolic BP {} must be less than systolic BP {}",
                    v.diastolic_bp, v.systolic_bp
                ),
            ));
        }

        let text_limits = [
            ("symptoms", &self.symptoms, ranges::SYMPTOMS_MAX_CHARS),
            (
                "medical_history",
                &self.medical_history,
                ranges::MEDICAL_HISTORY_MAX_CHARS,
            ),
        ];
        for (field, text, max) in text_limits {
            let len = text.chars().count();
            if len > max {
                errors.push(ValidationError::new(
                    field,
                    format!("len({field}) <= {max}"),
                    format!("{field} is {len} characters, limit is {max}"),
                ));
            }
        }

        errors
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        let errors = self.validation_errors();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation(ValidationErrors(errors)))
        }
    }
}

/// Values entered by hand to close the gaps an extraction left open.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManualEntry {
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub heart_rate: Option<f64>,
    #[serde(alias = "sbp")]
    pub systolic_bp: Option<f64>,
    #[serde(alias = "dbp")]
    pub diastolic_bp: Option<f64>,
    #[serde(alias = "temp_c")]
    pub temperature_celsius: Option<f64>,
    #[serde(alias = "spo2")]
    pub oxygen_saturation: Option<f64>,
    pub symptoms: Option<String>,
    pub medical_history: Option<String>,
}
