//! Extraction completeness over the six-slot checklist.

use triage_core::models::extraction::ChecklistField;
use triage_core::models::vitals::{Demographics, VitalBundle};

#[derive(Debug, Clone, PartialEq)]
pub struct Completeness {
    /// Satisfied slots over six, in `[0, 1]`.
    pub confidence: f64,
    /// Unsatisfied slots in checklist order.
    pub missing_fields: Vec<ChecklistField>,
}

pub fn is_satisfied(field: ChecklistField, demographics: &Demographics, vitals: &VitalBundle) -> bool {
    match field {
        ChecklistField::Age => demographics.age.is_some(),
        ChecklistField::Gender => demographics.gender.is_some(),
        ChecklistField::HeartRate => vitals.heart_rate.is_some(),
        ChecklistField::BloodPressure => vitals.has_blood_pressure(),
        ChecklistField::Temperature => vitals.temperature_celsius.is_some(),
        ChecklistField::Spo2 => vitals.oxygen_saturation.is_some(),
    }
}

pub fn score(demographics: &Demographics, vitals: &VitalBundle) -> Completeness {
    let missing_fields: Vec<_> = ChecklistField::ALL
        .into_iter()
        .filter(|field| !is_satisfied(*field, demographics, vitals))
        .collect();
    let total = ChecklistField::ALL.len();
    let satisfied = total - missing_fields.len();

    Completeness {
        confidence: satisfied as f64 / total as f64,
        missing_fields,
    }
}
