//! Feature engineering for the risk and department classifiers.
//!
//! The vector layout is fixed by how the models were trained: 13 base
//! features followed by one flag per symptom keyword, in the keyword order
//! recorded in the model metadata. Keyword and history tests are plain
//! lowercase substring checks because that is what training used.

use triage_core::models::gender::Gender;
use triage_core::models::patient::PatientInput;

pub const BASE_FEATURE_NAMES: [&str; 13] = [
    "age",
    "gender_male",
    "heart_rate",
    "sbp",
    "dbp",
    "temp_c",
    "spo2",
    "pulse_pressure",
    "map",
    "history_hypertension",
    "history_diabetes",
    "history_cardiac",
    "history_respiratory",
];

const CARDIAC_TERMS: [&str; 3] = ["cardiac", "heart", "mi"];
const RESPIRATORY_TERMS: [&str; 3] = ["copd", "asthma", "respiratory"];

/// Full feature-name layout for a symptom keyword list.
pub fn feature_names(symptom_keywords: &[String]) -> Vec<String> {
    BASE_FEATURE_NAMES
        .iter()
        .map(|name| name.to_string())
        .chain(
            symptom_keywords
                .iter()
                .map(|kw| format!("symptom_{}", kw.replace(' ', "_"))),
        )
        .collect()
}

fn flag(present: bool) -> f64 {
    if present { 1.0 } else { 0.0 }
}

pub fn symptom_flags(symptoms: &str, symptom_keywords: &[String]) -> Vec<f64> {
    let symptoms = symptoms.to_lowercase();
    symptom_keywords
        .iter()
        .map(|kw| flag(symptoms.contains(kw.as_str())))
        .collect()
}

pub fn engineer_features(patient: &PatientInput, symptom_keywords: &[String]) -> Vec<f64> {
    let v = &patient.vitals;
    let history = patient.medical_history.to_lowercase();

    let mut features = vec![
        f64::from(patient.age),
        flag(patient.gender == Gender::Male),
        v.heart_rate,
        v.systolic_bp,
        v.diastolic_bp,
        v.temperature_celsius,
        v.oxygen_saturation,
        v.pulse_pressure(),
        v.mean_arterial_pressure(),
        flag(history.contains("hypertension")),
        flag(history.contains("diabetes")),
        flag(CARDIAC_TERMS.iter().any(|t| history.contains(t))),
        flag(RESPIRATORY_TERMS.iter().any(|t| history.contains(t))),
    ];
    features.extend(symptom_flags(&patient.symptoms, symptom_keywords));
    features
}
