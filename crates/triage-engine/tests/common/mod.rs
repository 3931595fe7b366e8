#![allow(dead_code)]

use std::fs;
use std::path::Path;

use serde_json::json;
use triage_core::models::gender::Gender;
use triage_core::models::patient::{PatientInput, VitalSigns};
use triage_engine::features::feature_names;

pub const RISK_CLASSES: [&str; 3] = ["High", "Low", "Medium"];

pub const DEPT_CLASSES: [&str; 8] = [
    "Cardiology",
    "Emergency",
    "Endocrinology",
    "General Medicine",
    "Neurology",
    "Orthopedics",
    "Respiratory",
    "Surgery",
];

pub fn keywords() -> Vec<String> {
    vec!["chest pain".to_string(), "fever".to_string()]
}

/// A stable adult with unremarkable vitals.
pub fn stable_patient() -> PatientInput {
    PatientInput {
        age: 40,
        gender: Gender::Female,
        vitals: VitalSigns {
            heart_rate: 80.0,
            systolic_bp: 120.0,
            diastolic_bp: 80.0,
            temperature_celsius: 37.0,
            oxygen_saturation: 98.0,
        },
        symptoms: "mild headache".to_string(),
        medical_history: "None".to_string(),
    }
}

fn zero_rows(rows: usize, width: usize) -> Vec<Vec<f64>> {
    vec![vec![0.0; width]; rows]
}

/// Writes a consistent artifact set whose models ignore the features and
/// always favour `Low` risk and `General Medicine`.
pub fn write_artifacts(dir: &Path) {
    let keywords = keywords();
    let names = feature_names(&keywords);
    let width = names.len();

    let metadata = json!({
        "feature_names": names,
        "symptom_keywords": keywords,
        "n_features": width,
        "risk_classes": RISK_CLASSES,
        "dept_classes": DEPT_CLASSES,
    });
    let scaler = json!({
        "mean": vec![0.0; width],
        "scale": vec![1.0; width],
    });
    let risk = json!({
        "classes": RISK_CLASSES,
        "coefficients": zero_rows(3, width),
        "intercepts": [0.0, 2.0, 0.0],
    });
    let mut dept_intercepts = vec![0.0; 8];
    dept_intercepts[3] = 3.0;
    let dept = json!({
        "classes": DEPT_CLASSES,
        "coefficients": zero_rows(8, width),
        "intercepts": dept_intercepts,
    });

    for (file, value) in [
        ("metadata.json", metadata),
        ("scaler.json", scaler),
        ("risk_model.json", risk),
        ("dept_model.json", dept),
    ] {
        fs::write(dir.join(file), value.to_string()).unwrap();
    }
}
