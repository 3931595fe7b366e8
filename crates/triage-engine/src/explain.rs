//! Rule-based explanation of a verdict.
//!
//! Factors come from fixed clinical checks on the input, not from the
//! model's internals, so the same list is produced on the override and the
//! ML path.

use triage_core::models::patient::PatientInput;

pub const MAX_FACTORS: usize = 5;

const CRITICAL_SYMPTOMS: [(&str, &str); 6] = [
    ("chest pain", "Chest pain reported"),
    ("shortness of breath", "Shortness of breath"),
    ("confusion", "Altered mental status"),
    ("drooping", "Neurological symptoms (facial drooping)"),
    ("slurred speech", "Speech difficulties"),
    ("severe pain", "Severe pain reported"),
];

/// Contributing factors in check order: vitals, critical symptoms,
/// pre-existing conditions, age extremes. At most [`MAX_FACTORS`].
pub fn top_factors(patient: &PatientInput) -> Vec<String> {
    let v = &patient.vitals;
    let mut factors = Vec::new();

    if v.oxygen_saturation < 94.0 {
        factors.push(format!(
            "Low oxygen saturation (SpO2: {:.0}%)",
            v.oxygen_saturation
        ));
    }
    if v.systolic_bp > 140.0 || v.systolic_bp < 100.0 {
        factors.push(format!(
            "Abnormal blood pressure (BP: {:.0}/{:.0} mmHg)",
            v.systolic_bp, v.diastolic_bp
        ));
    }
    if v.heart_rate > 100.0 || v.heart_rate < 60.0 {
        factors.push(format!("Abnormal heart rate (HR: {:.0} bpm)", v.heart_rate));
    }
    if v.temperature_celsius > 38.0 {
        factors.push(format!(
            "Elevated temperature ({:.1}°C)",
            v.temperature_celsius
        ));
    }

    let symptoms = patient.symptoms.to_lowercase();
    factors.extend(
        CRITICAL_SYMPTOMS
            .iter()
            .filter(|(keyword, _)| symptoms.contains(keyword))
            .map(|(_, description)| description.to_string()),
    );

    let history = patient.medical_history.to_lowercase();
    if history.contains("hypertension") || history.contains("diabetes") {
        factors.push(format!(
            "Pre-existing conditions: {}",
            patient.medical_history
        ));
    }

    if patient.age > 65 {
        factors.push(format!("Advanced age ({} years)", patient.age));
    } else if patient.age < 5 {
        factors.push(format!("Pediatric patient ({} years)", patient.age));
    }

    factors.truncate(MAX_FACTORS);
    factors
}
