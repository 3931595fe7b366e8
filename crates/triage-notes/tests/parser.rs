use proptest::prelude::*;
use triage_core::models::extraction::{ChecklistField, NO_SYMPTOMS_SENTINEL};
use triage_core::models::gender::Gender;
use triage_notes::ClinicalNoteParser;

const COMPLETE_NOTE: &str = "65yo Male with HR 110, BP 160/95, Temp 38.5C, SpO2 92%. \
History of HTN and DM. Presenting with chest pain.";

/// One fragment per checklist slot, in checklist order.
const FRAGMENTS: [&str; 6] = [
    "45 y/o",
    "female",
    "HR 88",
    "BP 130/85",
    "Temp 37.2C",
    "SpO2 97%",
];

fn note_from_mask(mask: u8) -> String {
    FRAGMENTS
        .iter()
        .enumerate()
        .filter(|(i, _)| mask & (1 << i) != 0)
        .map(|(_, f)| *f)
        .collect::<Vec<_>>()
        .join(", ")
}

#[test]
fn complete_note_extracts_every_field() {
    let result = ClinicalNoteParser::new().parse(COMPLETE_NOTE);

    assert_eq!(result.demographics.age, Some(65));
    assert_eq!(result.demographics.gender, Some(Gender::Male));
    assert_eq!(result.vitals.heart_rate, Some(110.0));
    assert_eq!(result.vitals.systolic_bp, Some(160.0));
    assert_eq!(result.vitals.diastolic_bp, Some(95.0));
    assert_eq!(result.vitals.temperature_celsius, Some(38.5));
    assert_eq!(result.vitals.oxygen_saturation, Some(92.0));
    assert!(result.medical_history.contains("Hypertension"));
    assert!(result.medical_history.contains("Diabetes"));
    assert!(result.symptoms.to_string().contains("chest pain"));
    assert_eq!(result.confidence, 1.0);
    assert!(result.missing_fields.is_empty());
    assert!(result.is_complete());
}

#[test]
fn lone_spo2_scores_one_sixth() {
    let result = ClinicalNoteParser::new().parse("SpO2 85% on room air.");

    assert_eq!(result.vitals.oxygen_saturation, Some(85.0));
    assert_eq!(result.confidence, 1.0 / 6.0);
    assert_eq!(
        result.missing_fields,
        vec![
            ChecklistField::Age,
            ChecklistField::Gender,
            ChecklistField::HeartRate,
            ChecklistField::BloodPressure,
            ChecklistField::Temperature,
        ]
    );
}

#[test]
fn empty_note_degrades_to_sentinel_record() {
    let result = ClinicalNoteParser::new().parse("");

    assert_eq!(result.confidence, 0.0);
    assert_eq!(result.missing_fields, ChecklistField::ALL.to_vec());
    assert_eq!(result.symptoms.to_string(), NO_SYMPTOMS_SENTINEL);
    assert_eq!(result.medical_history.to_string(), "None");
}

#[test]
fn fahrenheit_note_leaves_gender_missing() {
    let parsed = ClinicalNoteParser::new().parse("HR 88, BP 130/80, Temp 101.3 °F, SpO2 97%");
    assert_eq!(parsed.demographics.gender, None);
    assert_eq!(
        parsed.missing_fields,
        vec![ChecklistField::Age, ChecklistField::Gender]
    );
    assert!((parsed.confidence - 4.0 / 6.0).abs() < 1e-9);
}

#[test]
fn alternative_formats() {
    let note = "Patient vitals: Heart rate = 95 bpm, Blood pressure = 130/85 mmHg, \
                O2 sat = 98%, Temperature = 37.2°C";
    let result = ClinicalNoteParser::new().parse(note);

    assert_eq!(result.vitals.heart_rate, Some(95.0));
    assert_eq!(result.vitals.systolic_bp, Some(130.0));
    assert_eq!(result.vitals.diastolic_bp, Some(85.0));
    assert_eq!(result.vitals.oxygen_saturation, Some(98.0));
    assert_eq!(result.vitals.temperature_celsius, Some(37.2));
    assert_eq!(
        result.missing_fields,
        vec![ChecklistField::Age, ChecklistField::Gender]
    );
}

#[test]
fn stroke_presentation() {
    let note = "72-year-old male presenting with sudden onset facial drooping and slurred \
                speech. BP 165/98, HR 82, SpO2 96%, Temp 37.1C. Known history of \
                hypertension and atrial fibrillation.";
    let result = ClinicalNoteParser::new().parse(note);

    assert_eq!(result.demographics.age, Some(72));
    assert_eq!(result.vitals.systolic_bp, Some(165.0));
    assert!(result.medical_history.contains("Hypertension"));
    assert!(result.medical_history.contains("Atrial Fibrillation"));
    let symptoms = result.symptoms.to_string();
    assert!(symptoms.contains("facial drooping"));
    assert!(symptoms.contains("slurred speech"));
}

#[test]
fn serialized_shape_uses_strings_for_lists() {
    let result = ClinicalNoteParser::new().parse(COMPLETE_NOTE);
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["age"], 65);
    assert_eq!(json["gender"], "Male");
    assert_eq!(json["vitals"]["systolic_bp"], 160.0);
    assert_eq!(
        json["medical_history"],
        "Hypertension, Diabetes, Htn And Dm"
    );
    assert_eq!(json["missing_fields"], serde_json::json!([]));
}

proptest! {
    #[test]
    fn confidence_counts_present_slots(mask in 0u8..64) {
        let result = ClinicalNoteParser::new().parse(&note_from_mask(mask));
        let expected = f64::from(mask.count_ones()) / 6.0;
        prop_assert_eq!(result.confidence, expected);
    }

    #[test]
    fn adding_a_field_never_lowers_confidence(mask in 0u8..64, extra in 0usize..6) {
        let parser = ClinicalNoteParser::new();
        let before = parser.parse(&note_from_mask(mask)).confidence;
        let after = parser.parse(&note_from_mask(mask | (1 << extra))).confidence;
        prop_assert!(after >= before);
    }

    #[test]
    fn parsing_is_idempotent(note in ".{0,200}") {
        let parser = ClinicalNoteParser::new();
        let first = parser.parse(&note);
        let second = parser.parse(&note);
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}

#[test]
fn all_fragments_give_full_confidence() {
    let result = ClinicalNoteParser::new().parse(&note_from_mask(0b11_1111));
    assert_eq!(result.confidence, 1.0);
}
