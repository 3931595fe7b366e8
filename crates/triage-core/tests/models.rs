use triage_core::error::CoreError;
use triage_core::models::extraction::{
    ChecklistField, ConditionSet, ExtractionResult, NO_SYMPTOMS_SENTINEL, SymptomNarrative,
};
use triage_core::models::gender::Gender;
use triage_core::models::patient::{ManualEntry, PatientInput, VitalSigns};
use triage_core::models::verdict::{Department, RiskLevel};
use triage_core::models::vitals::{Demographics, VitalBundle};

fn stable_patient() -> PatientInput {
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

fn empty_extraction() -> ExtractionResult {
    ExtractionResult {
        demographics: Demographics::default(),
        vitals: VitalBundle::default(),
        medical_history: ConditionSet::new(),
        symptoms: SymptomNarrative::new(),
        confidence: 0.0,
        missing_fields: ChecklistField::ALL.to_vec(),
    }
}

#[test]
fn condition_set_dedups_case_insensitively_and_caps_at_five() {
    let mut set = ConditionSet::new();
    assert!(set.insert("Hypertension"));
    assert!(!set.insert("hypertension"));
    for label in ["Diabetes", "Asthma", "Copd", "Stroke", "Cancer"] {
        set.insert(label);
    }
    assert_eq!(set.len(), 5);
    assert!(!set.contains("Cancer"));
    assert_eq!(
        set.to_string(),
        "Hypertension, Diabetes, Asthma, Copd, Stroke"
    );
}

#[test]
fn dedup_folds_non_ascii_case() {
    let mut conditions = ConditionSet::new();
    assert!(conditions.insert("Ödem"));
    assert!(!conditions.insert("ÖDEM"));
    assert_eq!(conditions.len(), 1);

    let mut narrative = SymptomNarrative::new();
    assert!(narrative.insert("übelkeit"));
    assert!(!narrative.insert("Übelkeit"));
    assert_eq!(narrative.entries(), ["übelkeit"]);
}

#[test]
fn empty_condition_set_serializes_as_none() {
    let set = ConditionSet::new();
    assert_eq!(serde_json::to_string(&set).unwrap(), "\"None\"");
    let parsed: ConditionSet = serde_json::from_str("\"None\"").unwrap();
    assert!(parsed.is_empty());
}

#[test]
fn empty_narrative_uses_sentinel() {
    let narrative = SymptomNarrative::new();
    assert_eq!(narrative.to_string(), NO_SYMPTOMS_SENTINEL);

    let mut narrative = SymptomNarrative::new();
    narrative.insert("chest pain");
    narrative.insert("Chest Pain");
    narrative.insert("nausea");
    assert_eq!(narrative.to_string(), "chest pain, nausea");
}

#[test]
fn valid_patient_passes() {
    assert!(stable_patient().validate().is_ok());
}

#[test]
fn diastolic_not_below_systolic_is_rejected() {
    let mut patient = stable_patient();
    patient.vitals.diastolic_bp = 120.0;
    let errors = patient.validation_errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "diastolic_bp");
    assert_eq!(errors[0].constraint, "diastolic_bp < systolic_bp");
}

#[test]
fn out_of_range_vitals_name_each_field() {
    let mut patient = stable_patient();
    patient.vitals.heart_rate = 250.0;
    patient.vitals.oxygen_saturation = 60.0;
    patient.age = 130;

    match patient.validate() {
        Err(CoreError::Validation(errors)) => {
            assert_eq!(errors.fields(), vec!["age", "heart_rate", "oxygen_saturation"]);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn overlong_symptoms_are_rejected() {
    let mut patient = stable_patient();
    patient.symptoms = "a".repeat(1001);
    let errors = patient.validation_errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "symptoms");
}

#[test]
fn patient_input_accepts_short_vital_names() {
    let json = r#"{
        "age": 65,
        "gender": "Male",
        "vitals": {"heart_rate": 110, "sbp": 160, "dbp": 95, "temp_c": 38.5, "spo2": 92},
        "symptoms": "Chest pain"
    }"#;
    let patient: PatientInput = serde_json::from_str(json).unwrap();
    assert_eq!(patient.vitals.systolic_bp, 160.0);
    assert_eq!(patient.vitals.oxygen_saturation, 92.0);
    assert_eq!(patient.medical_history, "None");
}

#[test]
fn derived_pressures() {
    let vitals = stable_patient().vitals;
    assert_eq!(vitals.pulse_pressure(), 40.0);
    assert!((vitals.mean_arterial_pressure() - 93.333).abs() < 0.001);
}

#[test]
fn promote_reports_missing_fields_in_checklist_order() {
    let mut extraction = empty_extraction();
    extraction.vitals.oxygen_saturation = Some(85.0);
    extraction.vitals.systolic_bp = Some(150.0);

    match extraction.promote(&ManualEntry::default()) {
        Err(CoreError::MissingFields(fields)) => assert_eq!(
            fields,
            vec![
                ChecklistField::Age,
                ChecklistField::Gender,
                ChecklistField::HeartRate,
                ChecklistField::BloodPressure,
                ChecklistField::Temperature,
            ]
        ),
        other => panic!("expected missing fields, got {other:?}"),
    }
}

#[test]
fn promote_prefers_manual_values() {
    let mut extraction = empty_extraction();
    extraction.demographics.age = Some(30);
    extraction.vitals.heart_rate = Some(90.0);

    let manual = ManualEntry {
        age: Some(31),
        gender: Some(Gender::Other),
        systolic_bp: Some(130.0),
        diastolic_bp: Some(85.0),
        temperature_celsius: Some(37.2),
        oxygen_saturation: Some(97.0),
        ..ManualEntry::default()
    };
    let input = extraction.promote(&manual).unwrap();
    assert_eq!(input.age, 31);
    assert_eq!(input.gender, Gender::Other);
    assert_eq!(input.vitals.heart_rate, 90.0);
    assert_eq!(input.symptoms, NO_SYMPTOMS_SENTINEL);
    assert_eq!(input.medical_history, "None");
}

#[test]
fn promote_still_validates() {
    let extraction = empty_extraction();
    let manual = ManualEntry {
        age: Some(50),
        gender: Some(Gender::Male),
        heart_rate: Some(80.0),
        systolic_bp: Some(90.0),
        diastolic_bp: Some(95.0),
        temperature_celsius: Some(37.0),
        oxygen_saturation: Some(98.0),
        ..ManualEntry::default()
    };
    assert!(matches!(
        extraction.promote(&manual),
        Err(CoreError::Validation(_))
    ));
}

#[test]
fn labels_parse_case_insensitively() {
    assert_eq!("others".parse::<Gender>().unwrap(), Gender::Other);
    assert_eq!("HIGH".parse::<RiskLevel>().unwrap(), RiskLevel::High);
    assert_eq!(
        "general medicine".parse::<Department>().unwrap(),
        Department::GeneralMedicine
    );
    assert!(matches!(
        "Dermatology".parse::<Department>(),
        Err(CoreError::UnknownDepartment(_))
    ));
}
