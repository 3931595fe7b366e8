//! Batch validation of the parser against a labelled golden dataset.
//!
//! Each record pairs a clinical note with the values a clinician entered
//! for it. Evaluation parses every note and counts, per field, how often
//! the extracted value agrees with the label.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;
use triage_core::models::extraction::{ChecklistField, ExtractionResult};
use triage_core::models::gender::Gender;

use crate::error::NotesError;
use crate::parser::ClinicalNoteParser;

/// Tolerance for heart rate, both pressures and SpO2.
const INTEGER_VITAL_TOLERANCE: f64 = 2.0;

const TEMPERATURE_TOLERANCE: f64 = 0.5;

/// One labelled note. Extra columns in the source (risk level, target
/// department, …) are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoldenRecord {
    pub patient_id: String,
    pub clinical_note: String,
    pub age: u32,
    pub gender: Gender,
    pub heart_rate: f64,
    pub sbp: f64,
    pub dbp: f64,
    pub temp_c: f64,
    pub spo2: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoldenField {
    Age,
    Gender,
    HeartRate,
    Sbp,
    Dbp,
    TempC,
    Spo2,
}

impl GoldenField {
    pub const ALL: [GoldenField; 7] = [
        GoldenField::Age,
        GoldenField::Gender,
        GoldenField::HeartRate,
        GoldenField::Sbp,
        GoldenField::Dbp,
        GoldenField::TempC,
        GoldenField::Spo2,
    ];

    fn matches(&self, record: &GoldenRecord, parsed: &ExtractionResult) -> bool {
        let v = &parsed.vitals;
        match self {
            GoldenField::Age => parsed.demographics.age == Some(record.age),
            GoldenField::Gender => parsed.demographics.gender == Some(record.gender),
            GoldenField::HeartRate => within(v.heart_rate, record.heart_rate, INTEGER_VITAL_TOLERANCE),
            GoldenField::Sbp => within(v.systolic_bp, record.sbp, INTEGER_VITAL_TOLERANCE),
            GoldenField::Dbp => within(v.diastolic_bp, record.dbp, INTEGER_VITAL_TOLERANCE),
            GoldenField::TempC => {
                within(v.temperature_celsius, record.temp_c, TEMPERATURE_TOLERANCE)
            }
            GoldenField::Spo2 => {
                within(v.oxygen_saturation, record.spo2, INTEGER_VITAL_TOLERANCE)
            }
        }
    }
}

fn within(extracted: Option<f64>, expected: f64, tolerance: f64) -> bool {
    extracted.is_some_and(|value| (value - expected).abs() < tolerance)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordOutcome {
    pub patient_id: String,
    pub matched: Vec<GoldenField>,
    pub missing_fields: Vec<ChecklistField>,
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldTally {
    pub field: GoldenField,
    pub correct: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoldenReport {
    pub records: Vec<RecordOutcome>,
    pub field_tallies: Vec<FieldTally>,
    pub correct_fields: usize,
    pub total_fields: usize,
    /// `correct_fields / total_fields`, or 0.0 for an empty dataset.
    pub accuracy: f64,
}

/// Read records from JSON Lines, skipping blank lines.
pub fn read_jsonl(reader: impl BufRead) -> Result<Vec<GoldenRecord>, NotesError> {
    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|source| NotesError::MalformedRecord {
            line: index + 1,
            source,
        })?;
        records.push(record);
    }
    Ok(records)
}

pub fn load_jsonl(path: &Path) -> Result<Vec<GoldenRecord>, NotesError> {
    let file = File::open(path)?;
    read_jsonl(BufReader::new(file))
}

pub fn evaluate(parser: &ClinicalNoteParser, records: &[GoldenRecord]) -> GoldenReport {
    let mut field_tallies: Vec<FieldTally> = GoldenField::ALL
        .into_iter()
        .map(|field| FieldTally {
            field,
            correct: 0,
            total: 0,
        })
        .collect();
    let mut outcomes = Vec::with_capacity(records.len());

    for record in records {
        let parsed = parser.parse(&record.clinical_note);
        let mut matched = Vec::new();
        for tally in &mut field_tallies {
            tally.total += 1;
            if tally.field.matches(record, &parsed) {
                tally.correct += 1;
                matched.push(tally.field);
            }
        }
        outcomes.push(RecordOutcome {
            patient_id: record.patient_id.clone(),
            matched,
            missing_fields: parsed.missing_fields,
            confidence: parsed.confidence,
        });
    }

    let correct_fields: usize = field_tallies.iter().map(|t| t.correct).sum();
    let total_fields: usize = field_tallies.iter().map(|t| t.total).sum();
    let accuracy = if total_fields == 0 {
        0.0
    } else {
        correct_fields as f64 / total_fields as f64
    };

    info!(
        records = records.len(),
        correct_fields, total_fields, accuracy, "golden evaluation complete"
    );

    GoldenReport {
        records: outcomes,
        field_tallies,
        correct_fields,
        total_fields,
        accuracy,
    }
}
