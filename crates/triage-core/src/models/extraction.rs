use std::fmt;

use serde::{Deserialize, Serialize};

use super::patient::{ManualEntry, PatientInput, VitalSigns};
use super::vitals::{Demographics, VitalBundle};
use crate::error::CoreError;

/// Most conditions kept in a [`ConditionSet`].
pub const MAX_CONDITIONS: usize = 5;

/// Most entries kept in a [`SymptomNarrative`].
pub const MAX_SYMPTOM_ENTRIES: usize = 10;

/// Emitted in place of an empty symptom narrative.
pub const NO_SYMPTOMS_SENTINEL: &str = "No specific symptoms extracted";

/// Written in place of an empty condition list.
pub const NO_HISTORY: &str = "None";

/// One slot of the extraction completeness checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistField {
    Age,
    Gender,
    HeartRate,
    BloodPressure,
    Temperature,
    Spo2,
}

impl ChecklistField {
    /// Canonical checklist order. Missing-field reports follow it.
    pub const ALL: [ChecklistField; 6] = [
        ChecklistField::Age,
        ChecklistField::Gender,
        ChecklistField::HeartRate,
        ChecklistField::BloodPressure,
        ChecklistField::Temperature,
        ChecklistField::Spo2,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChecklistField::Age => "age",
            ChecklistField::Gender => "gender",
            ChecklistField::HeartRate => "heart_rate",
            ChecklistField::BloodPressure => "blood_pressure",
            ChecklistField::Temperature => "temperature",
            ChecklistField::Spo2 => "spo2",
        }
    }
}

impl fmt::Display for ChecklistField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered, case-insensitively unique condition labels, capped at
/// [`MAX_CONDITIONS`]. Serialized as a comma-joined string, `"None"` when
/// empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct ConditionSet {
    labels: Vec<String>,
}

impl ConditionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a label unless it is blank, already present (ignoring case),
    /// or the set is full. Returns whether it was added.
    pub fn insert(&mut self, label: impl Into<String>) -> bool {
        let label: String = label.into();
        let label = label.trim();
        if label.is_empty() || self.labels.len() >= MAX_CONDITIONS || self.contains(label) {
            return false;
        }
        self.labels.push(label.to_string());
        true
    }

    pub fn contains(&self, label: &str) -> bool {
        let wanted = label.to_lowercase();
        self.labels.iter().any(|l| l.to_lowercase() == wanted)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl fmt::Display for ConditionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.labels.is_empty() {
            f.write_str(NO_HISTORY)
        } else {
            f.write_str(&self.labels.join(", "))
        }
    }
}

impl From<ConditionSet> for String {
    fn from(set: ConditionSet) -> Self {
        set.to_string()
    }
}

impl From<String> for ConditionSet {
    fn from(text: String) -> Self {
        let mut set = ConditionSet::new();
        if text.trim().eq_ignore_ascii_case(NO_HISTORY) {
            return set;
        }
        for label in text.split(',') {
            set.insert(label);
        }
        set
    }
}

/// Symptom keywords and narrative spans found in a note, capped at
/// [`MAX_SYMPTOM_ENTRIES`]. Serialized as one comma-joined string, or
/// [`NO_SYMPTOMS_SENTINEL`] when nothing was found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct SymptomNarrative {
    entries: Vec<String>,
}

impl SymptomNarrative {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same rules as [`ConditionSet::insert`], with the larger cap.
    pub fn insert(&mut self, entry: impl Into<String>) -> bool {
        let entry: String = entry.into();
        let entry = entry.trim();
        let wanted = entry.to_lowercase();
        if entry.is_empty()
            || self.entries.len() >= MAX_SYMPTOM_ENTRIES
            || self.entries.iter().any(|e| e.to_lowercase() == wanted)
        {
            return false;
        }
        self.entries.push(entry.to_string());
        true
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for SymptomNarrative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            f.write_str(NO_SYMPTOMS_SENTINEL)
        } else {
            f.write_str(&self.entries.join(", "))
        }
    }
}

impl From<SymptomNarrative> for String {
    fn from(narrative: SymptomNarrative) -> Self {
        narrative.to_string()
    }
}

impl From<String> for SymptomNarrative {
    /// The joined form is kept as a single entry so that a round trip
    /// reproduces the input string exactly.
    fn from(text: String) -> Self {
        let mut narrative = SymptomNarrative::new();
        if text.trim() != NO_SYMPTOMS_SENTINEL {
            narrative.insert(text);
        }
        narrative
    }
}

/// Structured fields recovered from one clinical note.
///
/// Built fresh per parse and never mutated afterwards. `missing_fields`
/// lists exactly the gaps a caller must close before the record can be
/// promoted to a [`PatientInput`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    #[serde(flatten)]
    pub demographics: Demographics,
    pub vitals: VitalBundle,
    pub medical_history: ConditionSet,
    pub symptoms: SymptomNarrative,
    pub confidence: f64,
    pub missing_fields: Vec<ChecklistField>,
}

impl ExtractionResult {
    pub fn is_complete(&self) -> bool {
        self.missing_fields.is_empty()
    }

    /// Assemble a validated [`PatientInput`] from this record, with values
    /// from `manual` taking precedence over extracted ones.
    ///
    /// Fails with [`CoreError::MissingFields`] if any checklist slot is
    /// still empty, or [`CoreError::Validation`] if the merged values break
    /// a hard bound.
    pub fn promote(&self, manual: &ManualEntry) -> Result<PatientInput, CoreError> {
        let age = manual.age.or(self.demographics.age);
        let gender = manual.gender.or(self.demographics.gender);
        let heart_rate = manual.heart_rate.or(self.vitals.heart_rate);
        let systolic = manual.systolic_bp.or(self.vitals.systolic_bp);
        let diastolic = manual.diastolic_bp.or(self.vitals.diastolic_bp);
        let temperature = manual
            .temperature_celsius
            .or(self.vitals.temperature_celsius);
        let spo2 = manual.oxygen_saturation.or(self.vitals.oxygen_saturation);

        let (
            Some(age),
            Some(gender),
            Some(heart_rate),
            Some(systolic_bp),
            Some(diastolic_bp),
            Some(temperature_celsius),
            Some(oxygen_saturation),
        ) = (age, gender, heart_rate, systolic, diastolic, temperature, spo2)
        else {
            let present = [
                age.is_some(),
                gender.is_some(),
                heart_rate.is_some(),
                systolic.is_some() && diastolic.is_some(),
                temperature.is_some(),
                spo2.is_some(),
            ];
            let missing = ChecklistField::ALL
                .into_iter()
                .zip(present)
                .filter(|(_, ok)| !ok)
                .map(|(field, _)| field)
                .collect();
            return Err(CoreError::MissingFields(missing));
        };

        let input = PatientInput {
            age,
            gender,
            vitals: VitalSigns {
                heart_rate,
                systolic_bp,
                diastolic_bp,
                temperature_celsius,
                oxygen_saturation,
            },
            symptoms: manual
                .symptoms
                .clone()
                .unwrap_or_else(|| self.symptoms.to_string()),
            medical_history: manual
                .medical_history
                .clone()
                .unwrap_or_else(|| self.medical_history.to_string()),
        };
        input.validate()?;
        Ok(input)
    }
}
