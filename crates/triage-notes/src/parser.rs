//! Clinical note parser: the single entry point that composes field
//! extraction, history and symptom detection, and completeness scoring.

use tracing::{debug, info};
use triage_core::models::extraction::ExtractionResult;

use crate::completeness;
use crate::fields::{extract_demographics, extract_vitals};
use crate::history::extract_medical_history;
use crate::symptoms::extract_symptoms;
use crate::{lexicon, patterns};

/// Stateless parser over the shared, read-only pattern tables.
///
/// Construct it once at startup: [`ClinicalNoteParser::new`] compiles every
/// table, after which parsing is safe to call concurrently from any number
/// of threads.
#[derive(Debug, Clone, Copy)]
pub struct ClinicalNoteParser {
    _private: (),
}

impl ClinicalNoteParser {
    pub fn new() -> Self {
        patterns::initialize();
        lexicon::initialize();
        Self { _private: () }
    }

    /// Parse a note into structured fields. Never fails: the worst case is
    /// a record with every field empty, the symptom sentinel, and
    /// confidence 0.0.
    pub fn parse(&self, text: &str) -> ExtractionResult {
        debug!(len = text.len(), "parsing clinical note");

        let vitals = extract_vitals(text);
        let demographics = extract_demographics(text);
        let medical_history = extract_medical_history(text);
        let symptoms = extract_symptoms(text);
        let completeness = completeness::score(&demographics, &vitals);

        info!(
            confidence = completeness.confidence,
            missing = completeness.missing_fields.len(),
            conditions = medical_history.len(),
            "clinical note parsed"
        );

        ExtractionResult {
            demographics,
            vitals,
            medical_history,
            symptoms,
            confidence: completeness.confidence,
            missing_fields: completeness.missing_fields,
        }
    }
}

impl Default for ClinicalNoteParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a note with a fresh parser.
pub fn parse_clinical_note(text: &str) -> ExtractionResult {
    ClinicalNoteParser::new().parse(text)
}
