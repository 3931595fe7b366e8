//! triage-notes
//!
//! Clinical note extraction. Turns free-text narratives into the structured
//! fields the triage pipeline needs: demographics, vitals, medical history
//! and symptoms, with a completeness score and a missing-field report.
//!
//! Extraction is best-effort throughout. A value that cannot be found, does
//! not parse, or falls outside its physiological range is simply absent
//! from the result; parsing a note never fails.

pub mod completeness;
pub mod error;
pub mod fields;
pub mod golden;
pub mod history;
pub mod lexicon;
pub mod parser;
pub mod patterns;
pub mod symptoms;
pub mod text;

pub use parser::{ClinicalNoteParser, parse_clinical_note};
