//! Symptom narrative extraction.

use tracing::debug;
use triage_core::models::extraction::SymptomNarrative;

use crate::lexicon::{SYMPTOM_MATCHERS, SYMPTOM_PHRASES};

/// Captured complaints this long or longer are dropped.
pub const MAX_COMPLAINT_CHARS: usize = 200;

/// Keyword hits in lexicon order, followed by the first span captured by
/// each chief-complaint phrase. Entries are lowercased so a complaint that
/// repeats a keyword collapses into it.
pub fn extract_symptoms(text: &str) -> SymptomNarrative {
    let mut narrative = SymptomNarrative::new();

    for (keyword, matcher) in SYMPTOM_MATCHERS.iter() {
        if matcher.is_match(text) {
            narrative.insert(*keyword);
        }
    }

    for pattern in SYMPTOM_PHRASES.iter() {
        let Some(caps) = pattern.captures(text) else {
            continue;
        };
        let complaint = caps[1].trim().to_lowercase();
        if complaint.chars().count() >= MAX_COMPLAINT_CHARS {
            debug!(len = complaint.len(), "skipping overlong complaint");
            continue;
        }
        narrative.insert(complaint);
    }

    narrative
}
