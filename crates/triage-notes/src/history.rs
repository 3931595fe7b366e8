//! Medical history detection.

use tracing::debug;
use triage_core::models::extraction::ConditionSet;

use crate::lexicon::{CONDITION_MATCHERS, CONDITION_PHRASES};
use crate::text::title_case;

/// Captured phrases this long or longer are treated as run-on noise.
pub const MAX_PHRASE_CHARS: usize = 50;

/// Conditions named in the note, lexicon hits first, then introduced
/// phrases ("history of …", "h/o …", "PMH: …") in pattern order.
pub fn extract_medical_history(text: &str) -> ConditionSet {
    let mut conditions = ConditionSet::new();

    for (label, matcher) in CONDITION_MATCHERS.iter() {
        if matcher.is_match(text) {
            conditions.insert(title_case(label));
        }
    }

    for pattern in CONDITION_PHRASES.iter() {
        for caps in pattern.captures_iter(text) {
            let span = &caps[1];
            if span.chars().count() >= MAX_PHRASE_CHARS {
                debug!(len = span.len(), "skipping overlong history phrase");
                continue;
            }
            conditions.insert(title_case(span.trim()));
        }
    }

    conditions
}
