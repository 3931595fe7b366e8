//! Keyword lexicons and introducer phrases for history and symptoms.
//!
//! Keywords must start on a word boundary, so short aliases such as `dm`
//! or `mi` do not fire inside unrelated words ("admitted", "vomiting").
//! A plural tail is allowed: "strokes", "seizures", "diabetics".

use std::sync::LazyLock;

use regex::Regex;

/// Condition label followed by the terms that signal it.
pub const CONDITION_SYNONYMS: &[(&str, &[&str])] = &[
    ("hypertension", &["hypertension", "htn", "high blood pressure"]),
    ("diabetes", &["diabetes", "dm", "diabetic"]),
    ("asthma", &["asthma"]),
    ("copd", &["copd", "chronic obstructive"]),
    (
        "heart disease",
        &["cad", "coronary artery", "heart disease", "mi", "myocardial infarction"],
    ),
    ("atrial fibrillation", &["afib", "atrial fibrillation", "a-fib"]),
    ("stroke", &["stroke", "cva", "cerebrovascular"]),
    ("kidney disease", &["ckd", "kidney disease", "renal"]),
    ("cancer", &["cancer", "malignancy", "carcinoma"]),
];

/// Phrases whose trailing clause names a condition.
const CONDITION_INTRODUCERS: &[&str] = &[
    r"(?i)\bhistory of ([^.,]+)",
    r"(?i)\bknown ([^.,]+)",
    r"(?i)\bdiagnosed with ([^.,]+)",
    r"(?i)\bh/o ([^.,]+)",
    r"(?i)\bpmh[:\s]+([^.,]+)",
];

pub const SYMPTOM_KEYWORDS: &[&str] = &[
    "chest pain",
    "shortness of breath",
    "dyspnea",
    "sob",
    "nausea",
    "vomiting",
    "dizziness",
    "confusion",
    "headache",
    "fever",
    "chills",
    "sweating",
    "diaphoretic",
    "weakness",
    "fatigue",
    "pain",
    "cough",
    "facial drooping",
    "slurred speech",
    "numbness",
    "palpitations",
    "syncope",
    "seizure",
];

/// Chief-complaint phrases whose trailing sentence describes symptoms.
const SYMPTOM_INTRODUCERS: &[&str] = &[
    r"(?i)\bpresenting with ([^.]+)",
    r"(?i)\bcomplains? of ([^.]+)",
    r"(?i)\breports? ([^.]+)",
    r"(?i)\bsymptoms?[:\s]+([^.]+)",
    r"(?i)\bchief complaint[:\s]+([^.]+)",
];

fn term_matcher(terms: &[&str]) -> Regex {
    let alternation = terms
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternation})(?:s|es)?\b")).unwrap()
}

pub static CONDITION_MATCHERS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    CONDITION_SYNONYMS
        .iter()
        .map(|(label, terms)| (*label, term_matcher(terms)))
        .collect()
});

pub static CONDITION_PHRASES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    CONDITION_INTRODUCERS
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect()
});

pub static SYMPTOM_MATCHERS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    SYMPTOM_KEYWORDS
        .iter()
        .map(|keyword| (*keyword, term_matcher(&[*keyword])))
        .collect()
});

pub static SYMPTOM_PHRASES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    SYMPTOM_INTRODUCERS
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect()
});

pub fn initialize() {
    LazyLock::force(&CONDITION_MATCHERS);
    LazyLock::force(&CONDITION_PHRASES);
    LazyLock::force(&SYMPTOM_MATCHERS);
    LazyLock::force(&SYMPTOM_PHRASES);
}
