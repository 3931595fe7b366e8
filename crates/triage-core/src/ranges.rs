//! Physiological validity intervals.
//!
//! The same bounds serve two purposes: the note extractor treats a value
//! outside its interval as a non-match, while [`PatientInput`] validation
//! treats it as a hard error.
//!
//! [`PatientInput`]: crate::models::patient::PatientInput

use serde::{Deserialize, Serialize};

/// A closed interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysiologicalRange {
    pub min: f64,
    pub max: f64,
}

impl PhysiologicalRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// NaN is never contained.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Beats per minute.
pub const HEART_RATE: PhysiologicalRange = PhysiologicalRange::new(30.0, 200.0);

/// mmHg.
pub const SYSTOLIC_BP: PhysiologicalRange = PhysiologicalRange::new(60.0, 250.0);

/// mmHg.
pub const DIASTOLIC_BP: PhysiologicalRange = PhysiologicalRange::new(40.0, 150.0);

pub const TEMPERATURE_CELSIUS: PhysiologicalRange = PhysiologicalRange::new(35.0, 42.0);

/// Only used to recognise Fahrenheit readings before conversion.
pub const TEMPERATURE_FAHRENHEIT: PhysiologicalRange = PhysiologicalRange::new(95.0, 107.0);

/// Percent.
pub const OXYGEN_SATURATION: PhysiologicalRange = PhysiologicalRange::new(70.0, 100.0);

/// Years.
pub const AGE: PhysiologicalRange = PhysiologicalRange::new(0.0, 120.0);

pub const SYMPTOMS_MAX_CHARS: usize = 1000;

pub const MEDICAL_HISTORY_MAX_CHARS: usize = 500;

/// Convert a Fahrenheit reading to Celsius, rounded to one decimal.
pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    let celsius = (fahrenheit - 32.0) * 5.0 / 9.0;
    (celsius * 10.0).round() / 10.0
}
