//! Field extractor: vitals and demographics from raw note text.
//!
//! Every function here is a pure function of its input and returns `None`
//! (or an empty field) rather than an error.

use triage_core::models::gender::Gender;
use triage_core::models::vitals::{Demographics, VitalBundle};

use crate::patterns;

pub fn extract_heart_rate(text: &str) -> Option<f64> {
    patterns::HEART_RATE.extract(text)
}

/// `(systolic, diastolic)`, accepted only as a valid pair.
pub fn extract_blood_pressure(text: &str) -> Option<(f64, f64)> {
    patterns::BLOOD_PRESSURE.extract(text)
}

/// Degrees Celsius, converted from Fahrenheit when needed.
pub fn extract_temperature(text: &str) -> Option<f64> {
    patterns::TEMPERATURE.extract(text)
}

pub fn extract_spo2(text: &str) -> Option<f64> {
    patterns::SPO2.extract(text)
}

pub fn extract_age(text: &str) -> Option<u32> {
    patterns::AGE.extract(text)
}

pub fn extract_gender(text: &str) -> Option<Gender> {
    patterns::GENDER.extract(text)
}

pub fn extract_vitals(text: &str) -> VitalBundle {
    let (systolic_bp, diastolic_bp) = match extract_blood_pressure(text) {
        Some((systolic, diastolic)) => (Some(systolic), Some(diastolic)),
        None => (None, None),
    };
    VitalBundle {
        heart_rate: extract_heart_rate(text),
        systolic_bp,
        diastolic_bp,
        temperature_celsius: extract_temperature(text),
        oxygen_saturation: extract_spo2(text),
    }
}

pub fn extract_demographics(text: &str) -> Demographics {
    Demographics {
        age: extract_age(text),
        gender: extract_gender(text),
    }
}
