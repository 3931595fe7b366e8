use proptest::prelude::*;
use triage_core::models::gender::Gender;
use triage_notes::fields::{
    extract_age, extract_blood_pressure, extract_gender, extract_heart_rate, extract_spo2,
    extract_temperature, extract_vitals,
};

#[test]
fn heart_rate_labelled_forms() {
    assert_eq!(extract_heart_rate("HR 110"), Some(110.0));
    assert_eq!(extract_heart_rate("heart rate: 72"), Some(72.0));
    assert_eq!(extract_heart_rate("Patient has HR of 110 and BP 150/90"), Some(110.0));
    assert_eq!(extract_heart_rate("Heart rate = 95 bpm"), Some(95.0));
}

#[test]
fn out_of_range_heart_rate_falls_through_to_next_pattern() {
    assert_eq!(extract_heart_rate("pulse 250"), None);
    assert_eq!(extract_heart_rate("HR 250 on arrival, now 88 bpm"), Some(88.0));
}

#[test]
fn non_ascii_digits_are_a_soft_miss() {
    assert_eq!(extract_heart_rate("HR ١٢٠"), None);
}

#[test]
fn blood_pressure_is_atomic() {
    assert_eq!(extract_blood_pressure("BP 160/95"), Some((160.0, 95.0)));
    assert_eq!(extract_blood_pressure("BP 120/130"), None);
    assert_eq!(extract_blood_pressure("BP 300/90"), None);

    let vitals = extract_vitals("BP 120/130");
    assert_eq!(vitals.systolic_bp, None);
    assert_eq!(vitals.diastolic_bp, None);
}

#[test]
fn rejected_pair_tries_later_patterns() {
    assert_eq!(
        extract_blood_pressure("BP 120/130 recorded in error, repeat 118/76 mmHg"),
        Some((118.0, 76.0))
    );
}

#[test]
fn temperature_celsius_and_fahrenheit() {
    assert_eq!(extract_temperature("Temp 38.5C"), Some(38.5));
    assert_eq!(extract_temperature("Temp 101.3"), Some(38.5));
    assert_eq!(extract_temperature("temperature 98.6F"), Some(37.0));
    assert_eq!(extract_temperature("Temperature = 37.2°C"), Some(37.2));
}

#[test]
fn temperature_outside_both_scales_is_dropped() {
    assert_eq!(extract_temperature("Temp 45"), None);
    assert_eq!(extract_temperature("Temp 110"), None);
}

#[test]
fn spo2_forms() {
    assert_eq!(extract_spo2("SpO2 92%"), Some(92.0));
    assert_eq!(extract_spo2("O2 sat = 98%"), Some(98.0));
    assert_eq!(extract_spo2("oxygen saturation: 88"), Some(88.0));
    assert_eq!(extract_spo2("SpO2 65%"), None);
}

#[test]
fn age_surface_forms() {
    assert_eq!(extract_age("65yo Male"), Some(65));
    assert_eq!(extract_age("40 y/o F"), Some(40));
    assert_eq!(extract_age("a 30 year old"), Some(30));
    assert_eq!(extract_age("Age: 45"), Some(45));
    assert_eq!(extract_age("72-year-old male"), Some(72));
    assert_eq!(extract_age("130 years"), None);
}

#[test]
fn gender_tokens() {
    assert_eq!(extract_gender("65yo Male"), Some(Gender::Male));
    assert_eq!(extract_gender("elderly woman"), Some(Gender::Female));
    assert_eq!(extract_gender("a female patient"), Some(Gender::Female));
    assert_eq!(extract_gender("40 y/o F"), Some(Gender::Female));
    assert_eq!(extract_gender("transgender patient"), None);
}

#[test]
fn fahrenheit_unit_is_not_a_gender() {
    let note = "HR 88, BP 130/80, Temp 101.3 °F, SpO2 97%";
    assert_eq!(extract_gender(note), None);
    assert_eq!(extract_temperature(note), Some(38.5));
    assert_eq!(extract_gender("Temp 101.3 F"), None);
    assert_eq!(extract_gender("Temp 101.3 F. 40 y/o F"), Some(Gender::Female));
    assert_eq!(extract_gender("Sex: M"), Some(Gender::Male));
}

proptest! {
    #[test]
    fn heart_rate_in_bounds_is_returned_exactly(hr in 30u32..=200) {
        prop_assert_eq!(extract_heart_rate(&format!("HR {hr}")), Some(f64::from(hr)));
        prop_assert_eq!(extract_heart_rate(&format!("{hr} bpm")), Some(f64::from(hr)));
    }

    #[test]
    fn heart_rate_out_of_bounds_is_absent(hr in prop_oneof![10u32..30, 201u32..1000]) {
        prop_assert_eq!(extract_heart_rate(&format!("HR {hr}")), None);
    }
}
