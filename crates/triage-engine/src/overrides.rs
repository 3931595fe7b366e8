//! Rule-based safety overrides.
//!
//! Hard vital thresholds are checked before any statistical prediction, in
//! a fixed priority order. The first rule that fires decides the verdict
//! and supplies the only reason reported; later rules are not evaluated
//! even if they would also fire.

use serde::{Deserialize, Serialize};
use tracing::warn;
use triage_core::models::patient::PatientInput;
use triage_core::models::verdict::{Department, RiskLevel};

/// Threshold values for the override rules. Rule order is not
/// configurable, only the cut-offs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverrideThresholds {
    /// SpO2 below this is critical.
    pub spo2_critical: f64,
    pub sbp_high: f64,
    pub sbp_low: f64,
    pub hr_high: f64,
    pub hr_low: f64,
    /// Celsius.
    pub temp_high: f64,
    /// Patients younger than this many years get the infant fever rule.
    pub infant_age: u32,
    pub infant_temp: f64,
}

impl Default for OverrideThresholds {
    fn default() -> Self {
        Self {
            spo2_critical: 90.0,
            sbp_high: 180.0,
            sbp_low: 90.0,
            hr_high: 120.0,
            hr_low: 50.0,
            temp_high: 39.5,
            infant_age: 2,
            infant_temp: 38.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverrideRule {
    CriticalSpo2,
    HypertensiveCrisis,
    SevereHypotension,
    SevereTachycardia,
    SevereBradycardia,
    HighFever,
    InfantFever,
}

impl OverrideRule {
    /// Evaluation order, highest priority first.
    pub const PRIORITY: [OverrideRule; 7] = [
        OverrideRule::CriticalSpo2,
        OverrideRule::HypertensiveCrisis,
        OverrideRule::SevereHypotension,
        OverrideRule::SevereTachycardia,
        OverrideRule::SevereBradycardia,
        OverrideRule::HighFever,
        OverrideRule::InfantFever,
    ];

    pub fn is_triggered(&self, patient: &PatientInput, t: &OverrideThresholds) -> bool {
        let v = &patient.vitals;
        match self {
            OverrideRule::CriticalSpo2 => v.oxygen_saturation < t.spo2_critical,
            OverrideRule::HypertensiveCrisis => v.systolic_bp > t.sbp_high,
            OverrideRule::SevereHypotension => v.systolic_bp < t.sbp_low,
            OverrideRule::SevereTachycardia => v.heart_rate > t.hr_high,
            OverrideRule::SevereBradycardia => v.heart_rate < t.hr_low,
            OverrideRule::HighFever => v.temperature_celsius > t.temp_high,
            OverrideRule::InfantFever => {
                patient.age < t.infant_age && v.temperature_celsius > t.infant_temp
            }
        }
    }

    pub fn department(&self) -> Department {
        match self {
            OverrideRule::SevereTachycardia | OverrideRule::SevereBradycardia => {
                Department::Cardiology
            }
            _ => Department::Emergency,
        }
    }

    pub fn reason(&self, patient: &PatientInput, t: &OverrideThresholds) -> String {
        let v = &patient.vitals;
        match self {
            OverrideRule::CriticalSpo2 => format!(
                "Critical oxygen saturation: SpO2 {:.0}% < {:.0}%",
                v.oxygen_saturation, t.spo2_critical
            ),
            OverrideRule::HypertensiveCrisis => format!(
                "Hypertensive crisis: Systolic BP {:.0} mmHg > {:.0}",
                v.systolic_bp, t.sbp_high
            ),
            OverrideRule::SevereHypotension => format!(
                "Severe hypotension: Systolic BP {:.0} mmHg < {:.0}",
                v.systolic_bp, t.sbp_low
            ),
            OverrideRule::SevereTachycardia => format!(
                "Severe tachycardia: Heart rate {:.0} bpm > {:.0}",
                v.heart_rate, t.hr_high
            ),
            OverrideRule::SevereBradycardia => format!(
                "Severe bradycardia: Heart rate {:.0} bpm < {:.0}",
                v.heart_rate, t.hr_low
            ),
            OverrideRule::HighFever => format!(
                "High fever: Temperature {:.1}°C > {:.1}°C",
                v.temperature_celsius, t.temp_high
            ),
            OverrideRule::InfantFever => format!(
                "Infant with fever: Age {}, Temp {:.1}°C",
                patient.age, v.temperature_celsius
            ),
        }
    }
}

/// A fired override. Always high risk with full confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleOverride {
    pub rule: OverrideRule,
    pub risk: RiskLevel,
    pub department: Department,
    pub reason: String,
    pub confidence: f64,
}

/// First rule in [`OverrideRule::PRIORITY`] that fires, if any.
pub fn evaluate(patient: &PatientInput, thresholds: &OverrideThresholds) -> Option<RuleOverride> {
    let rule = OverrideRule::PRIORITY
        .into_iter()
        .find(|rule| rule.is_triggered(patient, thresholds))?;
    let reason = rule.reason(patient, thresholds);
    warn!(?rule, %reason, "rule override triggered");

    Some(RuleOverride {
        rule,
        risk: RiskLevel::High,
        department: rule.department(),
        reason,
        confidence: 1.0,
    })
}
