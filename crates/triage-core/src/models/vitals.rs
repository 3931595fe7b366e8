use serde::{Deserialize, Serialize};

use super::gender::Gender;

/// Vitals as found in free text. Every field is best-effort.
///
/// Blood pressure is either fully present (with systolic above diastolic)
/// or fully absent; the extractor never fills one leg alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VitalBundle {
    pub heart_rate: Option<f64>,
    #[serde(alias = "sbp")]
    pub systolic_bp: Option<f64>,
    #[serde(alias = "dbp")]
    pub diastolic_bp: Option<f64>,
    #[serde(alias = "temp_c")]
    pub temperature_celsius: Option<f64>,
    #[serde(alias = "spo2")]
    pub oxygen_saturation: Option<f64>,
}

impl VitalBundle {
    pub fn has_blood_pressure(&self) -> bool {
        self.systolic_bp.is_some() && self.diastolic_bp.is_some()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demographics {
    pub age: Option<u32>,
    pub gender: Option<Gender>,
}
