use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            _ => Err(CoreError::UnknownRiskLevel(s.to_string())),
        }
    }
}

/// Department vocabulary shared by rule overrides and the department model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    Cardiology,
    Emergency,
    Neurology,
    Respiratory,
    Surgery,
    Endocrinology,
    Orthopedics,
    #[serde(rename = "General Medicine")]
    GeneralMedicine,
}

impl Department {
    pub const ALL: [Department; 8] = [
        Department::Cardiology,
        Department::Emergency,
        Department::Neurology,
        Department::Respiratory,
        Department::Surgery,
        Department::Endocrinology,
        Department::Orthopedics,
        Department::GeneralMedicine,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Cardiology => "Cardiology",
            Department::Emergency => "Emergency",
            Department::Neurology => "Neurology",
            Department::Respiratory => "Respiratory",
            Department::Surgery => "Surgery",
            Department::Endocrinology => "Endocrinology",
            Department::Orthopedics => "Orthopedics",
            Department::GeneralMedicine => "General Medicine",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Department {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Department::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CoreError::UnknownDepartment(s.to_string()))
    }
}

/// The answer returned for one triage request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageResponse {
    pub risk: RiskLevel,
    pub department: Department,
    /// 1.0 for rule overrides; the top risk-class probability otherwise.
    pub confidence: f64,
    pub explanation: String,
    pub override_applied: bool,
    pub override_reason: Option<String>,
    pub top_factors: Vec<String>,
    pub all_probabilities: BTreeMap<String, f64>,
}
