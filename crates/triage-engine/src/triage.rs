use std::collections::BTreeMap;

use tracing::{debug, info};
use triage_core::models::patient::PatientInput;
use triage_core::models::verdict::{Department, RiskLevel, TriageResponse};

use crate::artifacts::ModelArtifacts;
use crate::error::EngineError;
use crate::explain::top_factors;
use crate::features::engineer_features;
use crate::overrides::{self, OverrideThresholds, RuleOverride};

/// Shared, read-only triage service. Build once after the artifacts have
/// loaded, then call [`TriageEngine::triage`] from any thread.
#[derive(Debug)]
pub struct TriageEngine {
    artifacts: ModelArtifacts,
    thresholds: OverrideThresholds,
}

impl TriageEngine {
    pub fn new(artifacts: ModelArtifacts, thresholds: OverrideThresholds) -> Self {
        Self {
            artifacts,
            thresholds,
        }
    }

    pub fn artifacts(&self) -> &ModelArtifacts {
        &self.artifacts
    }

    pub fn thresholds(&self) -> &OverrideThresholds {
        &self.thresholds
    }

    /// Validate, then apply the first matching safety override or fall
    /// back to the classifiers.
    pub fn triage(&self, patient: &PatientInput) -> Result<TriageResponse, EngineError> {
        patient.validate()?;

        let response = match overrides::evaluate(patient, &self.thresholds) {
            Some(hit) => override_response(hit, patient),
            None => self.classify(patient)?,
        };

        info!(
            risk = %response.risk,
            department = %response.department,
            confidence = response.confidence,
            override_applied = response.override_applied,
            "triage complete"
        );
        Ok(response)
    }

    fn classify(&self, patient: &PatientInput) -> Result<TriageResponse, EngineError> {
        let metadata = &self.artifacts.metadata;
        let features = engineer_features(patient, &metadata.symptom_keywords);
        let scaled = self.artifacts.scaler.transform(&features)?;
        debug!(n_features = scaled.len(), "features scaled");

        let risk_prediction = self.artifacts.risk_model.predict(&scaled)?;
        let dept_prediction = self.artifacts.dept_model.predict(&scaled)?;

        let risk = risk_prediction
            .label
            .parse::<RiskLevel>()
            .map_err(|e| EngineError::Prediction(e.to_string()))?;
        let department = dept_prediction
            .label
            .parse::<Department>()
            .map_err(|e| EngineError::Prediction(e.to_string()))?;

        let risk_confidence = risk_prediction.confidence();
        let explanation = format!(
            "AI Classification: {risk} risk with {:.1}% confidence. Recommended department: {department}.",
            risk_confidence * 100.0
        );
        let all_probabilities: BTreeMap<String, f64> = self
            .artifacts
            .risk_model
            .classes()
            .iter()
            .cloned()
            .zip(risk_prediction.probabilities)
            .collect();

        Ok(TriageResponse {
            risk,
            department,
            confidence: round3(risk_confidence),
            explanation,
            override_applied: false,
            override_reason: None,
            top_factors: top_factors(patient),
            all_probabilities,
        })
    }
}

fn override_response(hit: RuleOverride, patient: &PatientInput) -> TriageResponse {
    let all_probabilities = [
        (RiskLevel::High, 1.0),
        (RiskLevel::Medium, 0.0),
        (RiskLevel::Low, 0.0),
    ]
    .into_iter()
    .map(|(level, p)| (level.as_str().to_string(), p))
    .collect();

    TriageResponse {
        risk: hit.risk,
        department: hit.department,
        confidence: hit.confidence,
        explanation: hit.reason.clone(),
        override_applied: true,
        override_reason: Some(hit.reason),
        top_factors: top_factors(patient),
        all_probabilities,
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
