//! triage-engine
//!
//! Turns a validated [`PatientInput`] into a triage verdict. Deterministic
//! safety overrides run first; only when none fires is the patient passed
//! through feature engineering and the externally trained risk and
//! department classifiers.
//!
//! [`PatientInput`]: triage_core::models::patient::PatientInput

pub mod artifacts;
pub mod error;
pub mod explain;
pub mod features;
pub mod model;
pub mod overrides;
pub mod triage;

pub use triage::TriageEngine;
