//! triage-core
//!
//! Pure domain types for the triage system: physiological ranges, the
//! best-effort extraction record, the validated patient input, and the
//! triage verdict. No I/O; this is the shared vocabulary of the other
//! crates.

pub mod error;
pub mod models;
pub mod ranges;
pub mod validation;
