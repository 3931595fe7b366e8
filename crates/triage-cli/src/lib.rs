//! triage-cli
//!
//! Command-line front end for the triage crates. The library half holds
//! configuration so it can be tested without spawning the binary.

pub mod config;
