use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use eyre::{Result, WrapErr};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;
use triage_cli::config::{self, LogFormat, TriageConfig};
use triage_core::error::CoreError;
use triage_core::models::patient::{ManualEntry, PatientInput};
use triage_engine::TriageEngine;
use triage_engine::artifacts::ModelArtifacts;
use triage_notes::ClinicalNoteParser;
use triage_notes::golden;

/// Clinical note extraction and safety-first patient triage
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract structured fields from a clinical note (file or stdin)
    Parse { file: Option<PathBuf> },

    /// Triage a patient record given as JSON
    Triage { patient: PathBuf },

    /// Parse a note, fill gaps from manual values, then triage
    Promote {
        note: PathBuf,

        /// Manual entry JSON for fields the note does not cover
        #[arg(long)]
        manual: Option<PathBuf>,
    },

    /// Score the parser against a JSON Lines golden dataset
    Golden { dataset: PathBuf },
}

#[derive(Serialize)]
struct MissingReport<'a> {
    missing_fields: Vec<&'a str>,
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let args = Args::parse();

    let config = config::resolve(args.config.as_deref())?;
    init_tracing(config.log_format);

    match args.command {
        Command::Parse { file } => {
            let note = read_note(file.as_deref())?;
            let parser = ClinicalNoteParser::new();
            print_json(&parser.parse(&note))?;
        }
        Command::Triage { patient } => {
            let engine = load_engine(&config)?;
            let patient: PatientInput = read_json(&patient)?;
            print_json(&engine.triage(&patient)?)?;
        }
        Command::Promote { note, manual } => {
            let engine = load_engine(&config)?;
            let manual: ManualEntry = match manual {
                Some(path) => read_json(&path)?,
                None => ManualEntry::default(),
            };
            let text = read_note(Some(&note))?;
            let extraction = ClinicalNoteParser::new().parse(&text);

            let patient = match extraction.promote(&manual) {
                Ok(patient) => patient,
                Err(CoreError::MissingFields(fields)) => {
                    print_json(&MissingReport {
                        missing_fields: fields.iter().map(|f| f.as_str()).collect(),
                    })?;
                    return Ok(ExitCode::from(2));
                }
                Err(e) => return Err(e.into()),
            };
            print_json(&engine.triage(&patient)?)?;
        }
        Command::Golden { dataset } => {
            let records = golden::load_jsonl(&dataset)
                .wrap_err_with(|| format!("failed to load {}", dataset.display()))?;
            let report = golden::evaluate(&ClinicalNoteParser::new(), &records);
            print_json(&report)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Logs go to stderr; stdout carries only command output.
fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

/// Artifacts load before any triage work; failure aborts the command.
fn load_engine(config: &TriageConfig) -> Result<TriageEngine> {
    let artifacts = ModelArtifacts::load(&config.model_dir).wrap_err_with(|| {
        format!(
            "failed to load model artifacts from {}",
            config.model_dir.display()
        )
    })?;
    info!(model_dir = %config.model_dir.display(), "triage engine ready");
    Ok(TriageEngine::new(artifacts, config.thresholds))
}

fn read_note(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display())),
        None => {
            let mut note = String::new();
            io::stdin().read_to_string(&mut note)?;
            Ok(note)
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&contents).wrap_err_with(|| format!("invalid JSON in {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
