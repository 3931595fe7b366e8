use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use triage_engine::overrides::OverrideThresholds;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
pub const CURRENT_VERSION: u32 = 1;

pub const MODEL_DIR_ENV: &str = "TRIAGE_MODEL_DIR";
pub const LOG_FORMAT_ENV: &str = "TRIAGE_LOG_FORMAT";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    /// Directory holding the four model artifact files.
    #[serde(default = "default_model_dir")]
    pub model_dir: PathBuf,
    #[serde(default)]
    pub log_format: LogFormat,
    /// Added in v1.
    #[serde(default)]
    pub thresholds: OverrideThresholds,
}

fn default_model_dir() -> PathBuf {
    PathBuf::from("ml/models")
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            model_dir: default_model_dir(),
            log_format: LogFormat::default(),
            thresholds: OverrideThresholds::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Pretty => f.write_str("pretty"),
            LogFormat::Json => f.write_str("json"),
        }
    }
}

impl FromStr for LogFormat {
    type Err = eyre::Report;

    fn from_str(s: &str) -> eyre::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(eyre::eyre!(
                "unknown log format {other:?} (expected \"pretty\" or \"json\")"
            )),
        }
    }
}

impl TriageConfig {
    /// Apply environment-style overrides. Values are passed in rather than
    /// read here so callers decide where they come from.
    pub fn apply_overrides(
        &mut self,
        model_dir: Option<String>,
        log_format: Option<String>,
    ) -> eyre::Result<()> {
        if let Some(dir) = model_dir.filter(|d| !d.trim().is_empty()) {
            self.model_dir = PathBuf::from(dir);
        }
        if let Some(format) = log_format {
            self.log_format = format.parse()?;
        }
        Ok(())
    }
}

/// `<config dir>/smart-triage/config.json`, if the platform has a config
/// directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join("smart-triage").join("config.json"))
}

/// Pick the config source: an explicit path must exist, the default
/// location is used only if present, otherwise built-in defaults. The
/// `TRIAGE_*` environment variables are applied last.
pub fn resolve(explicit: Option<&Path>) -> eyre::Result<TriageConfig> {
    let mut config = match explicit {
        Some(path) => load_config(path)?,
        None => match default_config_path().filter(|p| p.exists()) {
            Some(path) => load_config(&path)?,
            None => TriageConfig::default(),
        },
    };
    config.apply_overrides(
        std::env::var(MODEL_DIR_ENV).ok(),
        std::env::var(LOG_FORMAT_ENV).ok(),
    )?;
    Ok(config)
}

pub fn load_config(path: &Path) -> eyre::Result<TriageConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)
        .map_err(|e| eyre::eyre!("config at {} is not valid JSON: {e}", path.display()))?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: TriageConfig = serde_json::from_value(migrated)?;
    tracing::debug!(path = %path.display(), version = config.config_version, "config loaded");
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
/// Each migration is a pure transform on the raw JSON value.
pub fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION})"
        ));
    }

    // v0 → v1: add override thresholds at their default values
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        if !obj.contains_key("thresholds") {
            obj.insert(
                "thresholds".to_string(),
                serde_json::to_value(OverrideThresholds::default())?,
            );
        }
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (added thresholds)");
    }

    Ok(json)
}
