//! Configuration for the Kizuna formatter.
//!
//! Every field is optional; a missing config file is equivalent to an empty
//! one. Command-line flags are applied on top of the loaded values.
//!
//! ```yaml
//! event: true
//! winlosedraw: "2,6,0,25,21,4,11,8,1,8,10,0"
//! reference_year: 2024
//! sidecar_path: "records/kizuna_pragma_tmp.txt"
//! ```

use crate::record_counter::{CounterSeed, SeedError};
use crate::resume::DEFAULT_SIDECAR_PATH;
use crate::session::SessionOptions;
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Years outside this range are accepted but flagged.
const PLAUSIBLE_YEARS: std::ops::RangeInclusive<i32> = 2000..=2100;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KizunaConfig {
    /// Start in 12-field scoring mode (same as `--event`).
    #[serde(default)]
    pub event: bool,

    /// Echo input lines and dump record tokens (same as `--debug`).
    #[serde(default)]
    pub debug: bool,

    /// Initial counts, 12 comma-separated integers (same as `--winlosedraw`).
    #[serde(default)]
    pub winlosedraw: Option<String>,

    /// Year used for weekday computation. Defaults to the current year.
    #[serde(default)]
    pub reference_year: Option<i32>,

    /// Where scoring-mode runs write their resume directives.
    #[serde(default = "default_sidecar_path")]
    pub sidecar_path: String,

    /// Set to false to skip writing the resume directives.
    #[serde(default = "default_true")]
    pub write_sidecar: bool,

    /// Suppress all warnings.
    #[serde(default, rename = "_suppress_warnings")]
    pub suppress_warnings: bool,
}

fn default_true() -> bool {
    true
}

fn default_sidecar_path() -> String {
    DEFAULT_SIDECAR_PATH.to_string()
}

impl Default for KizunaConfig {
    fn default() -> Self {
        Self {
            event: false,
            debug: false,
            winlosedraw: None,
            reference_year: None,
            sidecar_path: default_sidecar_path(),
            write_sidecar: true,
            suppress_warnings: false,
        }
    }
}

impl KizunaConfig {
    /// Loads configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();
        debug!(path = %path_ref.display(), "Loading configuration from file");
        let content = std::fs::read_to_string(path_ref)?;
        let config: Self = serde_yaml::from_str(&content)?;
        debug!(
            event = config.event,
            has_seed = config.winlosedraw.is_some(),
            sidecar = %config.sidecar_path,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Validates the configuration and returns warnings.
    ///
    /// A malformed `winlosedraw` is an error; everything else is a warning.
    pub fn validate(&self) -> Result<Vec<ConfigWarning>, ConfigError> {
        self.seed()?;

        let mut warnings = Vec::new();
        if self.suppress_warnings {
            return Ok(warnings);
        }

        if let Some(year) = self.reference_year
            && !PLAUSIBLE_YEARS.contains(&year)
        {
            warnings.push(ConfigWarning::InvalidValue {
                field: "reference_year".to_string(),
                message: format!("Year {year} looks unlikely for a battle log"),
            });
        }

        if self.write_sidecar && self.sidecar_path.trim().is_empty() {
            warnings.push(ConfigWarning::InvalidValue {
                field: "sidecar_path".to_string(),
                message: "Empty path, resume directives will not be written".to_string(),
            });
        }

        Ok(warnings)
    }

    /// Parses the configured seed, all zeros when unset.
    pub fn seed(&self) -> Result<CounterSeed, ConfigError> {
        match &self.winlosedraw {
            Some(raw) => raw.parse().map_err(ConfigError::InvalidSeed),
            None => Ok(CounterSeed::default()),
        }
    }

    /// The reference year, falling back to the current local year.
    pub fn effective_year(&self) -> i32 {
        self.reference_year
            .unwrap_or_else(|| chrono::Local::now().year())
    }

    /// The sidecar path, or `None` when disabled.
    pub fn sidecar(&self) -> Option<PathBuf> {
        (self.write_sidecar && !self.sidecar_path.trim().is_empty())
            .then(|| PathBuf::from(&self.sidecar_path))
    }

    /// Builds session options from this configuration.
    pub fn session_options(&self) -> Result<SessionOptions, ConfigError> {
        Ok(SessionOptions {
            scoring_mode: self.event,
            debug: self.debug,
            reference_year: self.effective_year(),
            seed: self.seed()?,
            sidecar_path: self.sidecar(),
        })
    }
}

/// Configuration warnings emitted during validation.
#[derive(Debug, Clone)]
pub enum ConfigWarning {
    /// Field has an invalid or suspicious value.
    InvalidValue { field: String, message: String },
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigWarning::InvalidValue { field, message } => {
                write!(f, "Warning [{}]: {}", field, message)
            }
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid winlosedraw: {0}")]
    InvalidSeed(#[source] SeedError),
}
