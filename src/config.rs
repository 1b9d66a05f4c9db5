//! Configuration file loading, defaults and validation.

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::RetryError;
use crate::runner::{DEFAULT_MAX_ATTEMPTS, DEFAULT_SUCCESS_THRESHOLD};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub retry: RetryConfig,
    pub sampler: SamplerConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub success_threshold: f64,
    /// Name of the retried operation in the console report
    pub label: String,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            success_threshold: DEFAULT_SUCCESS_THRESHOLD,
            label: "API Call".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Fixed seed for reproducible runs
    pub seed: Option<u64>,
    /// Fixed values to replay instead of random draws
    pub sequence: Option<Vec<f64>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            color: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            retry: RetryConfig::default(),
            sampler: SamplerConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        let config_dir = dirs::config_dir();
        Self::load_from_locations(config_path, config_dir.as_deref(), Path::new("."))
    }

    /// Fallback chain over explicit roots: `config_path`, then
    /// `<config_dir>/<project>/<project>.yml`, then `<working_dir>/<project>.yml`,
    /// then defaults. Only an explicit path is fatal; a bad file elsewhere is
    /// skipped with a warning.
    pub fn load_from_locations(
        config_path: Option<&PathBuf>,
        config_dir: Option<&Path>,
        working_dir: &Path,
    ) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let project_name = env!("CARGO_PKG_NAME");
        let file_name = format!("{}.yml", project_name);

        // Try primary location: ~/.config/<project>/<project>.yml
        // Then fallback location: ./<project>.yml
        let candidates = config_dir
            .map(|dir| dir.join(project_name).join(&file_name))
            .into_iter()
            .chain(std::iter::once(working_dir.join(&file_name)));

        for candidate in candidates {
            if !candidate.exists() {
                continue;
            }
            match Self::load_from_file(&candidate) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {:#}", candidate.display(), e);
                    eprintln!("warning: ignoring config {}: {:#}", candidate.display(), e);
                }
            }
        }

        // No usable config file found, use defaults
        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        config.validate().context("Invalid config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Reject values the runner cannot honor
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.retry.max_attempts == 0 {
            return Err(RetryError::InvalidConfig("max_attempts must be at least 1".to_string()));
        }
        if !(0.0..=1.0).contains(&self.retry.success_threshold) {
            return Err(RetryError::InvalidConfig(format!(
                "success_threshold {} is outside [0, 1]",
                self.retry.success_threshold
            )));
        }
        if let Some(sequence) = &self.sampler.sequence {
            crate::sampler::SequenceSampler::new(sequence.clone())?;
        }
        Ok(())
    }

    pub fn to_yaml(&self) -> crate::error::Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
