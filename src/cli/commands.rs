//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - run: execute the retry loop, with per-run overrides
//! - config: print the effective configuration

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::sampler::SequenceSampler;

/// retry-runner - retry an operation until a sampled signal clears a threshold
#[derive(Parser, Debug)]
#[command(name = "retry-runner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute (defaults to `run` with config values)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the retry loop
    Run(RunArgs),

    /// Print the effective configuration as YAML
    Config,
}

/// Overrides for a single run; unset flags fall back to the config file
#[derive(Args, Debug, Default, Clone, PartialEq)]
pub struct RunArgs {
    /// Attempt ceiling
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_attempts: Option<u32>,

    /// Values strictly above this count as success
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Seed the random sampler for a reproducible run
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Replay fixed values instead of sampling, e.g. "0.1,0.3,0.7"
    #[arg(long, conflicts_with = "seed")]
    pub sequence: Option<String>,

    /// Name of the retried operation in the report
    #[arg(short, long)]
    pub label: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl RunArgs {
    /// Layer these flags over `config`, validating the merged result
    pub fn apply(&self, config: &Config) -> Result<Config> {
        let mut merged = config.clone();

        if let Some(max_attempts) = self.max_attempts {
            merged.retry.max_attempts = max_attempts;
        }
        if let Some(threshold) = self.threshold {
            merged.retry.success_threshold = threshold;
        }
        if let Some(label) = &self.label {
            merged.retry.label = label.clone();
        }
        if let Some(seed) = self.seed {
            merged.sampler.seed = Some(seed);
            merged.sampler.sequence = None;
        }
        if let Some(sequence) = &self.sequence {
            let sampler: SequenceSampler = sequence.parse()?;
            merged.sampler.sequence = Some(sampler.values().to_vec());
        }
        if let Some(format) = self.format {
            merged.output.format = format;
        }
        if self.no_color {
            merged.output.color = false;
        }

        merged.validate()?;
        Ok(merged)
    }
}
