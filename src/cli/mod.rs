//! CLI module for retry-runner - command-line interface and subcommands.
//!
//! Provides the main entry point with subcommands for running the retry
//! loop and printing the effective configuration.

pub mod commands;
pub mod run;

pub use commands::{Cli, Commands, RunArgs};
pub use run::execute;
