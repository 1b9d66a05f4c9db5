//! retry-runner - bounded retry over a randomized success signal
//!
//! A run repeatedly samples a value in [0, 1) and stops at the first value
//! strictly above the success threshold, or when the attempt ceiling is hit.
//! At least one attempt always executes.

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod report;
pub mod runner;
pub mod sampler;

pub use domain::{AttemptRecord, RunResult, RunState};
pub use error::{Result, RetryError};
pub use runner::{AttemptObserver, RetryRunner, run};
pub use sampler::{RandomSampler, Sampler, SequenceSampler};
