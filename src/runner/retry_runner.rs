//! Retry runner implementation.
//!
//! Each run draws at least one value. Every attempt:
//! 1. Increments the attempt counter
//! 2. Samples a fresh value
//! 3. Judges it against the threshold (strictly greater wins)
//! 4. Stops on success or when the ceiling is reached

use log::{debug, info};

use crate::config::RetryConfig;
use crate::domain::{AttemptRecord, RunResult, RunState};
use crate::sampler::Sampler;

/// Default attempt ceiling
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Default success threshold
pub const DEFAULT_SUCCESS_THRESHOLD: f64 = 0.6;

/// Receives each attempt as it happens
pub trait AttemptObserver {
    fn on_attempt(&mut self, record: &AttemptRecord);
}

/// No-op observer
impl AttemptObserver for () {
    fn on_attempt(&mut self, _record: &AttemptRecord) {}
}

impl<O: AttemptObserver + ?Sized> AttemptObserver for &mut O {
    fn on_attempt(&mut self, record: &AttemptRecord) {
        (**self).on_attempt(record)
    }
}

/// Repeatedly samples until a value clears the threshold or attempts run out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryRunner {
    max_attempts: u32,
    success_threshold: f64,
}

impl Default for RetryRunner {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_SUCCESS_THRESHOLD)
    }
}

impl RetryRunner {
    /// `max_attempts` must be at least 1; it is not checked here.
    pub fn new(max_attempts: u32, success_threshold: f64) -> Self {
        Self {
            max_attempts,
            success_threshold,
        }
    }

    pub fn from_config(config: &RetryConfig) -> Self {
        Self::new(config.max_attempts, config.success_threshold)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn success_threshold(&self) -> f64 {
        self.success_threshold
    }

    /// Run to completion, logging each attempt.
    pub fn run<S: Sampler + ?Sized>(&self, sampler: &mut S) -> RunResult {
        self.run_observed(sampler, &mut ())
    }

    /// Run to completion, handing every attempt to `observer`.
    pub fn run_observed<S, O>(&self, sampler: &mut S, observer: &mut O) -> RunResult
    where
        S: Sampler + ?Sized,
        O: AttemptObserver + ?Sized,
    {
        debug!(
            "Starting retry run: max_attempts={}, threshold={}",
            self.max_attempts, self.success_threshold
        );

        let mut attempt: u32 = 0;
        let mut succeeded = false;
        let mut state = RunState::Running;

        while !state.is_terminal() {
            attempt += 1;
            let record = AttemptRecord::judge(attempt, sampler.sample(), self.success_threshold);
            succeeded = record.succeeded();

            info!(
                "Attempt {}: value={:.2} {}",
                record.attempt_number,
                record.observed_value,
                if succeeded { "pass" } else { "fail" }
            );
            observer.on_attempt(&record);

            state = state.advance(succeeded, attempt, self.max_attempts);
        }

        let result = RunResult {
            succeeded,
            attempts_used: attempt,
        };
        if result.succeeded {
            info!("Run succeeded after {} attempt(s)", result.attempts_used);
        } else {
            info!("Run exhausted after {} attempts", result.attempts_used);
        }
        result
    }
}

/// Free-function form: `run(max_attempts, threshold, sampler)`.
pub fn run<S: Sampler>(max_attempts: u32, success_threshold: f64, mut sampler: S) -> RunResult {
    RetryRunner::new(max_attempts, success_threshold).run(&mut sampler)
}
