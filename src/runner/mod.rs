//! Retry runner module - bounded do-while retry over a sampled success signal.
//!
//! This module provides:
//! - RetryRunner, which owns the attempt ceiling and success threshold
//! - `run`, the free-function form of the same contract
//! - AttemptObserver, the hook that sees each AttemptRecord before it is dropped

mod retry_runner;

pub use retry_runner::{AttemptObserver, DEFAULT_MAX_ATTEMPTS, DEFAULT_SUCCESS_THRESHOLD, RetryRunner, run};
