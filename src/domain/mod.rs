//! Domain types for retry-runner
//!
//! - AttemptRecord: one sampled attempt, observed then dropped
//! - RunResult: the terminal outcome handed back to the caller
//! - RunState: the two-state machine a run moves through

pub mod attempt;
pub mod outcome;

pub use attempt::AttemptRecord;
pub use outcome::{RunResult, RunState};
