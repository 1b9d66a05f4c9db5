//! Run outcome types.

use serde::{Deserialize, Serialize};

/// Terminal outcome of a retry run.
///
/// `attempts_used` is always in `1..=max_attempts`. Exhaustion is reported
/// as `succeeded == false`, never as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    pub succeeded: bool,
    pub attempts_used: u32,
}

impl RunResult {
    pub fn success(attempts_used: u32) -> Self {
        Self {
            succeeded: true,
            attempts_used,
        }
    }

    pub fn exhausted(attempts_used: u32) -> Self {
        Self {
            succeeded: false,
            attempts_used,
        }
    }

    /// Returns true if the run gave up without a successful attempt
    pub fn is_exhausted(&self) -> bool {
        !self.succeeded
    }
}

/// State of a run in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    /// Still drawing attempts
    Running,
    /// Succeeded or hit the attempt ceiling
    Done,
}

impl RunState {
    /// Next state after an attempt.
    ///
    /// Done is terminal: it never transitions back to Running.
    pub fn advance(self, succeeded: bool, attempt: u32, max_attempts: u32) -> Self {
        match self {
            RunState::Done => RunState::Done,
            RunState::Running if succeeded || attempt >= max_attempts => RunState::Done,
            RunState::Running => RunState::Running,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Done)
    }
}
