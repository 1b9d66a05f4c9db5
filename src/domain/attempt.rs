//! Per-attempt record.

use serde::{Deserialize, Serialize};

/// A single attempt of the retried operation.
///
/// Built once per loop iteration and never mutated. The runner hands it to
/// the observer and the log, then drops it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttemptRecord {
    /// 1-based attempt index
    pub attempt_number: u32,
    /// Whether the sampled value cleared the threshold
    pub outcome: bool,
    /// The value drawn from the sampler
    pub observed_value: f64,
}

impl AttemptRecord {
    /// Build the record for `value`, judged against `threshold`.
    ///
    /// Success is strictly greater than the threshold; equality fails.
    pub fn judge(attempt_number: u32, value: f64, threshold: f64) -> Self {
        Self {
            attempt_number,
            outcome: value > threshold,
            observed_value: value,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_judge_above_threshold_succeeds() {
        let record = AttemptRecord::judge(1, 0.7, 0.6);
        assert!(record.succeeded());
        assert_eq!(record.attempt_number, 1);
        assert_eq!(record.observed_value, 0.7);
    }

    #[test]
    fn test_judge_below_threshold_fails() {
        let record = AttemptRecord::judge(2, 0.1, 0.6);
        assert!(!record.succeeded());
    }

    #[test]
    fn test_judge_equal_to_threshold_fails() {
        let record = AttemptRecord::judge(3, 0.6, 0.6);
        assert!(!record.succeeded());
    }

    #[test]
    fn test_judge_zero_threshold() {
        assert!(!AttemptRecord::judge(1, 0.0, 0.0).succeeded());
        assert!(AttemptRecord::judge(1, 0.0001, 0.0).succeeded());
    }

    #[test]
    fn test_judge_threshold_of_one_never_succeeds() {
        assert!(!AttemptRecord::judge(1, 0.9999, 1.0).succeeded());
        assert!(!AttemptRecord::judge(1, 1.0, 1.0).succeeded());
    }
}
