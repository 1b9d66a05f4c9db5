//! Console report for a retry run.
//!
//! Prints one block per attempt as it happens, then a final summary.

use std::io::{self, Write};

use colored::Colorize;

use crate::domain::{AttemptRecord, RunResult};
use crate::error::Result;
use crate::runner::AttemptObserver;

/// Writes the human-readable report to any `Write`
pub struct Reporter<W: Write> {
    out: W,
    label: String,
    max_attempts: u32,
    color: bool,
    error: Option<io::Error>,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, label: impl Into<String>, max_attempts: u32) -> Self {
        Self {
            out,
            label: label.into(),
            max_attempts,
            color: false,
            error: None,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    fn write_attempt(&mut self, record: &AttemptRecord) -> io::Result<()> {
        writeln!(
            self.out,
            "Attempt {}: Random Value = {:.2}",
            record.attempt_number, record.observed_value
        )?;

        let line = if record.succeeded() {
            let status = format!("{} SUCCESS ✅", self.label);
            if self.color { status.green().to_string() } else { status }
        } else {
            let status = if record.attempt_number < self.max_attempts {
                format!("{} FAILED ❌ - Retrying...", self.label)
            } else {
                format!("{} FAILED ❌", self.label)
            };
            if self.color { status.red().to_string() } else { status }
        };
        writeln!(self.out, "{}", line)
    }

    /// Print the final result block, surfacing any write error from earlier attempts
    pub fn summary(&mut self, result: &RunResult) -> Result<()> {
        if let Some(e) = self.error.take() {
            return Err(e.into());
        }

        writeln!(self.out)?;
        let header = "===== FINAL RESULT =====";
        if self.color {
            writeln!(self.out, "{}", header.bold())?;
        } else {
            writeln!(self.out, "{}", header)?;
        }

        let line = if result.succeeded {
            let text = format!("{} succeeded after {} attempt(s).", self.label, result.attempts_used);
            if self.color { text.green().to_string() } else { text }
        } else {
            let text = format!(
                "{} failed after {} attempts. Escalate issue 🚨",
                self.label, result.attempts_used
            );
            if self.color { text.red().bold().to_string() } else { text }
        };
        writeln!(self.out, "{}", line)?;
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> AttemptObserver for Reporter<W> {
    fn on_attempt(&mut self, record: &AttemptRecord) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.write_attempt(record) {
            log::warn!("Failed to write attempt {}: {}", record.attempt_number, e);
            self.error = Some(e);
        }
    }
}

/// Serialize a result for `--format json`
pub fn render_json(result: &RunResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RetryError;
    use crate::runner::RetryRunner;
    use crate::sampler::SequenceSampler;

    fn report(values: Vec<f64>, max_attempts: u32) -> (RunResult, String) {
        let runner = RetryRunner::new(max_attempts, 0.6);
        let mut sampler = SequenceSampler::new(values).unwrap();
        let mut reporter = Reporter::new(Vec::new(), "API Call", max_attempts);
        let result = runner.run_observed(&mut sampler, &mut reporter);
        reporter.summary(&result).unwrap();
        (result, String::from_utf8(reporter.into_inner()).unwrap())
    }

    #[test]
    fn test_report_success_on_third_attempt() {
        let (result, text) = report(vec![0.1, 0.3, 0.7], 5);
        assert!(result.succeeded);
        let expected = "\
Attempt 1: Random Value = 0.10
API Call FAILED ❌ - Retrying...
Attempt 2: Random Value = 0.30
API Call FAILED ❌ - Retrying...
Attempt 3: Random Value = 0.70
API Call SUCCESS ✅

===== FINAL RESULT =====
API Call succeeded after 3 attempt(s).
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_report_exhausted() {
        let (result, text) = report(vec![0.0], 3);
        assert!(!result.succeeded);
        let expected = "\
Attempt 1: Random Value = 0.00
API Call FAILED ❌ - Retrying...
Attempt 2: Random Value = 0.00
API Call FAILED ❌ - Retrying...
Attempt 3: Random Value = 0.00
API Call FAILED ❌

===== FINAL RESULT =====
API Call failed after 3 attempts. Escalate issue 🚨
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_report_custom_label() {
        let mut reporter = Reporter::new(Vec::new(), "Login", 1);
        reporter.on_attempt(&AttemptRecord::judge(1, 0.9, 0.6));
        reporter.summary(&RunResult::success(1)).unwrap();
        let text = String::from_utf8(reporter.into_inner()).unwrap();
        assert!(text.contains("Login SUCCESS ✅"));
        assert!(text.contains("Login succeeded after 1 attempt(s)."));
    }

    struct BrokenWriter;

    impl Write for BrokenWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_error_surfaces_in_summary() {
        let mut reporter = Reporter::new(BrokenWriter, "API Call", 2);
        reporter.on_attempt(&AttemptRecord::judge(1, 0.1, 0.6));
        reporter.on_attempt(&AttemptRecord::judge(2, 0.1, 0.6));
        let err = reporter.summary(&RunResult::exhausted(2)).unwrap_err();
        assert!(matches!(err, RetryError::Io(_)));
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&RunResult::exhausted(3)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["succeeded"], false);
        assert_eq!(value["attempts_used"], 3);
    }
}
