//! Run dispatch: sampler, runner and output for one invocation.

use std::io::Write;

use crate::config::{Config, OutputFormat};
use crate::domain::RunResult;
use crate::error::Result;
use crate::report::{Reporter, render_json};
use crate::runner::RetryRunner;
use crate::sampler;

/// Execute one run with an already-merged `config`, writing the report to `out`.
///
/// An exhausted run is still `Ok`; only sampler, IO and serialization faults
/// are errors.
pub fn execute<W: Write>(config: &Config, mut out: W) -> Result<RunResult> {
    let runner = RetryRunner::from_config(&config.retry);
    let mut sampler = sampler::from_config(&config.sampler)?;

    match config.output.format {
        OutputFormat::Text => {
            let mut reporter = Reporter::new(out, config.retry.label.as_str(), runner.max_attempts())
                .with_color(config.output.color);
            let result = runner.run_observed(sampler.as_mut(), &mut reporter);
            reporter.summary(&result)?;
            Ok(result)
        }
        OutputFormat::Json => {
            let result = runner.run(sampler.as_mut());
            writeln!(out, "{}", render_json(&result)?)?;
            out.flush()?;
            Ok(result)
        }
    }
}
