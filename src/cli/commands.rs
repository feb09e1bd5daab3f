//! CLI command implementations
//!
//! This module contains the implementation for each CLI command.

use crate::cli::LadderInput;
use crate::{Ladder, Result};

/// Validate resolved inputs into a ladder
fn build_ladder(input: &LadderInput) -> Result<Ladder> {
    Ladder::from_tokens(input.levels, input.start_level, input.steps, &input.tokens)
}

/// Compute command implementation
pub mod compute {
    use super::*;
    use crate::cli::OutputFormat;
    use crate::cli::output::{self, Report};

    /// Execute the compute command
    pub fn execute(
        input: LadderInput,
        output_format: OutputFormat,
        trace: bool,
    ) -> Result<()> {
        tracing::info!(
            "Computing {} attempts on a {}-level ladder starting at level {}",
            input.steps,
            input.levels,
            input.start_level
        );

        let ladder = build_ladder(&input)?;

        let trajectory = if trace {
            Some(ladder.trajectory().collect::<Vec<_>>())
        } else {
            None
        };
        let distribution = match &trajectory {
            Some(steps) => steps.last().cloned().unwrap_or_else(|| ladder.initial()),
            None => ladder.run(),
        };

        let report = Report::new(&ladder, distribution, trajectory);
        tracing::info!("Total probability: {:.10}", report.total);

        let mut stdout = std::io::stdout().lock();
        match output_format {
            OutputFormat::Json => output::output_json(&mut stdout, &report)?,
            OutputFormat::Table => output::output_table(&mut stdout, &report)?,
        }

        Ok(())
    }
}

/// Check command implementation
pub mod check {
    use super::*;

    /// Execute the check command
    pub fn execute(input: LadderInput) -> Result<()> {
        tracing::info!("Checking {}-level ladder", input.levels);

        let ladder = match build_ladder(&input) {
            Ok(ladder) => ladder,
            Err(e) => {
                eprintln!("❌ Invalid ladder: {}", e);
                return Err(e);
            }
        };

        let mut stdout = std::io::stdout().lock();
        crate::cli::output::output_ladder(&mut stdout, &ladder)?;
        Ok(())
    }
}

/// Normalize command implementation
pub mod normalize {
    use super::*;

    /// Execute the normalize command
    ///
    /// Every token is reported; the command fails if any token did not parse.
    pub fn execute(tokens: &[String]) -> Result<()> {
        let results: Vec<_> = tokens
            .iter()
            .map(|t| (t.as_str(), crate::normalize(t)))
            .collect();

        let mut stdout = std::io::stdout().lock();
        crate::cli::output::output_normalized(&mut stdout, &results)?;

        match results.into_iter().find_map(|(_, r)| r.err()) {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
