//! Output formatting module
//!
//! This module handles formatting ladder results for different output formats.

use crate::{Distribution, Ladder, Result};
use serde::Serialize;

/// Below this, probabilities switch to scientific notation in tables
const SCIENTIFIC_BELOW: f64 = 0.0001;

/// Everything the compute command prints
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub levels: usize,
    pub start_level: usize,
    pub steps: u64,
    pub advance_probabilities: Vec<f64>,
    pub distribution: Distribution,
    /// Sum of the distribution, expected to be 1
    pub total: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trajectory: Option<Vec<Distribution>>,
}

impl Report {
    pub fn new(
        ladder: &Ladder,
        distribution: Distribution,
        trajectory: Option<Vec<Distribution>>,
    ) -> Self {
        Self {
            levels: ladder.levels(),
            start_level: ladder.start_level(),
            steps: ladder.steps(),
            advance_probabilities: ladder.advance_probabilities().to_vec(),
            total: distribution.total(),
            distribution,
            trajectory,
        }
    }
}

/// `p (pct%)`, in scientific notation for tiny non-zero values
pub fn format_probability(p: f64) -> String {
    if p > 0.0 && p < SCIENTIFIC_BELOW {
        format!("{:.2e} ({:.2e}%)", p, p * 100.0)
    } else {
        format!("{:.6} ({:.4}%)", p, p * 100.0)
    }
}

/// Output the report as JSON
pub fn output_json(w: &mut impl std::io::Write, report: &Report) -> Result<()> {
    serde_json::to_writer_pretty(&mut *w, report)?;
    writeln!(w)?; // Add trailing newline
    Ok(())
}

/// Output the report as text table
pub fn output_table(w: &mut impl std::io::Write, report: &Report) -> Result<()> {
    writeln!(w, "Upgrade Odds - Level Distribution")?;
    writeln!(w, "{}", "=".repeat(60))?;
    writeln!(w)?;

    writeln!(w, "Ladder:")?;
    writeln!(w, "  Levels:      {}", report.levels)?;
    writeln!(w, "  Start level: {}", report.start_level)?;
    writeln!(w, "  Attempts:    {}", report.steps)?;
    writeln!(w)?;

    writeln!(w, "Result:")?;
    writeln!(w, "{:-<60}", "")?;
    for (level, p) in report.distribution.iter() {
        writeln!(w, "Level {:<4} {}", level, format_probability(p))?;
    }
    writeln!(w, "{:-<60}", "")?;
    writeln!(w, "Total probability: {:.10}", report.total)?;

    if let Some(trajectory) = &report.trajectory {
        writeln!(w)?;
        writeln!(w, "Per attempt:")?;

        let header: String = (1..=report.levels)
            .map(|level| format!(" {:>10}", format!("L{}", level)))
            .collect();
        writeln!(w, "{:>7}{}", "Attempt", header)?;
        writeln!(w, "{:-<1$}", "", 7 + 11 * report.levels)?;

        for (attempt, dist) in trajectory.iter().enumerate() {
            let row: String = dist.iter().map(|(_, p)| format!(" {:>10.6}", p)).collect();
            writeln!(w, "{:>7}{}", attempt + 1, row)?;
        }
    }

    Ok(())
}

/// Output the validated ladder's effective upgrade chances
pub fn output_ladder(w: &mut impl std::io::Write, ladder: &Ladder) -> Result<()> {
    writeln!(w, "✅ Ladder is valid")?;
    writeln!(w)?;
    writeln!(w, "Levels:      {}", ladder.levels())?;
    writeln!(w, "Start level: {}", ladder.start_level())?;
    writeln!(w, "Attempts:    {}", ladder.steps())?;
    writeln!(w)?;
    writeln!(w, "Upgrade chances:")?;

    for (i, &p) in ladder.advance_probabilities().iter().enumerate() {
        let from = i + 1;
        if from < ladder.start_level() {
            writeln!(w, "  Level {}→{}: unused (below start level)", from, from + 1)?;
        } else {
            writeln!(w, "  Level {}→{}: {}", from, from + 1, format_probability(p))?;
        }
    }

    Ok(())
}

/// Output how each token was interpreted
pub fn output_normalized(
    w: &mut impl std::io::Write,
    results: &[(&str, Result<f64>)],
) -> Result<()> {
    for (token, result) in results {
        match result {
            Ok(p) => writeln!(w, "{:>12} => {}", token, format_probability(*p))?,
            Err(e) => writeln!(w, "{:>12} => error: {}", token, e)?,
        }
    }
    Ok(())
}
