//! Transition engine
//!
//! Pushes probability mass up the ladder one attempt at a time. Each attempt
//! moves `p_i` of the mass at level `i` to level `i + 1` and leaves the rest
//! in place; the top level keeps everything it receives.

use super::{Distribution, Ladder};
use crate::error::Result;

/// Mass may drift from 1 by accumulated rounding error, nothing more.
pub const MASS_TOLERANCE: f64 = 1e-9;

/// Validate the inputs, then compute the distribution after `step_count` attempts.
///
/// Any validation or parse failure is returned before a single step runs.
pub fn run<S: AsRef<str>>(
    level_count: i64,
    start_level: i64,
    step_count: i64,
    tokens: &[S],
) -> Result<Distribution> {
    let ladder = Ladder::from_tokens(level_count, start_level, step_count, tokens)?;
    Ok(ladder.run())
}

/// Apply one upgrade attempt to the whole distribution
pub fn step(ladder: &Ladder, current: &Distribution) -> Distribution {
    let mass = current.as_slice();
    let advance = ladder.advance_probabilities();
    let mut next = vec![0.0; mass.len()];

    for (i, &m) in mass.iter().enumerate() {
        match advance.get(i) {
            Some(&p) if p > 0.0 => {
                next[i] += m * (1.0 - p);
                next[i + 1] += m * p;
            }
            // top level, or nothing configured for this transition
            _ => next[i] += m,
        }
    }

    Distribution::from(next)
}

impl Ladder {
    /// Distribution before any attempt: everything at the start level
    pub fn initial(&self) -> Distribution {
        Distribution::unit(self.levels(), self.start_level())
    }

    /// Distribution after all configured attempts
    pub fn run(&self) -> Distribution {
        tracing::debug!(
            levels = self.levels(),
            start_level = self.start_level(),
            steps = self.steps(),
            "Running upgrade ladder"
        );

        let result = (0..self.steps()).fold(self.initial(), |current, _| step(self, &current));

        let total = result.total();
        if (total - 1.0).abs() > MASS_TOLERANCE {
            tracing::warn!(total, "Probability mass drifted beyond tolerance");
        }
        tracing::debug!(total, top = result.top_level_probability(), "Run complete");

        result
    }

    /// Distributions after attempt 1, 2, ..., `steps`
    pub fn trajectory(&self) -> Propagation<'_> {
        Propagation {
            ladder: self,
            current: self.initial(),
            remaining: self.steps(),
        }
    }
}

/// Iterator over successive distributions of a ladder run
pub struct Propagation<'a> {
    ladder: &'a Ladder,
    current: Distribution,
    remaining: u64,
}

impl Iterator for Propagation<'_> {
    type Item = Distribution;

    fn next(&mut self) -> Option<Distribution> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.current = step(self.ladder, &self.current);
        Some(self.current.clone())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}
