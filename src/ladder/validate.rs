//! Input validation and the validated ladder configuration

use super::percentage;
use crate::ensure;
use crate::error::{Error, Result};

/// Check raw run inputs without building anything.
///
/// Checks run in order: level count, start level, step count, number of
/// probabilities, then each probability from the start level up.
/// Entries below the start level are accepted as-is and never checked.
pub fn validate(
    level_count: i64,
    start_level: i64,
    step_count: i64,
    probabilities: &[f64],
) -> Result<()> {
    check_shape(level_count, start_level, step_count, probabilities.len())?;
    let first = (start_level - 1) as usize;
    check_probabilities(&probabilities[first..], first)
}

fn check_shape(
    level_count: i64,
    start_level: i64,
    step_count: i64,
    probability_count: usize,
) -> Result<()> {
    ensure!(level_count >= 2, Error::InvalidLevelCount(level_count));
    ensure!(
        (1..=level_count).contains(&start_level),
        Error::InvalidStartLevel {
            start: start_level,
            levels: level_count,
        }
    );
    ensure!(step_count >= 0, Error::InvalidStepCount(step_count));

    let expected = (level_count - 1) as usize;
    ensure!(
        probability_count == expected,
        Error::ProbabilityCount {
            expected,
            actual: probability_count,
        }
    );
    Ok(())
}

/// `offset` is the 0-based transition index of `probabilities[0]`
fn check_probabilities(probabilities: &[f64], offset: usize) -> Result<()> {
    for (i, &value) in probabilities.iter().enumerate() {
        ensure!(
            (0.0..=1.0).contains(&value),
            Error::InvalidProbability {
                from: offset + i + 1,
                value
            }
        );
    }

    Ok(())
}

/// A validated, immutable run configuration.
///
/// `advance[i]` is the chance to move from level `i + 1` to `i + 2` in one
/// attempt. Entries below the start level are stored as 0 since that mass
/// can never exist.
#[derive(Debug, Clone, PartialEq)]
pub struct Ladder {
    levels: usize,
    start_level: usize,
    steps: u64,
    advance: Vec<f64>,
}

impl Ladder {
    /// Build a ladder from fractional probabilities, one per transition
    pub fn new(
        level_count: i64,
        start_level: i64,
        step_count: i64,
        probabilities: Vec<f64>,
    ) -> Result<Self> {
        validate(level_count, start_level, step_count, &probabilities)?;

        let start_level = start_level as usize;
        let mut advance = probabilities;
        advance[..start_level - 1].fill(0.0);

        let ladder = Self {
            levels: level_count as usize,
            start_level,
            steps: step_count as u64,
            advance,
        };
        tracing::trace!(?ladder, "Validated ladder");
        Ok(ladder)
    }

    /// Build a ladder from user-typed tokens such as `"45"`, `"45%"` or `"0.45"`.
    ///
    /// The structural checks run before any token is parsed, so a bad level
    /// count is reported even when the tokens are garbage. Tokens below the
    /// start level are never parsed.
    pub fn from_tokens<S: AsRef<str>>(
        level_count: i64,
        start_level: i64,
        step_count: i64,
        tokens: &[S],
    ) -> Result<Self> {
        check_shape(level_count, start_level, step_count, tokens.len())?;

        let first = (start_level - 1) as usize;
        let mut probabilities = vec![0.0; first];
        probabilities.extend(percentage::normalize_all(&tokens[first..])?);
        Self::new(level_count, start_level, step_count, probabilities)
    }

    pub fn levels(&self) -> usize {
        self.levels
    }

    pub fn start_level(&self) -> usize {
        self.start_level
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Effective per-transition probabilities, zeroed below the start level
    pub fn advance_probabilities(&self) -> &[f64] {
        &self.advance
    }

    /// Same ladder, different number of attempts
    pub fn with_steps(mut self, steps: u64) -> Self {
        self.steps = steps;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_count() {
        assert!(matches!(
            validate(1, 1, 0, &[]),
            Err(Error::InvalidLevelCount(1))
        ));
        assert!(matches!(
            validate(-3, 1, 0, &[]),
            Err(Error::InvalidLevelCount(-3))
        ));
        assert!(validate(2, 1, 0, &[0.5]).is_ok());
    }

    #[test]
    fn test_start_level_bounds() {
        assert!(matches!(
            validate(5, 0, 0, &[0.5; 4]),
            Err(Error::InvalidStartLevel { start: 0, levels: 5 })
        ));
        assert!(matches!(
            validate(5, 6, 0, &[0.5; 4]),
            Err(Error::InvalidStartLevel { start: 6, levels: 5 })
        ));
        assert!(validate(5, 5, 0, &[0.5; 4]).is_ok());
    }

    #[test]
    fn test_step_count() {
        assert!(matches!(
            validate(3, 1, -1, &[0.5; 2]),
            Err(Error::InvalidStepCount(-1))
        ));
    }

    #[test]
    fn test_probability_count() {
        assert!(matches!(
            validate(4, 1, 1, &[0.5; 2]),
            Err(Error::ProbabilityCount {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_probability_range() {
        let err = validate(4, 1, 1, &[0.5, 1.5, 0.5]).unwrap_err();
        assert!(matches!(err, Error::InvalidProbability { from: 2, value } if value == 1.5));

        assert!(validate(4, 1, 1, &[0.0, 1.0, -0.1]).is_err());
        assert!(validate(3, 1, 1, &[f64::NAN, 0.5]).is_err());
    }

    #[test]
    fn test_checks_run_in_order() {
        // level count wins over everything else
        assert!(matches!(
            validate(1, 0, -1, &[2.0]),
            Err(Error::InvalidLevelCount(1))
        ));
        // start level before step count
        assert!(matches!(
            validate(3, 9, -1, &[2.0]),
            Err(Error::InvalidStartLevel { .. })
        ));
    }

    #[test]
    fn test_ladder_zeroes_probabilities_below_start() {
        let ladder = Ladder::new(5, 3, 4, vec![0.5, 0.45, 0.4, 0.3]).unwrap();
        assert_eq!(ladder.advance_probabilities(), &[0.0, 0.0, 0.4, 0.3]);
        assert_eq!(ladder.levels(), 5);
        assert_eq!(ladder.start_level(), 3);
        assert_eq!(ladder.steps(), 4);
    }

    #[test]
    fn test_from_tokens() {
        let ladder = Ladder::from_tokens(3, 1, 2, &["50", "45%"]).unwrap();
        assert_eq!(ladder.advance_probabilities(), &[0.5, 0.45]);

        let err = Ladder::from_tokens(3, 1, 2, &["50", "150%"]).unwrap_err();
        assert!(matches!(err, Error::InvalidProbability { from: 2, value } if value == 1.5));

        let err = Ladder::from_tokens(3, 1, 2, &["50", "lots"]).unwrap_err();
        assert!(matches!(err, Error::UnparsablePercentage(_)));
    }

    #[test]
    fn test_from_tokens_structure_checked_first() {
        let err = Ladder::from_tokens(1, 1, 2, &["garbage"]).unwrap_err();
        assert!(matches!(err, Error::InvalidLevelCount(1)));

        let err = Ladder::from_tokens(3, 1, 2, &["garbage"]).unwrap_err();
        assert!(matches!(
            err,
            Error::ProbabilityCount {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_tokens_below_start_ignored() {
        let ladder = Ladder::from_tokens(4, 3, 1, &["x", "50", "50"]).unwrap();
        assert_eq!(ladder.advance_probabilities(), &[0.0, 0.0, 0.5]);

        let ladder = Ladder::from_tokens(4, 3, 1, &["150%", "-2", "50"]).unwrap();
        assert_eq!(ladder.advance_probabilities(), &[0.0, 0.0, 0.5]);

        let err = Ladder::from_tokens(4, 3, 1, &["x", "50", "nope"]).unwrap_err();
        assert!(matches!(err, Error::UnparsablePercentage(ref t) if t == "nope"));
    }

    #[test]
    fn test_probabilities_below_start_not_range_checked() {
        assert!(validate(4, 3, 1, &[1.5, -1.0, 0.5]).is_ok());

        let ladder = Ladder::new(4, 2, 1, vec![7.0, 0.25, 0.5]).unwrap();
        assert_eq!(ladder.advance_probabilities(), &[0.0, 0.25, 0.5]);

        let err = validate(4, 2, 1, &[7.0, 0.25, 1.5]).unwrap_err();
        assert!(matches!(err, Error::InvalidProbability { from: 3, value } if value == 1.5));
    }

    #[test]
    fn test_start_at_top_checks_nothing() {
        let ladder = Ladder::from_tokens(3, 3, 5, &["bad", "worse"]).unwrap();
        assert_eq!(ladder.advance_probabilities(), &[0.0, 0.0]);
    }
}
