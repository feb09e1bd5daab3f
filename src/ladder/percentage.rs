//! Percentage token parsing
//!
//! Users type upgrade chances either as fractions (`0.45`), as bare
//! percentages (`45`) or with a percent sign (`45%`). Everything is
//! normalized into a fraction before it reaches the engine.

use crate::error::{Error, Result};

/// Convert a probability token into a fraction.
///
/// - surrounding whitespace is ignored
/// - one trailing `%` is stripped
/// - values strictly greater than 1 are read as percentages and divided by 100
/// - values up to and including 1 are taken as fractions, so `"1"` is 100%
///
/// The result is not range-checked here: `"150%"` normalizes to `1.5` and
/// `"-5"` to `-5.0`. Range validation happens when the ladder is built.
pub fn normalize(token: &str) -> Result<f64> {
    let trimmed = token.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();

    let value: f64 = number
        .parse()
        .map_err(|_| Error::UnparsablePercentage(token.to_string()))?;

    if value > 1.0 {
        Ok(value / 100.0)
    } else {
        Ok(value)
    }
}

/// Normalize a sequence of tokens, failing on the first unparsable one
pub fn normalize_all<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<f64>> {
    tokens.iter().map(|t| normalize(t.as_ref())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_forms() {
        assert_eq!(normalize("50").unwrap(), 0.5);
        assert_eq!(normalize("50%").unwrap(), 0.5);
        assert_eq!(normalize("0.5").unwrap(), 0.5);
        assert_eq!(normalize("  45 % ").unwrap(), 0.45);
        assert_eq!(normalize("100%").unwrap(), 1.0);
    }

    #[test]
    fn test_one_is_a_fraction() {
        assert_eq!(normalize("1").unwrap(), 1.0);
        assert_eq!(normalize("1%").unwrap(), 1.0);
        assert_eq!(normalize("1.5").unwrap(), 0.015);
    }

    #[test]
    fn test_out_of_range_passes_through() {
        assert_eq!(normalize("150%").unwrap(), 1.5);
        assert_eq!(normalize("-5").unwrap(), -5.0);
        assert_eq!(normalize("0").unwrap(), 0.0);
    }

    #[test]
    fn test_unparsable() {
        for token in ["", "%", "abc", "50%%", "5 0"] {
            let err = normalize(token).unwrap_err();
            assert!(
                matches!(err, Error::UnparsablePercentage(ref t) if t == token),
                "token {token:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_normalize_all() {
        let values = normalize_all(&["50", "45%", "0.4"]).unwrap();
        assert_eq!(values, vec![0.5, 0.45, 0.4]);

        assert!(normalize_all(&["50", "x"]).is_err());
        assert!(normalize_all::<&str>(&[]).unwrap().is_empty());
    }
}
