//! This module defines all error types used throughout the application.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum Error {
    /// Ladder has fewer than two levels
    #[error("Number of levels must be at least 2, got {0}")]
    InvalidLevelCount(i64),

    /// Start level outside `1..=levels`
    #[error("Start level must be between 1 and {levels}, got {start}")]
    InvalidStartLevel { start: i64, levels: i64 },

    /// Negative number of upgrade attempts
    #[error("Number of steps cannot be negative, got {0}")]
    InvalidStepCount(i64),

    /// Normalized probability outside `[0, 1]`
    #[error("Level {from}→{} probability must be between 0 and 100%, got {value}", .from + 1)]
    InvalidProbability { from: usize, value: f64 },

    /// Probability token that is not a number
    #[error("Unparsable probability value: {0:?}")]
    UnparsablePercentage(String),

    /// Probability sequence does not have one entry per transition
    #[error("Expected {expected} transition probabilities, got {actual}")]
    ProbabilityCount { expected: usize, actual: usize },

    /// Input exceeds a configured limit
    #[error("{what} {value} exceeds the configured maximum of {max}")]
    LimitExceeded {
        what: &'static str,
        value: u64,
        max: u64,
    },

    /// IO errors (file not found, permission denied, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration errors
    #[error("Configuration error in {file:?}: {message}")]
    Config { file: PathBuf, message: String },

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error for the given file
    pub fn config(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Check if the error was caused by caller input rather than the environment
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Error::InvalidLevelCount(_)
                | Error::InvalidStartLevel { .. }
                | Error::InvalidStepCount(_)
                | Error::InvalidProbability { .. }
                | Error::UnparsablePercentage(_)
                | Error::ProbabilityCount { .. }
                | Error::LimitExceeded { .. }
        )
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::config("unknown", err.to_string())
    }
}

/// Return early with the given error unless the condition holds
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr $(,)?) => {
        if !($cond) {
            return Err($err.into());
        }
    };
}
