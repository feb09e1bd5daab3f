//! Configuration management
//!
//! This module handles loading and managing configuration from:
//! - Command-line arguments
//! - Environment variables
//! - Configuration files (TOML)
//! - Defaults

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub ladder: LadderConfig,

    #[serde(default)]
    pub limits: LimitsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Ladder used when the command line leaves values out
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LadderConfig {
    #[serde(default = "default_levels")]
    pub levels: i64,

    #[serde(default = "default_start_level")]
    pub start_level: i64,

    #[serde(default = "default_steps")]
    pub steps: i64,

    /// Upgrade chance per transition, lowest level first
    #[serde(default = "default_probabilities")]
    pub probabilities: Vec<ProbabilityToken>,
}

/// A configured upgrade chance, written either as a number or as text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProbabilityToken {
    Number(f64),
    Text(String),
}

/// Guards against requests that would take unreasonable time or memory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "default_max_levels")]
    pub max_levels: u64,

    #[serde(default = "default_max_steps")]
    pub max_steps: u64,

    /// Per-attempt output keeps every distribution in memory
    #[serde(default = "default_max_trace_steps")]
    pub max_trace_steps: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions

fn default_levels() -> i64 {
    5
}

fn default_start_level() -> i64 {
    1
}

fn default_steps() -> i64 {
    4
}

fn default_probabilities() -> Vec<ProbabilityToken> {
    ["50", "45", "40", "30"]
        .into_iter()
        .map(|t| ProbabilityToken::Text(t.to_string()))
        .collect()
}

/// Chance assumed for transitions the configuration does not mention
pub const FALLBACK_PROBABILITY: &str = "50";

fn default_max_levels() -> u64 {
    1_000
}

fn default_max_steps() -> u64 {
    1_000_000
}

fn default_max_trace_steps() -> u64 {
    10_000
}

fn default_log_level() -> String {
    "info".to_string()
}

// Default implementations

impl Default for LadderConfig {
    fn default() -> Self {
        Self {
            levels: default_levels(),
            start_level: default_start_level(),
            steps: default_steps(),
            probabilities: default_probabilities(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_levels: default_max_levels(),
            max_steps: default_max_steps(),
            max_trace_steps: default_max_trace_steps(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl fmt::Display for ProbabilityToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbabilityToken::Number(n) => write!(f, "{n}"),
            ProbabilityToken::Text(t) => f.write_str(t),
        }
    }
}

impl LadderConfig {
    /// Configured tokens fitted to a ladder of `levels` levels.
    ///
    /// Missing transitions fall back to [`FALLBACK_PROBABILITY`] and extra
    /// entries are dropped, so the defaults keep working when only the level
    /// count is overridden.
    pub fn tokens_for(&self, levels: i64) -> Vec<String> {
        let transitions = usize::try_from(levels.saturating_sub(1)).unwrap_or(0);
        (0..transitions)
            .map(|i| {
                self.probabilities
                    .get(i)
                    .map(ToString::to_string)
                    .unwrap_or_else(|| FALLBACK_PROBABILITY.to_string())
            })
            .collect()
    }
}

impl LimitsConfig {
    /// Reject level and step counts above the configured maximums.
    ///
    /// Negative values pass through; the ladder validation reports those.
    pub fn check(&self, levels: i64, steps: i64) -> Result<()> {
        if let Ok(levels) = u64::try_from(levels)
            && levels > self.max_levels
        {
            return Err(Error::LimitExceeded {
                what: "Level count",
                value: levels,
                max: self.max_levels,
            });
        }
        if let Ok(steps) = u64::try_from(steps)
            && steps > self.max_steps
        {
            return Err(Error::LimitExceeded {
                what: "Step count",
                value: steps,
                max: self.max_steps,
            });
        }
        Ok(())
    }

    /// Reject per-attempt output for runs longer than the trace limit
    pub fn check_trace(&self, steps: u64) -> Result<()> {
        if steps > self.max_trace_steps {
            return Err(Error::LimitExceeded {
                what: "Traced step count",
                value: steps,
                max: self.max_trace_steps,
            });
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::config(path, format!("Failed to read config file: {}", e)))?;

        toml::from_str(&contents)
            .map_err(|e| Error::config(path, format!("Failed to parse config file: {}", e)))
    }

    /// Find the first existing config file in the default locations
    ///
    /// Searches in order:
    /// 1. ./upgrade-odds.toml
    /// 2. ~/.upgrade-odds/config.toml
    /// 3. /etc/upgrade-odds/config.toml
    pub fn locate() -> Option<PathBuf> {
        let mut paths = vec![PathBuf::from("upgrade-odds.toml")];
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".upgrade-odds").join("config.toml"));
        }
        paths.push(PathBuf::from("/etc/upgrade-odds/config.toml"));

        paths.into_iter().find(|p| p.exists())
    }
}
