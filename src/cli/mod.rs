//! CLI module
//!
//! This module defines the command-line interface using clap and implements
//! the command execution logic.

use crate::{Config, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod commands;
pub mod output;

/// Upgrade ladder probability calculator
#[derive(Parser, Debug)]
#[command(name = "upgrade-odds")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, env = "UPGRADE_ODDS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the level distribution after the upgrade attempts
    Compute {
        #[command(flatten)]
        ladder: LadderArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        output: OutputFormat,

        /// Also show the distribution after every attempt
        #[arg(long)]
        trace: bool,
    },

    /// Validate a ladder and show the effective upgrade chances
    Check {
        #[command(flatten)]
        ladder: LadderArgs,
    },

    /// Show how probability tokens are interpreted
    Normalize {
        /// Tokens such as 45, 45% or 0.45
        #[arg(required = true, allow_negative_numbers = true)]
        tokens: Vec<String>,
    },
}

/// Ladder inputs; anything left out comes from the `[ladder]` config section
#[derive(Args, Debug, Clone, Default)]
pub struct LadderArgs {
    /// Number of levels in the ladder
    #[arg(short, long, allow_negative_numbers = true)]
    pub levels: Option<i64>,

    /// Level holding all the mass before the first attempt
    #[arg(short, long, allow_negative_numbers = true)]
    pub start: Option<i64>,

    /// Number of upgrade attempts
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    pub steps: Option<i64>,

    /// Upgrade chance per transition, lowest level first (e.g. 50,45%,0.4)
    #[arg(
        short,
        long,
        value_delimiter = ',',
        allow_negative_numbers = true
    )]
    pub probabilities: Option<Vec<String>>,
}

/// Fully resolved raw ladder inputs, not yet validated
#[derive(Debug, Clone, PartialEq)]
pub struct LadderInput {
    pub levels: i64,
    pub start_level: i64,
    pub steps: i64,
    pub tokens: Vec<String>,
}

impl LadderArgs {
    /// Fill the gaps from the configured ladder.
    ///
    /// Limits are checked before the default tokens are expanded to the
    /// requested level count.
    pub fn resolve(self, config: &Config) -> Result<LadderInput> {
        let defaults = &config.ladder;
        let levels = self.levels.unwrap_or(defaults.levels);
        let steps = self.steps.unwrap_or(defaults.steps);
        config.limits.check(levels, steps)?;

        Ok(LadderInput {
            levels,
            start_level: self.start.unwrap_or(defaults.start_level),
            steps,
            tokens: self
                .probabilities
                .unwrap_or_else(|| defaults.tokens_for(levels)),
        })
    }
}

/// Output format types
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text table
    Table,
}

/// Execute the CLI command
pub fn execute(args: Cli, config: Config) -> Result<()> {
    match args.command {
        Commands::Compute {
            ladder,
            output,
            trace,
        } => {
            let input = ladder.resolve(&config)?;
            if trace {
                config.limits.check_trace(input.steps.max(0) as u64)?;
            }
            commands::compute::execute(input, output, trace)
        }
        Commands::Check { ladder } => commands::check::execute(ladder.resolve(&config)?),
        Commands::Normalize { tokens } => commands::normalize::execute(&tokens),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "upgrade-odds",
            "compute",
            "--levels",
            "5",
            "--start",
            "2",
            "-n",
            "10",
            "--probabilities",
            "50,45%,0.4,30",
            "--output",
            "json",
        ])
        .unwrap();

        match cli.command {
            Commands::Compute { ladder, output, trace } => {
                assert_eq!(ladder.levels, Some(5));
                assert_eq!(ladder.start, Some(2));
                assert_eq!(ladder.steps, Some(10));
                assert_eq!(
                    ladder.probabilities,
                    Some(vec![
                        "50".to_string(),
                        "45%".to_string(),
                        "0.4".to_string(),
                        "30".to_string()
                    ])
                );
                assert_eq!(output, OutputFormat::Json);
                assert!(!trace);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_negative_values_reach_validation() {
        let cli = Cli::try_parse_from(["upgrade-odds", "check", "--steps", "-1"]).unwrap();
        match cli.command {
            Commands::Check { ladder } => assert_eq!(ladder.steps, Some(-1)),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_normalize_requires_tokens() {
        assert!(Cli::try_parse_from(["upgrade-odds", "normalize"]).is_err());
        assert!(Cli::try_parse_from(["upgrade-odds", "normalize", "50%", "-5"]).is_ok());
    }

    #[test]
    fn test_resolve_uses_config_defaults() {
        let config = Config::default();

        let input = LadderArgs::default().resolve(&config).unwrap();
        assert_eq!(
            input,
            LadderInput {
                levels: 5,
                start_level: 1,
                steps: 4,
                tokens: vec!["50".into(), "45".into(), "40".into(), "30".into()],
            }
        );

        let input = LadderArgs {
            levels: Some(3),
            steps: Some(9),
            ..Default::default()
        }
        .resolve(&config)
        .unwrap();
        assert_eq!(input.levels, 3);
        assert_eq!(input.steps, 9);
        assert_eq!(input.tokens, vec!["50", "45"]);
    }

    #[test]
    fn test_resolve_checks_limits_first() {
        let mut config = Config::default();
        config.limits.max_levels = 10;
        config.limits.max_steps = 100;

        let args = LadderArgs {
            levels: Some(i64::MAX),
            ..Default::default()
        };
        assert!(matches!(
            args.resolve(&config),
            Err(crate::Error::LimitExceeded { .. })
        ));

        let args = LadderArgs {
            steps: Some(101),
            ..Default::default()
        };
        assert!(matches!(
            args.resolve(&config),
            Err(crate::Error::LimitExceeded { .. })
        ));
    }
}
