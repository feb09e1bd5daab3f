//! Upgrade Odds
//!
//! Computes the probability of ending at each level of an upgrade ladder
//! (loot-box tiers, gear grades, ...) after a fixed number of upgrade attempts.
//!
//! This library provides functionality for:
//! - Parsing user-typed upgrade chances (`45`, `45%`, `0.45`)
//! - Validating ladder configurations
//! - Propagating the level distribution through repeated attempts
//!
//! ```
//! let dist = upgrade_odds::run(2, 1, 1, &["50%"]).unwrap();
//! assert_eq!(dist.as_slice(), &[0.5, 0.5]);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod ladder;

pub use config::Config;
pub use error::{Error, Result};
pub use ladder::{Distribution, Ladder, normalize, run, validate};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Initialize logging with the given log level
///
/// `RUST_LOG` takes precedence. Logs go to stderr so results on stdout stay pipeable.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
