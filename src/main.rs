//! Upgrade Odds

use clap::Parser;
use upgrade_odds::{Config, Result, VERSION, cli, init_logging};

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    let config_path = args.config.clone().or_else(Config::locate);
    let config = match &config_path {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    let level = if args.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    init_logging(level);

    tracing::info!("Upgrade Odds v{}", VERSION);
    tracing::debug!("Parsed arguments: {:?}", args);
    match &config_path {
        Some(path) => tracing::debug!("Loaded configuration from {:?}: {:?}", path, config),
        None => tracing::debug!("No config file found, using defaults"),
    }

    if let Err(e) = cli::execute(args, config) {
        if e.is_invalid_input() {
            tracing::warn!("Rejected input: {}", e);
        } else {
            tracing::error!("{}", e);
        }
        return Err(e);
    }

    Ok(())
}
