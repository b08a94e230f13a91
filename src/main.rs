//! eightmb
//!
//! Shrinks a video to a target size (8 MB by default), optionally cropping it
//! first in a small preview window.
//!
//! # Usage
//!
//! ```bash
//! eightmb video.mp4
//! eightmb video.mp4 --target-mb 25 --no-crop
//! eightmb video.mp4 --start 00:01:00 --end 00:01:30
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use eightmb::cli::{commands, Cli, USAGE_MESSAGE};
use eightmb::config_initialization::initialize_configuration_hierarchy;
use eightmb::utils::logging::{LogFormat, LoggingConfig, LoggingSystem};

/// Main entry point for the eightmb CLI application
fn main() -> Result<()> {
    let cli = Cli::parse();

    let Some(input) = cli.input.clone() else {
        println!("{}", USAGE_MESSAGE);
        std::process::exit(1);
    };

    let config = initialize_configuration_hierarchy(&cli)?;

    let logging = LoggingSystem::new(LoggingConfig {
        level: config.log_level.clone(),
        format: if cli.log_json {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        },
        ..Default::default()
    });
    logging.initialize()?;
    logging.log_system_info();

    let outcome = commands::compress(&cli, &input, &config)?;

    if outcome.is_within_budget() {
        info!("eightmb completed");
    } else {
        warn!("eightmb finished without reaching the target size");
    }
    Ok(())
}
