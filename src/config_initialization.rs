//! Configuration initialization and hierarchy management

use anyhow::{Context, Result};
use tracing::debug;

use crate::adapters::{AppConfig, TomlConfigAdapter};
use crate::cli::Cli;

/// Resolve settings with precedence: CLI > Env > File > Defaults.
///
/// Environment values arrive through the same clap fields as the flags, so
/// only the file layer is loaded here.
pub fn initialize_configuration_hierarchy(cli: &Cli) -> Result<AppConfig> {
    let mut config = TomlConfigAdapter::load(cli.config.as_deref())
        .context("Failed to load configuration file")?;

    let overrides = apply_cli_configuration_overrides(&mut config, cli);
    if overrides > 0 {
        debug!("Applied {} CLI/environment configuration overrides", overrides);
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Overlay the flags that were given; returns how many were applied
fn apply_cli_configuration_overrides(config: &mut AppConfig, cli: &Cli) -> usize {
    let mut cli_overrides = 0;
    let encode = &cli.encode;

    if let Some(target_mb) = encode.target_mb {
        config.target_mb = target_mb;
        cli_overrides += 1;
    }
    if let Some(audio) = encode.audio_bitrate {
        config.audio_bitrate_kbps = f64::from(audio);
        cli_overrides += 1;
    }
    if let Some(threads) = encode.threads {
        config.threads = Some(threads);
        cli_overrides += 1;
    }
    if let Some(ffmpeg) = &encode.ffmpeg {
        config.ffmpeg = ffmpeg.clone();
        cli_overrides += 1;
    }
    if let Some(ffprobe) = &encode.ffprobe {
        config.ffprobe = ffprobe.clone();
        cli_overrides += 1;
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
        cli_overrides += 1;
    }

    cli_overrides
}
