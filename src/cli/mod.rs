//! CLI module for eightmb
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::Parser;

pub mod args;
pub mod commands;

/// Printed on stdout when no input is given
pub const USAGE_MESSAGE: &str = "Drag and drop your video";

/// eightmb
///
/// Shrinks a video to a target size by re-encoding at decreasing bitrates,
/// optionally cropping it first.
#[derive(Parser, Debug)]
#[command(name = "eightmb")]
#[command(about = "Shrink a video to a target size, optionally cropping it first")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Input video file
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub encode: args::EncodeArgs,

    #[command(flatten)]
    pub crop: args::CropArgs,

    /// Configuration file [default: ./eightmb.toml, then the per-user config dir]
    #[arg(short, long, env = "EIGHTMB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Logging level or filter directive [default: info]
    #[arg(long, env = "EIGHTMB_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,
}
