//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;
use clap_num::number_range;

use crate::app::CropChoice;
use crate::domain::model::{CropInterval, TimeSpec};
use crate::error::{EightMbError, EightMbResult};

fn parse_target_mb(s: &str) -> Result<u64, String> {
    number_range(s, 1, 1 << 20)
}

fn parse_audio_kbps(s: &str) -> Result<u32, String> {
    number_range(s, 8, 1024)
}

fn parse_threads(s: &str) -> Result<usize, String> {
    number_range(s, 1, 1024)
}

/// Size and encoder settings
#[derive(Args, Debug, Default)]
pub struct EncodeArgs {
    /// Output file path [default: compressed_<input name> in the working directory]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Target output size in megabytes [default: 8]
    #[arg(short = 't', long, env = "EIGHTMB_TARGET_MB", value_parser = parse_target_mb)]
    pub target_mb: Option<u64>,

    /// Audio bitrate of the first attempt, in kbps [default: 128]
    #[arg(short = 'a', long, env = "EIGHTMB_AUDIO_BITRATE", value_parser = parse_audio_kbps)]
    pub audio_bitrate: Option<u32>,

    /// Encoder threads [default: chosen by ffmpeg]
    #[arg(long, env = "EIGHTMB_THREADS", value_parser = parse_threads)]
    pub threads: Option<usize>,

    /// ffmpeg executable
    #[arg(long, env = "EIGHTMB_FFMPEG")]
    pub ffmpeg: Option<String>,

    /// ffprobe executable
    #[arg(long, env = "EIGHTMB_FFPROBE")]
    pub ffprobe: Option<String>,
}

/// How the crop step runs
#[derive(Args, Debug, Default)]
pub struct CropArgs {
    /// Open the crop window without asking first
    #[arg(long, conflicts_with_all = ["no_crop", "start"])]
    pub crop: bool,

    /// Never crop
    #[arg(long, conflicts_with = "start")]
    pub no_crop: bool,

    /// Crop start (HH:MM:SS.ms, MM:SS.ms, or seconds); skips the crop window
    #[arg(short, long, requires = "end")]
    pub start: Option<String>,

    /// Crop end (HH:MM:SS.ms, MM:SS.ms, or seconds)
    #[arg(short, long, requires = "start")]
    pub end: Option<String>,
}

impl CropArgs {
    pub fn choice(&self) -> EightMbResult<CropChoice> {
        if self.no_crop {
            return Ok(CropChoice::Skip);
        }
        if let (Some(start), Some(end)) = (&self.start, &self.end) {
            let start_time = TimeSpec::parse(start).map_err(|_| EightMbError::InvalidTimeFormat {
                time: start.clone(),
            })?;
            let end_time = TimeSpec::parse(end).map_err(|_| EightMbError::InvalidTimeFormat {
                time: end.clone(),
            })?;
            let interval = CropInterval::new(start_time, end_time).map_err(|_| {
                EightMbError::InvalidTimeRange {
                    start: start.clone(),
                    end: end.clone(),
                }
            })?;
            return Ok(CropChoice::Range(interval));
        }
        if self.crop {
            return Ok(CropChoice::Interactive);
        }
        Ok(CropChoice::Ask)
    }
}
