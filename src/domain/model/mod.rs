// Domain models - Core types and data structures

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;


/// Bytes per megabyte used for size budgets
pub const BYTES_PER_MEGABYTE: u64 = 1024 * 1024;

/// Time specification with precision - represents time in seconds with fractional precision
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct TimeSpec {
    pub seconds: f64,
}

impl TimeSpec {
    /// Create a new TimeSpec from seconds
    pub fn from_seconds(seconds: f64) -> Self {
        Self { seconds }
    }

    pub fn as_seconds(&self) -> f64 {
        self.seconds
    }

    /// Parse time string in various formats
    pub fn parse(time_str: &str) -> Result<Self, DomainError> {
        let trimmed = time_str.trim();

        // Try parsing as seconds (float)
        if let Ok(seconds) = trimmed.parse::<f64>() {
            if seconds < 0.0 || !seconds.is_finite() {
                return Err(DomainError::BadArgs(format!(
                    "Time must be a non-negative number: {}",
                    trimmed
                )));
            }
            return Ok(Self::from_seconds(seconds));
        }

        let parts: Vec<&str> = trimmed.split(':').collect();
        match parts.as_slice() {
            [minutes, seconds] => {
                let minutes = parse_component::<u32>(minutes, "minutes")?;
                let seconds = parse_seconds_component(seconds)?;
                Ok(Self::from_seconds(minutes as f64 * 60.0 + seconds))
            }
            [hours, minutes, seconds] => {
                let hours = parse_component::<u32>(hours, "hours")?;
                let minutes = parse_component::<u32>(minutes, "minutes")?;
                if minutes >= 60 {
                    return Err(DomainError::BadArgs(
                        "Minutes must be less than 60".to_string(),
                    ));
                }
                let seconds = parse_seconds_component(seconds)?;
                Ok(Self::from_seconds(
                    hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds,
                ))
            }
            _ => Err(DomainError::BadArgs(format!(
                "Invalid time format '{}'. Supported formats: seconds (e.g., 123.45), MM:SS.ms (e.g., 2:30.5), HH:MM:SS.ms (e.g., 1:02:30.5)",
                trimmed
            ))),
        }
    }

    /// Format as HH:MM:SS.ms, dropping the hour field when zero
    pub fn format_hms(&self) -> String {
        let total_ms = (self.seconds * 1000.0).round() as u64;
        let hours = total_ms / 3_600_000;
        let minutes = (total_ms % 3_600_000) / 60_000;
        let seconds = (total_ms % 60_000) / 1000;
        let milliseconds = total_ms % 1000;

        if hours > 0 {
            format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, milliseconds)
        } else {
            format!("{:02}:{:02}.{:03}", minutes, seconds, milliseconds)
        }
    }

    /// Seconds as passed to the encoder's `-ss` / `-to` flags
    pub fn encoder_arg(&self) -> String {
        format!("{:.3}", self.seconds)
    }
}

impl fmt::Display for TimeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_hms())
    }
}

fn parse_component<T: std::str::FromStr>(value: &str, name: &str) -> Result<T, DomainError> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| DomainError::BadArgs(format!("Invalid {} format: {}", name, value)))
}

fn parse_seconds_component(value: &str) -> Result<f64, DomainError> {
    let seconds = parse_component::<f64>(value, "seconds")?;
    if !(0.0..60.0).contains(&seconds) {
        return Err(DomainError::BadArgs(
            "Seconds must be in the range 0..60".to_string(),
        ));
    }
    Ok(seconds)
}

/// Target output size in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeBudget {
    pub bytes: u64,
}

impl SizeBudget {
    pub fn from_megabytes(megabytes: u64) -> Self {
        Self {
            bytes: megabytes.saturating_mul(BYTES_PER_MEGABYTE),
        }
    }

    /// Budget expressed in bits
    pub fn bits(&self) -> f64 {
        self.bytes as f64 * 8.0
    }

    /// Whether a file of `size` bytes satisfies the budget
    pub fn fits(&self, size: u64) -> bool {
        size <= self.bytes
    }
}

impl fmt::Display for SizeBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bytes", self.bytes)
    }
}

/// Video and audio bitrates in kbps for one encode attempt
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bitrates {
    pub video_kbps: f64,
    pub audio_kbps: f64,
}

impl Bitrates {
    pub fn new(video_kbps: f64, audio_kbps: f64) -> Self {
        Self {
            video_kbps,
            audio_kbps,
        }
    }

    /// Both bitrates scaled by `factor`
    pub fn decayed(&self, factor: f64) -> Self {
        Self {
            video_kbps: self.video_kbps * factor,
            audio_kbps: self.audio_kbps * factor,
        }
    }

    /// Encoder argument for `-b:v`, e.g. `"1840k"`
    pub fn video_arg(&self) -> String {
        kbps_arg(self.video_kbps)
    }

    /// Encoder argument for `-b:a`, e.g. `"128k"`
    pub fn audio_arg(&self) -> String {
        kbps_arg(self.audio_kbps)
    }
}

impl fmt::Display for Bitrates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "video {} / audio {}", self.video_arg(), self.audio_arg())
    }
}

fn kbps_arg(kbps: f64) -> String {
    // truncation, never rounding up past the computed rate
    format!("{}k", kbps.trunc() as i64)
}

/// Lowest bitrates the search may try
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BitrateFloor {
    pub video_kbps: f64,
    pub audio_kbps: f64,
}

impl BitrateFloor {
    /// Whether `bitrates` are still strictly above both floors
    pub fn allows(&self, bitrates: &Bitrates) -> bool {
        bitrates.video_kbps > self.video_kbps && bitrates.audio_kbps > self.audio_kbps
    }
}

impl Default for BitrateFloor {
    fn default() -> Self {
        Self {
            video_kbps: 500.0,
            audio_kbps: 64.0,
        }
    }
}

/// Start/end pair for a crop, always ordered
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropInterval {
    pub start: TimeSpec,
    pub end: TimeSpec,
}

impl CropInterval {
    pub fn new(start: TimeSpec, end: TimeSpec) -> Result<Self, DomainError> {
        if start.seconds < 0.0 {
            return Err(DomainError::InvalidTimeRange(
                "Start time cannot be negative".to_string(),
            ));
        }
        if start >= end {
            return Err(DomainError::InvalidTimeRange(format!(
                "start ({}) must be less than end ({})",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Build an interval from optional marks, discarding anything unset or unordered
    pub fn from_marks(start: Option<f64>, end: Option<f64>) -> Option<Self> {
        match (start, end) {
            (Some(start), Some(end)) => {
                Self::new(TimeSpec::from_seconds(start), TimeSpec::from_seconds(end)).ok()
            }
            _ => None,
        }
    }

    pub fn length(&self) -> f64 {
        self.end.seconds - self.start.seconds
    }
}

impl fmt::Display for CropInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

/// Frame-indexed view of a video stream
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameTimeline {
    pub frame_count: u64,
    pub fps: f64,
}

impl FrameTimeline {
    pub fn new(frame_count: u64, fps: f64) -> Result<Self, DomainError> {
        if !(fps.is_finite() && fps > 0.0) {
            return Err(DomainError::DecodeFail(format!("Invalid frame rate: {}", fps)));
        }
        if frame_count == 0 {
            return Err(DomainError::DecodeFail("Video has no frames".to_string()));
        }
        Ok(Self { frame_count, fps })
    }

    /// Index of the final frame
    pub fn last_frame(&self) -> u64 {
        self.frame_count.saturating_sub(1)
    }

    /// Presentation time of `frame` in seconds
    pub fn time_of(&self, frame: u64) -> f64 {
        frame as f64 / self.fps
    }

    pub fn duration(&self) -> f64 {
        self.frame_count as f64 / self.fps
    }

    /// Wall-clock delay between frames during playback
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps)
    }
}

/// Everything the size-fitting driver needs for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressionRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub budget: SizeBudget,
    pub initial_audio_kbps: f64,
}

/// Result of one encoder invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodeAttempt {
    pub bitrates: Bitrates,
    /// Output size after the attempt, `None` when the encoder failed
    pub output_size: Option<u64>,
}

/// How a compression run ended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CompressionOutcome {
    /// Input was already within budget and was moved to the output path
    AlreadyFits { size: u64 },
    /// An attempt produced output within budget
    Fitted {
        attempts: Vec<EncodeAttempt>,
        size: u64,
    },
    /// Bitrates reached the floor before the output fit
    FloorReached { attempts: Vec<EncodeAttempt> },
    /// The encoder failed; whatever output exists is left in place
    EncoderFailed {
        attempts: Vec<EncodeAttempt>,
        message: String,
    },
}

impl CompressionOutcome {
    pub fn attempts(&self) -> &[EncodeAttempt] {
        match self {
            CompressionOutcome::AlreadyFits { .. } => &[],
            CompressionOutcome::Fitted { attempts, .. }
            | CompressionOutcome::FloorReached { attempts }
            | CompressionOutcome::EncoderFailed { attempts, .. } => attempts,
        }
    }

    pub fn is_within_budget(&self) -> bool {
        matches!(
            self,
            CompressionOutcome::AlreadyFits { .. } | CompressionOutcome::Fitted { .. }
        )
    }
}
