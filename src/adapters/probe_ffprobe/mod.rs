//! FFprobe adapter for media file probing
//!
//! Runs `ffprobe -v error -show_entries format=duration -of json <file>` and
//! reads the container duration from its JSON output.

use std::path::Path;
use std::process::{Command, Stdio};

use serde::Deserialize;
use tracing::debug;

use crate::domain::errors::*;
use crate::ports::*;

/// FFprobe-based probe adapter
pub struct FFprobeAdapter {
    ffprobe_path: String,
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    format: Option<ProbeFormat>,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

impl FFprobeAdapter {
    /// Create new FFprobe adapter invoking the given executable
    pub fn new(ffprobe_path: impl Into<String>) -> Self {
        Self {
            ffprobe_path: ffprobe_path.into(),
        }
    }

    /// Extract the format duration from ffprobe's JSON output
    pub fn parse_duration_json(json: &str) -> Result<f64, DomainError> {
        let output: ProbeOutput = serde_json::from_str(json)
            .map_err(|e| DomainError::ProbeFail(format!("Unreadable ffprobe output: {}", e)))?;

        let duration = output
            .format
            .and_then(|format| format.duration)
            .ok_or_else(|| DomainError::ProbeFail("ffprobe reported no duration".to_string()))?;

        let seconds: f64 = duration.trim().parse().map_err(|_| {
            DomainError::ProbeFail(format!("Invalid duration value: {}", duration))
        })?;

        if !(seconds.is_finite() && seconds > 0.0) {
            return Err(DomainError::ProbeFail(format!(
                "Duration must be positive, got {}",
                seconds
            )));
        }
        Ok(seconds)
    }
}

impl ProbePort for FFprobeAdapter {
    fn probe_duration(&self, file_path: &Path) -> Result<f64, DomainError> {
        debug!("Probing duration of {}", file_path.display());

        let output = Command::new(&self.ffprobe_path)
            .args(["-v", "error", "-show_entries", "format=duration", "-of", "json"])
            .arg(file_path)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                DomainError::ProbeFail(format!("Failed to run {}: {}", self.ffprobe_path, e))
            })?;

        if !output.status.success() {
            return Err(DomainError::ProbeFail(format!(
                "ffprobe exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Self::parse_duration_json(&String::from_utf8_lossy(&output.stdout))
    }
}
