// TOML config adapter - Configuration management using TOML files

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::errors::*;
use crate::domain::model::BitrateFloor;
use crate::domain::rules::DEFAULT_DECAY;

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "eightmb.toml";

/// Resolved application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Output size budget in megabytes
    pub target_mb: u64,
    /// Audio bitrate of the first attempt, in kbps
    pub audio_bitrate_kbps: f64,
    /// Video bitrate floor, in kbps
    pub min_video_kbps: f64,
    /// Audio bitrate floor, in kbps
    pub min_audio_kbps: f64,
    /// Factor applied to both bitrates after an oversized attempt
    pub decay: f64,
    /// Encoder executable
    pub ffmpeg: String,
    /// Prober executable
    pub ffprobe: String,
    /// Encoder thread count; `None` leaves the choice to ffmpeg
    pub threads: Option<usize>,
    /// Default tracing filter
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            target_mb: 8,
            audio_bitrate_kbps: 128.0,
            min_video_kbps: 500.0,
            min_audio_kbps: 64.0,
            decay: DEFAULT_DECAY,
            ffmpeg: "ffmpeg".to_string(),
            ffprobe: "ffprobe".to_string(),
            threads: None,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn floor(&self) -> BitrateFloor {
        BitrateFloor {
            video_kbps: self.min_video_kbps,
            audio_kbps: self.min_audio_kbps,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.target_mb == 0 {
            return Err(DomainError::ConfigFail(
                "target_mb must be at least 1".to_string(),
            ));
        }
        if !(self.decay > 0.0 && self.decay < 1.0) {
            return Err(DomainError::ConfigFail(format!(
                "decay must be in (0, 1), got {}",
                self.decay
            )));
        }
        for (name, value) in [
            ("audio_bitrate_kbps", self.audio_bitrate_kbps),
            ("min_video_kbps", self.min_video_kbps),
            ("min_audio_kbps", self.min_audio_kbps),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(DomainError::ConfigFail(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        if self.threads == Some(0) {
            return Err(DomainError::ConfigFail(
                "threads must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// On-disk layout: settings live under an `[eightmb]` table
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    eightmb: AppConfig,
}

/// TOML configuration adapter
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Per-user config path, e.g. `~/.config/eightmb/config.toml`
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("eightmb").join("config.toml"))
    }

    /// First existing config file: explicit path, working directory, then per-user
    pub fn discover(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return Some(local);
        }
        Self::default_config_path().filter(|path| path.is_file())
    }

    /// Deserialize config from TOML string
    pub fn parse(toml_content: &str) -> Result<AppConfig, DomainError> {
        let file: ConfigFile = toml::from_str(toml_content)
            .map_err(|e| DomainError::ConfigFail(format!("Failed to parse TOML config: {}", e)))?;
        Ok(file.eightmb)
    }

    /// Load configuration from file
    pub fn load_file(path: &Path) -> Result<AppConfig, DomainError> {
        if !path.exists() {
            return Err(DomainError::ConfigFail(format!(
                "Config file does not exist: {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| DomainError::ConfigFail(format!("Failed to read config file: {}", e)))?;

        info!("Loading configuration from: {}", path.display());
        let config = Self::parse(&content)?;
        debug!("Loaded config: {:?}", config);
        Ok(config)
    }

    /// Defaults, overlaid by the discovered config file if there is one
    pub fn load(explicit: Option<&Path>) -> Result<AppConfig, DomainError> {
        match Self::discover(explicit) {
            Some(path) => Self::load_file(&path),
            None => {
                debug!("No config file found, using defaults");
                Ok(AppConfig::default())
            }
        }
    }
}
