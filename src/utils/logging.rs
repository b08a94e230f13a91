//! Logging setup

use tracing_subscriber::EnvFilter;

use crate::error::{EightMbError, EightMbResult};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable text
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

/// Logging configuration options
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `eightmb=debug`
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// Include target module information
    pub target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            target: false,
        }
    }
}

impl LoggingConfig {
    /// `RUST_LOG` wins over the configured level when it is set
    pub fn env_filter(&self) -> EightMbResult<EnvFilter> {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }
        EnvFilter::try_new(&self.level).map_err(|e| EightMbError::ConfigError {
            message: format!("Invalid log level '{}': {}", self.level, e),
        })
    }
}

/// Logging system manager
pub struct LoggingSystem {
    config: LoggingConfig,
}

impl LoggingSystem {
    pub fn new(config: LoggingConfig) -> Self {
        Self { config }
    }

    /// Install the global subscriber; events go to stdout
    pub fn initialize(&self) -> EightMbResult<()> {
        let filter = self.config.env_filter()?;
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(self.config.target);

        let installed = match self.config.format {
            LogFormat::Pretty => builder.try_init(),
            LogFormat::Json => builder.json().try_init(),
        };
        installed.map_err(|e| EightMbError::ConfigError {
            message: format!("Failed to install logger: {}", e),
        })?;

        tracing::debug!("Logging initialized with {:?}", self.config);
        Ok(())
    }

    /// Log version and platform
    pub fn log_system_info(&self) {
        tracing::info!("eightmb {}", env!("CARGO_PKG_VERSION"));

        #[cfg(target_os = "macos")]
        tracing::debug!("Platform: macOS");
        #[cfg(target_os = "linux")]
        tracing::debug!("Platform: Linux");
        #[cfg(target_os = "windows")]
        tracing::debug!("Platform: Windows");
    }
}

impl Default for LoggingSystem {
    fn default() -> Self {
        Self::new(LoggingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_malformed_level() {
        let config = LoggingConfig {
            level: "eightmb=loud".to_string(),
            ..Default::default()
        };
        if std::env::var_os("RUST_LOG").is_none() {
            assert!(config.env_filter().is_err());
        }
    }

    #[test]
    fn test_accepts_directives() {
        let config = LoggingConfig {
            level: "warn,eightmb=debug".to_string(),
            ..Default::default()
        };
        assert!(config.env_filter().is_ok());
    }
}
