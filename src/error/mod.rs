//! Error handling module for eightmb

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Main error type for eightmb operations
#[derive(Error, Debug)]
pub enum EightMbError {
    /// Input file not found or inaccessible
    #[error("Input file not found: {path}")]
    InputFileNotFound { path: String },

    /// Invalid time format
    #[error("Invalid time format: {time}. Expected HH:MM:SS.ms, MM:SS.ms, or seconds")]
    InvalidTimeFormat { time: String },

    /// Time range validation error
    #[error("Invalid time range: start ({start}) must be less than end ({end})")]
    InvalidTimeRange { start: String, end: String },

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Crop window could not be shown
    #[error("User interface error: {message}")]
    UiError { message: String },

    /// Domain layer failure
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Result type alias for eightmb operations
pub type EightMbResult<T> = std::result::Result<T, EightMbError>;
