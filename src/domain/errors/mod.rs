// Domain errors - Error types for the domain layer

use std::fmt;

/// Domain-specific error types
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Invalid arguments provided
    BadArgs(String),
    /// Media probing failed
    ProbeFail(String),
    /// External encoder failed or could not be spawned
    EncodeFail(String),
    /// Frame decoder failed
    DecodeFail(String),
    /// File system operation failed
    FsFail(String),
    /// Invalid time range
    InvalidTimeRange(String),
    /// Configuration is unusable
    ConfigFail(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::BadArgs(msg) => write!(f, "Bad arguments: {}", msg),
            DomainError::ProbeFail(msg) => write!(f, "Probe failed: {}", msg),
            DomainError::EncodeFail(msg) => write!(f, "Encode failed: {}", msg),
            DomainError::DecodeFail(msg) => write!(f, "Decode failed: {}", msg),
            DomainError::FsFail(msg) => write!(f, "File system error: {}", msg),
            DomainError::InvalidTimeRange(msg) => write!(f, "Invalid time range: {}", msg),
            DomainError::ConfigFail(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
