//! eightmb
//!
//! Shrinks a video file to a size budget by re-running ffmpeg at decreasing
//! bitrates, with an optional interactive crop step beforehand.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod ports;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use domain::errors::DomainError;
pub use domain::model::{Bitrates, CompressionOutcome, CompressionRequest, CropInterval, SizeBudget};
pub use error::{EightMbError, EightMbResult};
