// Ports - Interface definitions (contracts)

use std::path::Path;

use crate::domain::errors::*;
use crate::domain::model::*;

/// Port for media file probing
pub trait ProbePort: Send + Sync {
    /// Container duration in seconds
    fn probe_duration(&self, file_path: &Path) -> Result<f64, DomainError>;
}

/// Port for the external encoder
pub trait EncodePort: Send + Sync {
    /// Re-encode `input` into `output` at the given bitrates
    fn encode_with_bitrates(
        &self,
        input: &Path,
        output: &Path,
        bitrates: &Bitrates,
    ) -> Result<(), DomainError>;

    /// Write the `interval` range of `input` to `output`
    fn crop(&self, input: &Path, output: &Path, interval: &CropInterval)
        -> Result<(), DomainError>;
}

/// Port for file system operations
pub trait FsPort: Send + Sync {
    /// Check if file exists
    fn file_exists(&self, file_path: &Path) -> bool;

    /// Get file size
    fn get_file_size(&self, file_path: &Path) -> Result<u64, DomainError>;

    /// Move file, replacing the destination
    fn move_file(&self, from: &Path, to: &Path) -> Result<(), DomainError>;
}

/// Port for yes/no questions to the user
pub trait PromptPort: Send + Sync {
    fn confirm(&self, title: &str, message: &str) -> bool;
}

/// Port for interactively choosing a crop range
pub trait CropPickerPort {
    /// `None` when the user picked nothing usable or the video could not be opened
    fn pick_interval(&self, input: &Path) -> Option<CropInterval>;
}

/// Decoded frame in tightly packed RGBA
#[derive(Debug, Clone, PartialEq)]
pub struct RgbaFrame {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

/// Port for random-access frame decoding
pub trait FrameSource {
    /// Frame count and rate of the decoded stream
    fn timeline(&self) -> FrameTimeline;

    /// Seek to `frame` and decode it; `Ok(None)` past the end of stream
    fn frame_at(&mut self, frame: u64) -> Result<Option<RgbaFrame>, DomainError>;
}
