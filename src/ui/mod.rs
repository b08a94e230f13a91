//! Interactive crop selection
//!
//! A small eframe window with a frame slider, play/pause, and start/end
//! markers. Frames come from the libav decoder; playback is paced by a
//! helper thread that wakes the UI loop once per source frame.

use std::path::Path;

use tracing::{debug, error, info};

use crate::adapters::decode_libav::LibavFrameSource;
use crate::domain::model::CropInterval;
use crate::ports::{CropPickerPort, FrameSource};

pub mod crop_window;
pub mod playback;
pub mod scrubber;

pub use crop_window::run_crop_window;

/// Widest preview frame shown in the window
pub const PREVIEW_MAX_WIDTH: u32 = 560;

/// Crop picker backed by the eframe window
#[derive(Debug, Default)]
pub struct CropWindowPicker;

impl CropWindowPicker {
    pub fn new() -> Self {
        Self
    }
}

impl CropPickerPort for CropWindowPicker {
    fn pick_interval(&self, input: &Path) -> Option<CropInterval> {
        let source = match LibavFrameSource::open(input, PREVIEW_MAX_WIDTH) {
            Ok(source) => source,
            Err(e) => {
                error!("[ERROR] Unable to open video: {}", e);
                return None;
            }
        };

        let timeline = source.timeline();
        debug!(
            "Opened {}: {} frames at {:.3} fps, {:.2}s",
            input.display(),
            timeline.frame_count,
            timeline.fps,
            timeline.duration()
        );

        match run_crop_window(source) {
            Ok(Some(interval)) => {
                info!("Crop range selected: {}", interval);
                Some(interval)
            }
            Ok(None) => {
                info!("No usable crop range marked, skipping crop");
                None
            }
            Err(e) => {
                error!("Crop window failed: {}", e);
                None
            }
        }
    }
}
