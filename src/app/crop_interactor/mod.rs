// Crop interactor - Optional cut of the input before compression

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{error, info};

use crate::domain::model::*;
use crate::ports::*;

pub const CROP_PROMPT_TITLE: &str = "Crop Video?";
pub const CROP_PROMPT_MESSAGE: &str = "Do you want to crop the video?";

/// How the crop step should decide what to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CropChoice {
    /// Ask with a yes/no dialog, then open the crop window on yes
    Ask,
    /// Open the crop window without asking
    Interactive,
    /// Crop the given range without any UI
    Range(CropInterval),
    /// Leave the input untouched
    Skip,
}

/// Interactor for the optional crop step
pub struct CropInteractor {
    prompt_port: Box<dyn PromptPort>,
    picker_port: Box<dyn CropPickerPort>,
    encode_port: Arc<dyn EncodePort>,
    fs_port: Arc<dyn FsPort>,
}

impl CropInteractor {
    pub fn new(
        prompt_port: Box<dyn PromptPort>,
        picker_port: Box<dyn CropPickerPort>,
        encode_port: Arc<dyn EncodePort>,
        fs_port: Arc<dyn FsPort>,
    ) -> Self {
        Self {
            prompt_port,
            picker_port,
            encode_port,
            fs_port,
        }
    }

    /// Decide on a crop range according to `choice`
    pub fn select_interval(&self, input: &Path, choice: CropChoice) -> Option<CropInterval> {
        match choice {
            CropChoice::Skip => None,
            CropChoice::Range(interval) => Some(interval),
            CropChoice::Interactive => self.picker_port.pick_interval(input),
            CropChoice::Ask => {
                if self
                    .prompt_port
                    .confirm(CROP_PROMPT_TITLE, CROP_PROMPT_MESSAGE)
                {
                    self.picker_port.pick_interval(input)
                } else {
                    None
                }
            }
        }
    }

    /// Run the crop step and return the file the compression step should read.
    ///
    /// That is `cropped_output` after a successful crop and `input` otherwise;
    /// crop failures are logged, not returned.
    pub fn prepare_input(&self, input: &Path, cropped_output: &Path, choice: CropChoice) -> PathBuf {
        let Some(interval) = self.select_interval(input, choice) else {
            return input.to_path_buf();
        };

        info!(
            "Cropping {} to {} ({:.2}s) into {}",
            input.display(),
            interval,
            interval.length(),
            cropped_output.display()
        );
        if let Err(e) = self.encode_port.crop(input, cropped_output, &interval) {
            error!("[ERROR] During cropping {}", e);
            return input.to_path_buf();
        }

        if self.fs_port.file_exists(cropped_output) {
            cropped_output.to_path_buf()
        } else {
            error!(
                "Crop reported success but {} is missing",
                cropped_output.display()
            );
            input.to_path_buf()
        }
    }
}
