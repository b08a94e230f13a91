// Compress interactor - Fits a video into a size budget by bitrate search

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::ports::*;

#[cfg(test)]
mod tests;

/// Interactor for the size-fitting use case
pub struct CompressInteractor {
    probe_port: Arc<dyn ProbePort>,
    encode_port: Arc<dyn EncodePort>,
    fs_port: Arc<dyn FsPort>,
    floor: BitrateFloor,
    decay: f64,
}

impl CompressInteractor {
    /// Create new compress interactor with injected ports
    pub fn new(
        probe_port: Arc<dyn ProbePort>,
        encode_port: Arc<dyn EncodePort>,
        fs_port: Arc<dyn FsPort>,
        floor: BitrateFloor,
        decay: f64,
    ) -> Self {
        Self {
            probe_port,
            encode_port,
            fs_port,
            floor,
            decay,
        }
    }

    /// Re-encode `request.input` until the output fits the budget.
    ///
    /// An input already within budget is moved (not copied) to the output
    /// path. Encoder failures end the search and are reported through the
    /// outcome, leaving any partial output in place; probe and filesystem
    /// failures are returned as errors.
    pub fn compress(&self, request: &CompressionRequest) -> Result<CompressionOutcome, DomainError> {
        if !self.fs_port.file_exists(&request.input) {
            return Err(DomainError::FsFail(format!(
                "Input file does not exist: {}",
                request.input.display()
            )));
        }

        let initial_size = self.fs_port.get_file_size(&request.input)?;
        if request.budget.fits(initial_size) {
            warn!(
                "{} is already within {} ({} bytes), moving it to {}",
                request.input.display(),
                request.budget,
                initial_size,
                request.output.display()
            );
            self.fs_port.move_file(&request.input, &request.output)?;
            return Ok(CompressionOutcome::AlreadyFits { size: initial_size });
        }

        let duration = self.probe_port.probe_duration(&request.input)?;
        let initial =
            BitratePlanner::initial_bitrates(request.budget, duration, request.initial_audio_kbps)?;
        info!(
            "Input is {} bytes over {:.2}s, starting at {}",
            initial_size, duration, initial
        );

        let mut attempts = Vec::new();
        for bitrates in BitrateSchedule::new(initial, self.floor, self.decay)? {
            info!(attempt = attempts.len() + 1, "Encoding at {}", bitrates);

            if let Err(e) =
                self.encode_port
                    .encode_with_bitrates(&request.input, &request.output, &bitrates)
            {
                error!("[ERROR] During compression {}", e);
                attempts.push(EncodeAttempt {
                    bitrates,
                    output_size: None,
                });
                return Ok(CompressionOutcome::EncoderFailed {
                    attempts,
                    message: e.to_string(),
                });
            }

            let size = self.fs_port.get_file_size(&request.output)?;
            attempts.push(EncodeAttempt {
                bitrates,
                output_size: Some(size),
            });

            if request.budget.fits(size) {
                info!("Output is {} bytes, within {}", size, request.budget);
                return Ok(CompressionOutcome::Fitted { attempts, size });
            }
            info!("Output is {} bytes, over {}; lowering bitrates", size, request.budget);
        }

        warn!(
            "Bitrate floor ({}k video / {}k audio) reached after {} attempt(s)",
            self.floor.video_kbps,
            self.floor.audio_kbps,
            attempts.len()
        );
        Ok(CompressionOutcome::FloorReached { attempts })
    }
}
