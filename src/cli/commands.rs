//! Command implementations

use std::path::Path;

use tracing::{error, info, warn};

use crate::adapters::AppConfig;
use crate::app::{AppContainer, DefaultAppContainer};
use crate::cli::Cli;
use crate::domain::model::{CompressionOutcome, CompressionRequest, SizeBudget};
use crate::error::{EightMbError, EightMbResult};
use crate::utils::{format_file_size, path};

/// Crop (optionally) and compress `input`
pub fn compress(cli: &Cli, input: &Path, config: &AppConfig) -> EightMbResult<CompressionOutcome> {
    info!("Input: {}", input.display());

    if !input.is_file() {
        return Err(EightMbError::InputFileNotFound {
            path: input.display().to_string(),
        });
    }

    let choice = cli.crop.choice()?;
    let container = DefaultAppContainer::new(config)?;

    let cropped = path::cropped_output(input)?;
    let source = container
        .crop_interactor()
        .prepare_input(input, &cropped, choice);

    let output = match &cli.encode.output {
        Some(output) => output.clone(),
        None => path::compressed_output(input)?,
    };
    info!("Output: {}", output.display());

    let request = CompressionRequest {
        input: source,
        output,
        budget: SizeBudget::from_megabytes(config.target_mb),
        initial_audio_kbps: config.audio_bitrate_kbps,
    };
    let outcome = container.compress_interactor().compress(&request)?;

    report(&request, &outcome);
    Ok(outcome)
}

/// Log a one-line summary of the outcome
fn report(request: &CompressionRequest, outcome: &CompressionOutcome) {
    let attempts = outcome.attempts().len();
    match outcome {
        CompressionOutcome::AlreadyFits { size } => info!(
            "{} was already {}, moved to {}",
            request.input.display(),
            format_file_size(*size),
            request.output.display()
        ),
        CompressionOutcome::Fitted { size, .. } => info!(
            "Wrote {} ({}) after {} attempt(s)",
            request.output.display(),
            format_file_size(*size),
            attempts
        ),
        CompressionOutcome::FloorReached { .. } => warn!(
            "Could not fit {} within {} above the bitrate floor ({} attempt(s))",
            request.input.display(),
            request.budget,
            attempts
        ),
        CompressionOutcome::EncoderFailed { message, .. } => error!(
            "Encoder failed on attempt {}: {}",
            attempts, message
        ),
    }
}
