//! FFmpeg execution adapter
//!
//! Drives the `ffmpeg` executable for bitrate-constrained re-encodes and
//! range crops. Each call blocks until the process exits.

use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Lines of encoder stderr kept in failure messages
const STDERR_TAIL_LINES: usize = 8;

/// FFmpeg-based execution adapter
pub struct FFmpegAdapter {
    ffmpeg_path: String,
    threads: Option<usize>,
}

impl FFmpegAdapter {
    /// Create new FFmpeg adapter
    pub fn new(ffmpeg_path: impl Into<String>, threads: Option<usize>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
            threads,
        }
    }

    /// Arguments for a re-encode at fixed video/audio bitrates
    pub fn compress_args(&self, input: &Path, output: &Path, bitrates: &Bitrates) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-y".into(), "-i".into(), input.into()];
        self.push_threads(&mut args);
        args.extend([
            "-b:v".into(),
            bitrates.video_arg().into(),
            "-b:a".into(),
            bitrates.audio_arg().into(),
            output.into(),
        ]);
        args
    }

    /// Arguments for extracting `interval` from `input`
    pub fn crop_args(&self, input: &Path, output: &Path, interval: &CropInterval) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-y".into(),
            "-ss".into(),
            interval.start.encoder_arg().into(),
            "-to".into(),
            interval.end.encoder_arg().into(),
            "-i".into(),
            input.into(),
        ];
        self.push_threads(&mut args);
        args.push(output.into());
        args
    }

    fn push_threads(&self, args: &mut Vec<OsString>) {
        if let Some(threads) = self.threads {
            args.push("-threads".into());
            args.push(threads.to_string().into());
        }
    }

    fn run(&self, args: Vec<OsString>) -> Result<(), DomainError> {
        debug!("Running {} {:?}", self.ffmpeg_path, args);

        let output = Command::new(&self.ffmpeg_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                DomainError::EncodeFail(format!("Failed to run {}: {}", self.ffmpeg_path, e))
            })?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let lines: Vec<&str> = stderr.lines().collect();
        let tail = lines[lines.len().saturating_sub(STDERR_TAIL_LINES)..].join("\n");
        Err(DomainError::EncodeFail(format!(
            "ffmpeg exited with {}: {}",
            output.status, tail
        )))
    }
}

impl EncodePort for FFmpegAdapter {
    fn encode_with_bitrates(
        &self,
        input: &Path,
        output: &Path,
        bitrates: &Bitrates,
    ) -> Result<(), DomainError> {
        self.run(self.compress_args(input, output, bitrates))
    }

    fn crop(
        &self,
        input: &Path,
        output: &Path,
        interval: &CropInterval,
    ) -> Result<(), DomainError> {
        self.run(self.crop_args(input, output, interval))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::toml_config::AppConfig;

    fn strings(args: Vec<OsString>) -> Vec<String> {
        args.into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_compress_args() {
        let adapter = FFmpegAdapter::new("ffmpeg", None);
        let args = adapter.compress_args(
            Path::new("in.mp4"),
            Path::new("compressed_in.mp4"),
            &Bitrates::new(990.48, 128.0),
        );
        assert_eq!(
            strings(args),
            ["-y", "-i", "in.mp4", "-b:v", "990k", "-b:a", "128k", "compressed_in.mp4"]
        );
    }

    #[test]
    fn test_default_config_leaves_threads_to_ffmpeg() {
        let config = AppConfig::default();
        let adapter = FFmpegAdapter::new(config.ffmpeg.clone(), config.threads);
        let args = strings(adapter.compress_args(
            Path::new("in.mp4"),
            Path::new("out.mp4"),
            &Bitrates::new(800.0, 96.0),
        ));
        assert!(!args.iter().any(|a| a == "-threads"));
    }

    #[test]
    fn test_compress_args_with_threads() {
        let adapter = FFmpegAdapter::new("ffmpeg", Some(4));
        let args = strings(adapter.compress_args(
            Path::new("in.mp4"),
            Path::new("out.mp4"),
            &Bitrates::new(800.0, 96.0),
        ));
        assert_eq!(&args[3..5], ["-threads", "4"]);
    }

    #[test]
    fn test_crop_args() {
        let adapter = FFmpegAdapter::new("ffmpeg", None);
        let interval =
            CropInterval::new(TimeSpec::from_seconds(1.5), TimeSpec::from_seconds(4.25)).unwrap();
        let args = adapter.crop_args(Path::new("in.mp4"), Path::new("cropped_in.mp4"), &interval);
        assert_eq!(
            strings(args),
            ["-y", "-ss", "1.500", "-to", "4.250", "-i", "in.mp4", "cropped_in.mp4"]
        );
    }

    #[test]
    fn test_missing_executable_is_encode_failure() {
        let adapter = FFmpegAdapter::new("eightmb-no-such-ffmpeg", None);
        let result = adapter.encode_with_bitrates(
            Path::new("in.mp4"),
            Path::new("out.mp4"),
            &Bitrates::new(800.0, 96.0),
        );
        assert!(matches!(result, Err(DomainError::EncodeFail(_))));
    }
}
