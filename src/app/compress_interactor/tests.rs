// Unit tests for the compress interactor

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::TempDir;

use super::*;
use crate::adapters::fs_std::FsStdAdapter;

const DURATION: f64 = 10.0;

struct FixedProbe(Result<f64, DomainError>);

impl ProbePort for FixedProbe {
    fn probe_duration(&self, _file_path: &Path) -> Result<f64, DomainError> {
        self.0.clone()
    }
}

/// Writes an output whose size follows the requested bitrates, scaled by `overshoot`
struct SizedEncoder {
    overshoot: f64,
    fail_on_attempt: Option<usize>,
    calls: Mutex<Vec<Bitrates>>,
}

impl SizedEncoder {
    fn new(overshoot: f64) -> Self {
        Self {
            overshoot,
            fail_on_attempt: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn failing_on(mut self, attempt: usize) -> Self {
        self.fail_on_attempt = Some(attempt);
        self
    }

    fn calls(&self) -> Vec<Bitrates> {
        self.calls.lock().unwrap().clone()
    }
}

impl EncodePort for SizedEncoder {
    fn encode_with_bitrates(
        &self,
        _input: &Path,
        output: &Path,
        bitrates: &Bitrates,
    ) -> Result<(), DomainError> {
        let mut calls = self.calls.lock().unwrap();
        calls.push(*bitrates);
        if self.fail_on_attempt == Some(calls.len()) {
            std::fs::write(output, b"partial").unwrap();
            return Err(DomainError::EncodeFail("simulated failure".to_string()));
        }
        let bytes = (bitrates.video_kbps + bitrates.audio_kbps) * 1000.0 / 8.0 * DURATION;
        std::fs::write(output, vec![0u8; (bytes * self.overshoot) as usize]).unwrap();
        Ok(())
    }

    fn crop(
        &self,
        _input: &Path,
        _output: &Path,
        _interval: &CropInterval,
    ) -> Result<(), DomainError> {
        unreachable!("compression never crops")
    }
}

struct Fixture {
    _dir: TempDir,
    input: PathBuf,
    output: PathBuf,
}

fn fixture(input_size: usize) -> Fixture {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("clip.mp4");
    let output = dir.path().join("compressed_clip.mp4");
    std::fs::write(&input, vec![7u8; input_size]).unwrap();
    Fixture {
        _dir: dir,
        input,
        output,
    }
}

fn request(fixture: &Fixture) -> CompressionRequest {
    CompressionRequest {
        input: fixture.input.clone(),
        output: fixture.output.clone(),
        budget: SizeBudget::from_megabytes(1),
        initial_audio_kbps: 128.0,
    }
}

fn interactor(probe: FixedProbe, encoder: Arc<SizedEncoder>) -> CompressInteractor {
    CompressInteractor::new(
        Arc::new(probe),
        encoder,
        Arc::new(FsStdAdapter::new()),
        BitrateFloor::default(),
        DEFAULT_DECAY,
    )
}

#[test]
fn test_input_within_budget_is_moved() {
    let fixture = fixture(4096);
    let encoder = Arc::new(SizedEncoder::new(1.0));
    let outcome = interactor(FixedProbe(Ok(DURATION)), Arc::clone(&encoder))
        .compress(&request(&fixture))
        .unwrap();

    assert_eq!(outcome, CompressionOutcome::AlreadyFits { size: 4096 });
    assert!(!fixture.input.exists());
    assert_eq!(std::fs::read(&fixture.output).unwrap(), vec![7u8; 4096]);
    assert!(encoder.calls().is_empty());
}

#[test]
fn test_fits_after_decaying_bitrates() {
    let fixture = fixture(2 * 1024 * 1024);
    let encoder = Arc::new(SizedEncoder::new(1.15));
    let outcome = interactor(FixedProbe(Ok(DURATION)), Arc::clone(&encoder))
        .compress(&request(&fixture))
        .unwrap();

    let CompressionOutcome::Fitted { attempts, size } = outcome else {
        panic!("expected a fitted outcome, got {:?}", outcome);
    };
    assert_eq!(attempts.len(), 3);
    assert!(size <= 1024 * 1024);
    assert!(fixture.input.exists());

    let first = attempts[0].bitrates;
    assert_eq!(first.audio_kbps, 128.0);
    assert!((first.video_kbps - (8_388_608.0 / 10_000.0 - 128.0)).abs() < 1e-9);
    assert_eq!(encoder.calls(), attempts.iter().map(|a| a.bitrates).collect::<Vec<_>>());
}

#[test]
fn test_bitrates_decay_until_floor() {
    let fixture = fixture(2 * 1024 * 1024);
    let encoder = Arc::new(SizedEncoder::new(10.0));
    let outcome = interactor(FixedProbe(Ok(DURATION)), Arc::clone(&encoder))
        .compress(&request(&fixture))
        .unwrap();

    let CompressionOutcome::FloorReached { attempts } = outcome else {
        panic!("expected the floor to be reached, got {:?}", outcome);
    };
    // 710.9 -> 639.8 -> 575.8 -> 518.2, then 466.4 is under the 500k floor
    assert_eq!(attempts.len(), 4);
    for pair in attempts.windows(2) {
        let (prev, next) = (pair[0].bitrates, pair[1].bitrates);
        assert!((next.video_kbps - prev.video_kbps * 0.9).abs() < 1e-9);
        assert!((next.audio_kbps - prev.audio_kbps * 0.9).abs() < 1e-9);
    }
    assert!(attempts.iter().all(|a| a.output_size.is_some()));
}

#[test]
fn test_encoder_failure_stops_search() {
    let fixture = fixture(2 * 1024 * 1024);
    let encoder = Arc::new(SizedEncoder::new(10.0).failing_on(2));
    let outcome = interactor(FixedProbe(Ok(DURATION)), Arc::clone(&encoder))
        .compress(&request(&fixture))
        .unwrap();

    let CompressionOutcome::EncoderFailed { attempts, message } = outcome else {
        panic!("expected an encoder failure, got {:?}", outcome);
    };
    assert_eq!(attempts.len(), 2);
    assert_eq!(attempts[1].output_size, None);
    assert!(message.contains("simulated failure"));
    assert_eq!(std::fs::read(&fixture.output).unwrap(), b"partial");
    assert_eq!(encoder.calls().len(), 2);
}

#[test]
fn test_probe_failure_is_an_error() {
    let fixture = fixture(2 * 1024 * 1024);
    let encoder = Arc::new(SizedEncoder::new(1.0));
    let result = interactor(
        FixedProbe(Err(DomainError::ProbeFail("no duration".to_string()))),
        Arc::clone(&encoder),
    )
    .compress(&request(&fixture));

    assert!(matches!(result, Err(DomainError::ProbeFail(_))));
    assert!(encoder.calls().is_empty());
}

#[test]
fn test_missing_input_is_an_error() {
    let fixture = fixture(1);
    std::fs::remove_file(&fixture.input).unwrap();
    let result = interactor(FixedProbe(Ok(DURATION)), Arc::new(SizedEncoder::new(1.0)))
        .compress(&request(&fixture));
    assert!(matches!(result, Err(DomainError::FsFail(_))));
}

#[test]
fn test_budget_too_small_for_audio_makes_no_attempt() {
    let fixture = fixture(2 * 1024 * 1024);
    let encoder = Arc::new(SizedEncoder::new(1.0));
    // a one-hour input leaves a negative video bitrate
    let outcome = interactor(FixedProbe(Ok(3600.0)), Arc::clone(&encoder))
        .compress(&request(&fixture))
        .unwrap();

    assert_eq!(outcome, CompressionOutcome::FloorReached { attempts: vec![] });
    assert!(encoder.calls().is_empty());
}
