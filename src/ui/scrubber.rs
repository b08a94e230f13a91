//! Slider position, crop marks and current frame for the crop window

use crate::domain::errors::DomainError;
use crate::domain::model::{CropInterval, FrameTimeline};
use crate::ports::{FrameSource, RgbaFrame};

/// UI-independent state behind the crop window
pub struct Scrubber<S: FrameSource> {
    source: S,
    timeline: FrameTimeline,
    position: u64,
    start: Option<f64>,
    end: Option<f64>,
    pending_frame: Option<RgbaFrame>,
}

impl<S: FrameSource> Scrubber<S> {
    pub fn new(source: S) -> Self {
        let timeline = source.timeline();
        Self {
            source,
            timeline,
            position: 0,
            start: None,
            end: None,
            pending_frame: None,
        }
    }

    pub fn timeline(&self) -> FrameTimeline {
        self.timeline
    }

    pub fn position(&self) -> u64 {
        self.position
    }

    /// Time of the slider position in seconds
    pub fn current_time(&self) -> f64 {
        self.timeline.time_of(self.position)
    }

    /// Move to `frame` (clamped) and decode it for display
    pub fn seek(&mut self, frame: u64) -> Result<(), DomainError> {
        self.position = frame.min(self.timeline.last_frame());
        if let Some(decoded) = self.source.frame_at(self.position)? {
            self.pending_frame = Some(decoded);
        }
        Ok(())
    }

    /// Advance `frames` frames; returns `false` once the last frame is reached
    pub fn advance(&mut self, frames: u64) -> Result<bool, DomainError> {
        let last = self.timeline.last_frame();
        if self.position >= last {
            return Ok(false);
        }
        self.seek(self.position.saturating_add(frames))?;
        Ok(self.position < last)
    }

    pub fn set_start(&mut self) -> f64 {
        let time = self.current_time();
        self.start = Some(time);
        time
    }

    pub fn set_end(&mut self) -> f64 {
        let time = self.current_time();
        self.end = Some(time);
        time
    }

    pub fn start(&self) -> Option<f64> {
        self.start
    }

    pub fn end(&self) -> Option<f64> {
        self.end
    }

    /// Marked range, only when both ends are set and ordered
    pub fn interval(&self) -> Option<CropInterval> {
        CropInterval::from_marks(self.start, self.end)
    }

    /// Newly decoded frame awaiting upload, if any
    pub fn take_frame(&mut self) -> Option<RgbaFrame> {
        self.pending_frame.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Frame source that records requested frames
    struct FakeSource {
        timeline: FrameTimeline,
        requested: Vec<u64>,
    }

    impl FakeSource {
        fn new(frames: u64, fps: f64) -> Self {
            Self {
                timeline: FrameTimeline::new(frames, fps).unwrap(),
                requested: Vec::new(),
            }
        }
    }

    impl FrameSource for FakeSource {
        fn timeline(&self) -> FrameTimeline {
            self.timeline
        }

        fn frame_at(&mut self, frame: u64) -> Result<Option<RgbaFrame>, DomainError> {
            self.requested.push(frame);
            Ok(Some(RgbaFrame {
                width: 1,
                height: 1,
                pixels: vec![frame as u8, 0, 0, 255],
            }))
        }
    }

    #[test]
    fn test_seek_clamps_and_decodes() {
        let mut scrubber = Scrubber::new(FakeSource::new(100, 25.0));
        scrubber.seek(250).unwrap();
        assert_eq!(scrubber.position(), 99);
        assert_eq!(scrubber.take_frame().unwrap().pixels[0], 99);
        assert!(scrubber.take_frame().is_none());
    }

    #[test]
    fn test_marks_use_frame_time() {
        let mut scrubber = Scrubber::new(FakeSource::new(300, 30.0));
        scrubber.seek(30).unwrap();
        assert_eq!(scrubber.set_start(), 1.0);
        scrubber.seek(90).unwrap();
        assert_eq!(scrubber.set_end(), 3.0);

        let interval = scrubber.interval().unwrap();
        assert_eq!(interval.start.seconds, 1.0);
        assert_eq!(interval.end.seconds, 3.0);
    }

    #[test]
    fn test_start_at_zero_is_kept() {
        let mut scrubber = Scrubber::new(FakeSource::new(300, 30.0));
        scrubber.set_start();
        scrubber.seek(60).unwrap();
        scrubber.set_end();
        assert_eq!(scrubber.interval().unwrap().start.seconds, 0.0);
    }

    #[test]
    fn test_unordered_or_partial_marks_give_no_interval() {
        let mut scrubber = Scrubber::new(FakeSource::new(300, 30.0));
        scrubber.seek(90).unwrap();
        scrubber.set_start();
        assert!(scrubber.interval().is_none());

        scrubber.seek(30).unwrap();
        scrubber.set_end();
        assert!(scrubber.interval().is_none());

        scrubber.seek(90).unwrap();
        scrubber.set_end();
        assert!(scrubber.interval().is_none());
    }

    #[test]
    fn test_advance_stops_at_end() {
        let mut scrubber = Scrubber::new(FakeSource::new(3, 30.0));
        assert!(scrubber.advance(1).unwrap());
        assert!(!scrubber.advance(1).unwrap());
        assert_eq!(scrubber.position(), 2);
        assert!(!scrubber.advance(1).unwrap());
        assert_eq!(scrubber.source.requested, vec![1, 2]);
    }
}
