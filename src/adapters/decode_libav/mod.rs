//! Frame decoding adapter using libav bindings
//!
//! Opens the best video stream of a file and decodes single frames on demand
//! for the crop window. Frames are scaled down to a maximum width and
//! converted to RGBA.

use std::path::Path;

use ffmpeg_next as ffmpeg;
use ffmpeg::format::{context::Input, Pixel};
use ffmpeg::media::Type;
use ffmpeg::software::scaling::{context::Context as Scaler, flag::Flags};
use ffmpeg::util::frame::video::Video;
use tracing::{debug, info};

use crate::domain::errors::DomainError;
use crate::domain::model::FrameTimeline;
use crate::ports::{FrameSource, RgbaFrame};

/// Move `decoded` into `previous` without copying pixels.
///
/// The buffer `previous` held is handed back as the next receive target.
fn keep_previous(decoded: &mut Video, previous: &mut Option<Video>) {
    let spare = previous.take().unwrap_or_else(Video::empty);
    *previous = Some(std::mem::replace(decoded, spare));
}

fn decode_err(context: &str) -> impl Fn(ffmpeg::Error) -> DomainError + '_ {
    move |e| DomainError::DecodeFail(format!("{}: {}", context, e))
}

/// Output size no wider than `max_width`, keeping aspect ratio and even dimensions
pub fn fit_width(width: u32, height: u32, max_width: u32) -> (u32, u32) {
    if width == 0 || height == 0 || width <= max_width {
        return (width, height);
    }
    let scaled_height = (height as u64 * max_width as u64 / width as u64) as u32;
    (max_width & !1, (scaled_height & !1).max(2))
}

/// Seekable libav decoder for one video stream
pub struct LibavFrameSource {
    input: Input,
    decoder: ffmpeg::decoder::Video,
    scaler: Option<Scaler>,
    stream_index: usize,
    /// Seconds per stream timestamp tick
    time_base: f64,
    start_pts: i64,
    timeline: FrameTimeline,
    max_width: u32,
}

impl LibavFrameSource {
    /// Open `path` and prepare a decoder for its best video stream
    pub fn open(path: &Path, max_width: u32) -> Result<Self, DomainError> {
        ffmpeg::init().map_err(decode_err("FFmpeg initialization failed"))?;

        let input = ffmpeg::format::input(&path).map_err(decode_err("Failed to open input"))?;

        let (stream_index, time_base, start_pts, fps, frames, stream_duration, decoder) = {
            let stream = input
                .streams()
                .best(Type::Video)
                .ok_or_else(|| DomainError::DecodeFail("No video stream found".to_string()))?;

            let mut rate = stream.avg_frame_rate();
            if rate.numerator() == 0 || rate.denominator() == 0 {
                rate = stream.rate();
            }
            let start_pts = if stream.start_time() == ffmpeg::ffi::AV_NOPTS_VALUE {
                0
            } else {
                stream.start_time()
            };
            let context = ffmpeg::codec::context::Context::from_parameters(stream.parameters())
                .map_err(decode_err("Unsupported codec parameters"))?;
            let decoder = context
                .decoder()
                .video()
                .map_err(decode_err("Failed to open video decoder"))?;

            (
                stream.index(),
                f64::from(stream.time_base()),
                start_pts,
                f64::from(rate),
                stream.frames(),
                stream.duration(),
                decoder,
            )
        };

        let frame_count = if frames > 0 {
            frames as u64
        } else {
            // container does not record a frame count
            let seconds = if stream_duration > 0 {
                stream_duration as f64 * time_base
            } else {
                input.duration() as f64 / ffmpeg::ffi::AV_TIME_BASE as f64
            };
            (seconds * fps).floor().max(0.0) as u64
        };
        let timeline = FrameTimeline::new(frame_count, fps)?;

        info!(
            "Opened {} for preview: {} frames at {:.3} fps, {}x{}",
            path.display(),
            timeline.frame_count,
            timeline.fps,
            decoder.width(),
            decoder.height()
        );

        Ok(Self {
            input,
            decoder,
            scaler: None,
            stream_index,
            time_base,
            start_pts,
            timeline,
            max_width,
        })
    }
}

impl FrameSource for LibavFrameSource {
    fn timeline(&self) -> FrameTimeline {
        self.timeline
    }

    fn frame_at(&mut self, frame: u64) -> Result<Option<RgbaFrame>, DomainError> {
        if frame > self.timeline.last_frame() {
            return Ok(None);
        }

        let seconds = self.timeline.time_of(frame);
        let target_pts = self.start_pts + (seconds / self.time_base).round() as i64;
        let tolerance = ((0.5 / self.timeline.fps) / self.time_base) as i64;

        let seek_ts = (target_pts as f64 * self.time_base * ffmpeg::ffi::AV_TIME_BASE as f64) as i64;
        self.input
            .seek(seek_ts, ..seek_ts)
            .map_err(decode_err("Seek failed"))?;
        self.decoder.flush();

        let mut decoded = Video::empty();
        let mut last: Option<Video> = None;

        for (stream, packet) in self.input.packets() {
            if stream.index() != self.stream_index {
                continue;
            }
            if let Err(e) = self.decoder.send_packet(&packet) {
                debug!("Skipping undecodable packet: {}", e);
                continue;
            }
            while self.decoder.receive_frame(&mut decoded).is_ok() {
                let pts = decoded.timestamp().or(decoded.pts()).unwrap_or(target_pts);
                if pts >= target_pts - tolerance {
                    return to_rgba(&mut self.scaler, &decoded, self.max_width).map(Some);
                }
                keep_previous(&mut decoded, &mut last);
            }
        }

        // drain frames buffered in the decoder
        if self.decoder.send_eof().is_ok() {
            while self.decoder.receive_frame(&mut decoded).is_ok() {
                let pts = decoded.timestamp().or(decoded.pts()).unwrap_or(target_pts);
                if pts >= target_pts - tolerance {
                    return to_rgba(&mut self.scaler, &decoded, self.max_width).map(Some);
                }
                keep_previous(&mut decoded, &mut last);
            }
        }

        // the frame count may be an estimate; show the final frame instead
        match last {
            Some(frame) => to_rgba(&mut self.scaler, &frame, self.max_width).map(Some),
            None => Ok(None),
        }
    }
}

fn to_rgba(
    scaler: &mut Option<Scaler>,
    frame: &Video,
    max_width: u32,
) -> Result<RgbaFrame, DomainError> {
    if scaler.is_none() {
        let (width, height) = fit_width(frame.width(), frame.height(), max_width);
        *scaler = Some(
            Scaler::get(
                frame.format(),
                frame.width(),
                frame.height(),
                Pixel::RGBA,
                width,
                height,
                Flags::BILINEAR,
            )
            .map_err(decode_err("Failed to create scaler"))?,
        );
    }
    let Some(scaler) = scaler.as_mut() else {
        return Err(DomainError::DecodeFail("Scaler unavailable".to_string()));
    };

    let mut rgba = Video::empty();
    scaler
        .run(frame, &mut rgba)
        .map_err(decode_err("Pixel conversion failed"))?;

    let width = rgba.width() as usize;
    let height = rgba.height() as usize;
    let stride = rgba.stride(0);
    let row = width * 4;
    let data = rgba.data(0);

    let mut pixels = Vec::with_capacity(row * height);
    for y in 0..height {
        let start = y * stride;
        pixels.extend_from_slice(&data[start..start + row]);
    }

    Ok(RgbaFrame {
        width,
        height,
        pixels,
    })
}
