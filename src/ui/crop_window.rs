//! eframe window for marking a crop range

use std::cell::RefCell;
use std::rc::Rc;

use eframe::egui::{self, Color32, RichText};
use tracing::{debug, error, warn};

use crate::domain::model::CropInterval;
use crate::error::{EightMbError, EightMbResult};
use crate::ports::{FrameSource, RgbaFrame};
use crate::ui::playback::PlaybackTimer;
use crate::ui::scrubber::Scrubber;

const WINDOW_TITLE: &str = "Crop Video";
const WINDOW_SIZE: [f32; 2] = [600.0, 400.0];
const SLIDER_WIDTH: f32 = 500.0;
const BACKGROUND: Color32 = Color32::from_rgb(0x1e, 0x1e, 0x1e);

enum UiAction {
    Seek(u64),
    TogglePlay,
    SetStart,
    SetEnd,
    Done,
}

/// Crop window application state
pub struct CropApp<S: FrameSource> {
    scrubber: Scrubber<S>,
    texture: Option<egui::TextureHandle>,
    timer: Option<PlaybackTimer>,
    result: Rc<RefCell<Option<CropInterval>>>,
}

impl<S: FrameSource> CropApp<S> {
    fn new(source: S, result: Rc<RefCell<Option<CropInterval>>>) -> Self {
        let mut scrubber = Scrubber::new(source);
        if let Err(e) = scrubber.seek(0) {
            warn!("Could not decode first frame: {}", e);
        }
        Self {
            scrubber,
            texture: None,
            timer: None,
            result,
        }
    }

    fn is_playing(&self) -> bool {
        self.timer.as_ref().is_some_and(PlaybackTimer::is_running)
    }

    fn toggle_play(&mut self, ctx: &egui::Context) {
        if self.is_playing() {
            self.pause();
            return;
        }
        let interval = self.scrubber.timeline().frame_interval();
        let repaint = ctx.clone();
        match PlaybackTimer::start(interval, move || repaint.request_repaint()) {
            Ok(timer) => self.timer = Some(timer),
            Err(e) => error!("Failed to start playback: {}", e),
        }
    }

    fn pause(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.stop();
        }
    }

    fn drain_ticks(&mut self) {
        let ticks = match &self.timer {
            Some(timer) => timer.pending_ticks() as u64,
            None => return,
        };
        if ticks == 0 {
            return;
        }
        match self.scrubber.advance(ticks) {
            Ok(true) => {}
            Ok(false) => {
                debug!("Playback reached the last frame");
                self.pause();
            }
            Err(e) => {
                error!("Playback decode failed: {}", e);
                self.pause();
            }
        }
    }

    fn seek(&mut self, frame: u64) {
        if let Err(e) = self.scrubber.seek(frame) {
            error!("Failed to show frame {}: {}", frame, e);
        }
    }

    fn upload_frame(&mut self, ctx: &egui::Context) {
        let Some(frame) = self.scrubber.take_frame() else {
            return;
        };
        let image = to_color_image(&frame);
        match &mut self.texture {
            Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
            None => {
                self.texture =
                    Some(ctx.load_texture("crop-preview", image, egui::TextureOptions::LINEAR));
            }
        }
    }

    fn publish_marks(&self) {
        *self.result.borrow_mut() = self.scrubber.interval();
    }

    fn apply(&mut self, action: UiAction, ctx: &egui::Context) {
        match action {
            UiAction::Seek(frame) => self.seek(frame),
            UiAction::TogglePlay => self.toggle_play(ctx),
            UiAction::SetStart => {
                let time = self.scrubber.set_start();
                debug!("Start marked at {:.2}s", time);
                self.publish_marks();
            }
            UiAction::SetEnd => {
                let time = self.scrubber.set_end();
                debug!("End marked at {:.2}s", time);
                self.publish_marks();
            }
            UiAction::Done => {
                self.pause();
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        }
    }
}

fn to_color_image(frame: &RgbaFrame) -> egui::ColorImage {
    egui::ColorImage::from_rgba_unmultiplied([frame.width, frame.height], &frame.pixels)
}

fn mark_label(name: &str, value: Option<f64>) -> RichText {
    RichText::new(format!("{}: {:.2}s", name, value.unwrap_or(0.0))).color(Color32::WHITE)
}

impl<S: FrameSource> eframe::App for CropApp<S> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_ticks();
        self.upload_frame(ctx);

        let mut actions = Vec::new();
        if ctx.input(|i| i.key_pressed(egui::Key::Space)) {
            actions.push(UiAction::TogglePlay);
        }

        let playing = self.is_playing();
        let last_frame = self.scrubber.timeline().last_frame();
        let mut position = self.scrubber.position();

        egui::CentralPanel::default()
            .frame(egui::Frame::default().fill(BACKGROUND).inner_margin(10.0))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    let slider = ui.add_sized(
                        [SLIDER_WIDTH, 20.0],
                        egui::Slider::new(&mut position, 0..=last_frame).show_value(false),
                    );
                    if slider.changed() {
                        actions.push(UiAction::Seek(position));
                    }

                    ui.add_space(10.0);
                    match &self.texture {
                        Some(texture) => {
                            ui.add(
                                egui::Image::new(texture)
                                    .max_height((ui.available_height() - 80.0).max(60.0))
                                    .shrink_to_fit(),
                            );
                        }
                        None => {
                            ui.label(RichText::new("No preview").color(Color32::GRAY));
                        }
                    }
                    ui.add_space(10.0);

                    ui.horizontal(|ui| {
                        let play_label = if playing { "Pause" } else { "Play" };
                        if ui.button(play_label).clicked() {
                            actions.push(UiAction::TogglePlay);
                        }
                        if ui.button("Set Start").clicked() {
                            actions.push(UiAction::SetStart);
                        }
                        if ui.button("Set End").clicked() {
                            actions.push(UiAction::SetEnd);
                        }
                        if ui.button("Done").clicked() {
                            actions.push(UiAction::Done);
                        }
                    });

                    ui.label(mark_label("Start", self.scrubber.start()));
                    ui.label(mark_label("End", self.scrubber.end()));
                });
            });

        for action in actions {
            self.apply(action, ctx);
        }
    }
}

/// Show the crop window for `source` and block until it is closed
pub fn run_crop_window<S: FrameSource + 'static>(source: S) -> EightMbResult<Option<CropInterval>> {
    let result = Rc::new(RefCell::new(None));
    let app = CropApp::new(source, Rc::clone(&result));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(WINDOW_SIZE),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| EightMbError::UiError {
        message: e.to_string(),
    })?;

    let interval = *result.borrow();
    Ok(interval)
}
