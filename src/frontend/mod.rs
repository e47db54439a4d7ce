//! Frontend module for egui UI
//!
//! A thin shell around [`ChartEngine`]: it drives the engine clock once per
//! frame, forwards menu commands and pointer input, and renders what the
//! engine exposes. No chart state lives here.
//!
//! # Main Types
//!
//! - [`LiveChartApp`] - Main application state implementing [`eframe::App`]
//! - [`PlotView`] - Plot configuration and rendering
//!
//! # Submodules
//!
//! - `plot` - Plot rendering with egui_plot
//! - `state` - UI actions and their dispatch
//! - `status_bar` - Bottom status line

mod plot;
pub mod state;
mod status_bar;

pub use plot::PlotView;
pub use state::{apply_action, AppAction};
pub use status_bar::StatusMessage;

use crate::capture::{crop_rgba, save_rgba_png, CaptureRequest, PixelRect};
use crate::config::{AppState, ChartConfig, CSV_FILE_EXTENSION};
use crate::engine::ChartEngine;
use crate::error::Result;
use std::path::PathBuf;
use std::time::Instant;

/// Main application state for the live chart
pub struct LiveChartApp {
    engine: ChartEngine,
    app_state: AppState,
    plot_view: PlotView,
    last_frame: Instant,
    /// Plot area of the last frame, used to crop screenshots
    plot_frame: Option<egui::Rect>,
    /// Capture waiting for its screenshot event
    pending_capture: Option<CaptureRequest>,
    status: Option<StatusMessage>,
}

impl LiveChartApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: ChartConfig, app_state: AppState) -> Self {
        Self {
            engine: ChartEngine::new(&config),
            app_state,
            plot_view: PlotView::default(),
            last_frame: Instant::now(),
            plot_frame: None,
            pending_capture: None,
            status: None,
        }
    }

    fn handle_action(&mut self, action: AppAction) {
        tracing::debug!("Handling action {:?}", action);
        self.status = Some(match apply_action(&mut self.engine, &mut self.app_state, action) {
            Ok(message) => StatusMessage::Info(message),
            Err(e) => {
                tracing::error!("{}", e);
                StatusMessage::Error(e.to_string())
            }
        });
    }

    fn file_dialog(&self, title: &str) -> rfd::FileDialog {
        let dialog = rfd::FileDialog::new().set_title(title);
        match &self.app_state.last_directory {
            Some(dir) => dialog.set_directory(dir),
            None => dialog,
        }
    }

    fn pick_save_image(&self) -> Option<PathBuf> {
        self.file_dialog("Save Image")
            .add_filter("PNG Image", &["png"])
            .set_file_name("chart.png")
            .save_file()
    }

    fn pick_load_csv(&self) -> Option<PathBuf> {
        self.file_dialog("Load from CSV")
            .add_filter("CSV", &[CSV_FILE_EXTENSION])
            .pick_file()
    }

    fn pick_save_csv(&self) -> Option<PathBuf> {
        self.file_dialog("Save CSV")
            .add_filter("CSV", &[CSV_FILE_EXTENSION])
            .set_file_name("series.csv")
            .save_file()
    }

    fn handle_keyboard_shortcuts(&mut self, ctx: &egui::Context) {
        use egui::Key;

        let mut toggle = false;
        let mut reset = false;

        ctx.input(|i| {
            if i.key_pressed(Key::Space) && !i.modifiers.any() {
                toggle = true;
            }
            if i.key_pressed(Key::R) && !i.modifiers.any() {
                reset = true;
            }
        });

        if toggle {
            self.handle_action(AppAction::ToggleRun);
        }
        if reset {
            self.handle_action(AppAction::ResetView);
        }
    }

    /// Ask the backend for a screenshot when the engine wants one
    fn request_capture(&mut self, ctx: &egui::Context) {
        if let Some(request) = self.engine.take_capture_request() {
            self.pending_capture = Some(request);
            ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(Default::default()));
        }
    }

    /// Write the screenshot delivered for a pending capture
    fn complete_capture(&mut self, ctx: &egui::Context) {
        if self.pending_capture.is_none() {
            return;
        }
        let Some(image) = ctx.input(|i| {
            i.events.iter().rev().find_map(|e| match e {
                egui::Event::Screenshot { image, .. } => Some(image.clone()),
                _ => None,
            })
        }) else {
            return;
        };
        let Some(request) = self.pending_capture.take() else {
            return;
        };

        let result = self.write_capture(&request, &image, ctx.pixels_per_point());
        self.status = Some(match result {
            Ok(()) => StatusMessage::Info(format!("Saved image {}", request.path.display())),
            Err(e) => {
                tracing::error!("Image capture failed: {}", e);
                StatusMessage::Error(e.to_string())
            }
        });
    }

    fn write_capture(
        &self,
        request: &CaptureRequest,
        image: &egui::ColorImage,
        pixels_per_point: f32,
    ) -> Result<()> {
        let [width, height] = image.size;
        let rgba: Vec<u8> = image.pixels.iter().flat_map(|p| p.to_array()).collect();

        let region = match self.plot_frame {
            Some(frame) => PixelRect {
                x: (frame.left() * pixels_per_point).max(0.0).round() as usize,
                y: (frame.top() * pixels_per_point).max(0.0).round() as usize,
                width: (frame.width() * pixels_per_point).round() as usize,
                height: (frame.height() * pixels_per_point).round() as usize,
            },
            None => PixelRect {
                x: 0,
                y: 0,
                width,
                height,
            },
        };
        let (w, h, pixels) = crop_rgba(width, height, &rgba, region)?;
        save_rgba_png(&request.path, w, h, pixels)
    }
}

impl eframe::App for LiveChartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let report = self.engine.advance(now.duration_since(self.last_frame));
        self.last_frame = now;

        self.handle_keyboard_shortcuts(ctx);
        self.complete_capture(ctx);

        // Ticks arrive whether running or stopped, so a frame is always
        // scheduled. Idle frames wake for the next due event.
        if report.changed() {
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(self.engine.until_next_event());
        }

        // Menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("Functions", |ui| {
                    if ui.button(self.engine.run_state().toggle_label()).clicked() {
                        self.handle_action(AppAction::ToggleRun);
                        ui.close();
                    }
                    if ui.button("Save Image...").clicked() {
                        if let Some(path) = self.pick_save_image() {
                            self.handle_action(AppAction::SaveImage(path));
                        }
                        ui.close();
                    }
                    if ui.button("Load from CSV...").clicked() {
                        if let Some(path) = self.pick_load_csv() {
                            self.handle_action(AppAction::LoadCsv(path));
                        }
                        ui.close();
                    }
                    if ui.button("Save CSV...").clicked() {
                        if let Some(path) = self.pick_save_csv() {
                            self.handle_action(AppAction::SaveCsv(path));
                        }
                        ui.close();
                    }
                    ui.separator();
                    if ui.button("Reset View").clicked() {
                        self.handle_action(AppAction::ResetView);
                        ui.close();
                    }
                });
            });
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            status_bar::render_status_bar(ui, &self.engine, self.status.as_ref());
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.plot_frame = Some(self.plot_view.render(ui, &mut self.engine));
        });

        self.request_capture(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(e) = self.app_state.save() {
            tracing::warn!("Failed to save app state: {}", e);
        }
    }
}
