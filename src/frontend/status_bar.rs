//! Status bar panel: bottom bar showing run state, series stats and the
//! last message.

use egui::{Color32, RichText, Ui};

use crate::engine::{ChartEngine, ViewMode};
use crate::types::RunState;

/// A message shown on the right of the status bar
#[derive(Debug, Clone, PartialEq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

/// Render the status bar.
pub fn render_status_bar(ui: &mut Ui, engine: &ChartEngine, message: Option<&StatusMessage>) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        let (color, text) = match engine.run_state() {
            RunState::Running => (Color32::GREEN, "Running"),
            RunState::Stopped => (Color32::GRAY, "Stopped"),
        };
        ui.colored_label(color, "●");
        ui.label(RichText::new(text).small());

        ui.separator();
        ui.label(RichText::new(format!("Points: {}", engine.buffer().len())).small());

        ui.separator();
        let view = match engine.view_mode() {
            ViewMode::Following => "Live",
            ViewMode::Manual => "Manual",
        };
        ui.label(RichText::new(format!("View: {}", view)).small());

        let y = engine.viewport().y;
        ui.separator();
        ui.label(RichText::new(format!("Y: {:.2} .. {:.2}", y.min, y.max)).small());

        if let Some(message) = message {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                match message {
                    StatusMessage::Info(text) => ui.label(RichText::new(text).small()),
                    StatusMessage::Error(text) => {
                        ui.colored_label(Color32::RED, RichText::new(text).small())
                    }
                };
            });
        }
    });
}
