//! Plot rendering module using egui_plot
//!
//! The engine owns the visible ranges, so egui_plot's own zoom, drag and
//! scroll handling is switched off. Each frame the plot bounds are set from
//! the engine viewport and raw pointer input is forwarded back to it.
//!
//! # Main Types
//!
//! - [`PlotView`] - Line styling and rendering of a [`ChartEngine`]

use crate::engine::{ChartEngine, ScrollDirection};
use crate::types::{PlotRect, ScreenPos};
use egui::{Color32, PointerButton, Ui};
use egui_plot::{GridMark, Line, Plot, PlotBounds, PlotPoints};
use std::ops::RangeInclusive;

/// Axis label format for timestamps
pub const AXIS_TIME_FORMAT: &str = "%H:%M:%S";

/// Plot view configuration
#[derive(Debug, Clone)]
pub struct PlotView {
    /// Whether to show grid lines
    pub show_grid: bool,
    /// Line width in points
    pub line_width: f32,
    /// Line color
    pub color: Color32,
}

impl Default for PlotView {
    fn default() -> Self {
        Self {
            show_grid: true,
            line_width: 1.5,
            color: Color32::from_rgb(64, 160, 255),
        }
    }
}

impl PlotView {
    /// Render the engine's series and forward pointer input to it
    ///
    /// Returns the plot frame in screen points.
    pub fn render(&self, ui: &mut Ui, engine: &mut ChartEngine) -> egui::Rect {
        let viewport = engine.viewport();
        let points: PlotPoints = engine.buffer().as_plot_points().into();

        let plot = Plot::new("live_chart")
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .allow_double_click_reset(false)
            .show_x(false)
            .show_y(false)
            .show_axes(true)
            .show_grid(self.show_grid)
            .x_axis_label("Time")
            .y_axis_label("Value")
            .x_grid_spacer(|input| time_grid_marks(input.bounds))
            .x_axis_formatter(|mark, _range: &RangeInclusive<f64>| format_axis_time(mark.value));

        let response = plot.show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                [viewport.x.min, viewport.y.min],
                [viewport.x.max, viewport.y.max],
            ));
            plot_ui.line(
                Line::new("series", points)
                    .color(self.color)
                    .width(self.line_width),
            );
        });

        let frame = *response.transform.frame();
        engine.set_plot_rect(PlotRect::new(
            frame.left() as f64,
            frame.top() as f64,
            frame.width() as f64,
            frame.height() as f64,
        ));

        let plot_response = &response.response;

        if plot_response.drag_started_by(PointerButton::Primary) {
            if let Some(pos) = plot_response.interact_pointer_pos() {
                engine.on_press_start(to_screen_pos(pos));
            }
        }
        if plot_response.dragged_by(PointerButton::Primary) {
            if let Some(pos) = plot_response.interact_pointer_pos() {
                engine.on_drag(to_screen_pos(pos));
            }
        }
        if plot_response.drag_stopped() {
            engine.on_release();
        }

        if plot_response.hovered() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if let Some(direction) = ScrollDirection::from_delta(scroll) {
                engine.on_scroll(direction);
            }
        }

        match plot_response.hover_pos() {
            Some(pos) if !engine.is_dragging() => engine.on_hover_move(to_screen_pos(pos)),
            _ => engine.on_hover_leave(),
        }

        if let Some(tooltip) = engine.tooltip() {
            plot_response
                .clone()
                .on_hover_text_at_pointer(tooltip.text.clone());
        }

        frame
    }
}

fn to_screen_pos(pos: egui::Pos2) -> ScreenPos {
    ScreenPos::new(pos.x as f64, pos.y as f64)
}

/// Format an epoch-millisecond axis value as local wall-clock time
pub fn format_axis_time(timestamp_ms: f64) -> String {
    chrono::DateTime::from_timestamp_millis(timestamp_ms.round() as i64)
        .map(|t| {
            t.with_timezone(&chrono::Local)
                .format(AXIS_TIME_FORMAT)
                .to_string()
        })
        .unwrap_or_default()
}

/// Grid step (ms) for a visible time span
fn time_grid_step(span_ms: f64) -> f64 {
    const STEPS: [f64; 10] = [
        100.0, 500.0, 1_000.0, 2_000.0, 5_000.0, 10_000.0, 30_000.0, 60_000.0, 300_000.0,
        600_000.0,
    ];
    // Aim for at most ~10 labelled marks
    STEPS
        .iter()
        .copied()
        .find(|step| span_ms / step <= 10.0)
        .unwrap_or(3_600_000.0)
}

/// Create time-based grid marks for the X axis
fn time_grid_marks(bounds: (f64, f64)) -> Vec<GridMark> {
    let (min, max) = bounds;
    let span = max - min;
    if !span.is_finite() || span <= 0.0 {
        return Vec::new();
    }

    let step = time_grid_step(span);
    let mut marks = Vec::new();
    let mut current = (min / step).ceil() * step;
    while current <= max {
        marks.push(GridMark {
            value: current,
            step_size: step,
        });
        current += step;
    }
    marks
}
