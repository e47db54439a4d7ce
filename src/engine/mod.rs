//! Live-series engine
//!
//! [`ChartEngine`] owns the point buffer, the sample source, the glide
//! animation, the axis ranges and the pointer state. Every mutation goes
//! through its methods; the shell only forwards commands and pointer events
//! and reads back what to draw.
//!
//! # Scheduling
//!
//! The engine is single-threaded and frame driven. The shell calls
//! [`ChartEngine::advance`] once per frame with the elapsed time; the engine
//! then delivers every animation sub-step and every tick that fell due, in
//! time order. Commands issued between frames (toggle, zoom, pan, load) are
//! therefore always observed between two sub-steps, and the animation
//! re-validates its state on each one.
//!
//! # Submodules
//!
//! - [`animation`] - Newest-point glide
//! - [`axis`] - Sliding window, Y auto-range and pixel mapping
//! - [`viewport`] - Zoom and pan
//! - [`hit_test`] - Hover tooltip hit testing

pub mod animation;
pub mod axis;
pub mod hit_test;
pub mod viewport;

pub use animation::{AbortReason, AnimationController, StepOutcome};
pub use axis::AxisRangeController;
pub use hit_test::{distance_to_segment, HitTester, Tooltip};
pub use viewport::{DragState, ScrollDirection, ViewportController};

use crate::capture::CaptureRequest;
use crate::config::ChartConfig;
use crate::csv_codec;
use crate::error::Result;
use crate::series::SeriesBuffer;
use crate::source::{now_millis, RandomSource, SampleSource};
use crate::types::{PlotRect, Point, RunState, ScreenPos, Viewport};
use std::path::Path;
use std::time::Duration;

/// Longest stretch of time a single `advance` call will replay
///
/// Longer gaps (window hidden, process suspended) are dropped rather than
/// replayed as a burst of ticks.
pub const MAX_CATCH_UP: Duration = Duration::from_secs(1);

/// Who drives the visible ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Ticks slide the X window and refit Y
    #[default]
    Following,
    /// Ranges stay where zoom/pan/load put them
    Manual,
}

/// Shortest tick period the scheduler will honor
const MIN_TICK_PERIOD: Duration = Duration::from_millis(1);

/// Time bookkeeping for ticks and sub-steps
#[derive(Debug, Clone)]
struct Cadence {
    tick_period: Duration,
    substep_interval: Duration,
    since_tick: Duration,
    since_substep: Duration,
}

impl Cadence {
    fn new(config: &ChartConfig) -> Self {
        Self {
            tick_period: config.sampling.tick_period().max(MIN_TICK_PERIOD),
            substep_interval: config.animation.substep_interval(),
            since_tick: Duration::ZERO,
            since_substep: Duration::ZERO,
        }
    }
}

/// Work performed by one `advance` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdvanceReport {
    pub ticks: usize,
    pub substeps: usize,
}

impl AdvanceReport {
    /// Whether anything visible changed
    pub fn changed(&self) -> bool {
        self.ticks > 0 || self.substeps > 0
    }
}

/// The live chart core
pub struct ChartEngine {
    buffer: SeriesBuffer,
    source: Box<dyn SampleSource>,
    animation: AnimationController,
    axes: AxisRangeController,
    viewport_ctl: ViewportController,
    hit_tester: HitTester,
    drag: DragState,
    hover_pos: Option<ScreenPos>,
    tooltip: Option<Tooltip>,
    run_state: RunState,
    view_mode: ViewMode,
    hold_on_interact: bool,
    plot_rect: PlotRect,
    cadence: Cadence,
    capture_request: Option<CaptureRequest>,
}

impl std::fmt::Debug for ChartEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartEngine")
            .field("source", &self.source.name())
            .field("points", &self.buffer.len())
            .field("run_state", &self.run_state)
            .field("view_mode", &self.view_mode)
            .field("viewport", &self.axes.viewport())
            .finish()
    }
}

impl ChartEngine {
    /// Create an engine fed by the configured random source
    pub fn new(config: &ChartConfig) -> Self {
        let sampling = &config.sampling;
        let source = match sampling.seed {
            Some(seed) => RandomSource::with_seed(sampling.value_min, sampling.value_max, seed),
            None => RandomSource::new(sampling.value_min, sampling.value_max),
        };
        Self::with_source(config, Box::new(source))
    }

    /// Create an engine fed by any sample source
    pub fn with_source(config: &ChartConfig, source: Box<dyn SampleSource>) -> Self {
        tracing::debug!("Creating chart engine with {} source", source.name());
        Self {
            buffer: SeriesBuffer::new(),
            source,
            animation: AnimationController::new(&config.animation),
            axes: AxisRangeController::new(&config.axes, now_millis() as f64),
            viewport_ctl: ViewportController::new(&config.viewport),
            hit_tester: HitTester::new(config.hover.threshold_px),
            drag: DragState::default(),
            hover_pos: None,
            tooltip: None,
            run_state: RunState::Running,
            view_mode: ViewMode::Following,
            hold_on_interact: config.viewport.hold_on_interact,
            plot_rect: PlotRect::default(),
            cadence: Cadence::new(config),
            capture_request: None,
        }
    }

    // ==================== Accessors ====================

    pub fn buffer(&self) -> &SeriesBuffer {
        &self.buffer
    }

    pub fn viewport(&self) -> Viewport {
        self.axes.viewport()
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_active()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.active
    }

    // ==================== Scheduling ====================

    /// Time left until the next tick or sub-step falls due
    pub fn until_next_event(&self) -> Duration {
        let to_tick = self
            .cadence
            .tick_period
            .saturating_sub(self.cadence.since_tick);
        if self.animation.is_active() {
            to_tick.min(
                self.cadence
                    .substep_interval
                    .saturating_sub(self.cadence.since_substep),
            )
        } else {
            to_tick
        }
    }

    /// Run every sub-step and tick that fell due during `elapsed`
    pub fn advance(&mut self, elapsed: Duration) -> AdvanceReport {
        let mut report = AdvanceReport::default();
        let mut remaining = elapsed.min(MAX_CATCH_UP);

        loop {
            let to_tick = self
                .cadence
                .tick_period
                .saturating_sub(self.cadence.since_tick);
            let to_substep = self.animation.is_active().then(|| {
                self.cadence
                    .substep_interval
                    .saturating_sub(self.cadence.since_substep)
            });

            match to_substep {
                // Sub-steps win ties so a glide completes before the next tick
                Some(wait) if wait <= to_tick && wait <= remaining => {
                    remaining -= wait;
                    self.cadence.since_tick += wait;
                    self.cadence.since_substep = Duration::ZERO;
                    self.step_animation();
                    report.substeps += 1;
                }
                _ if to_tick <= remaining => {
                    remaining -= to_tick;
                    self.cadence.since_tick = Duration::ZERO;
                    self.cadence.since_substep = Duration::ZERO;
                    self.tick();
                    report.ticks += 1;
                }
                _ => {
                    self.cadence.since_tick += remaining;
                    if self.animation.is_active() {
                        self.cadence.since_substep += remaining;
                    }
                    break;
                }
            }
        }

        report
    }

    /// Run one ingestion tick now
    ///
    /// Running: append a sample, slide the ranges (when following) and
    /// start the glide. Stopped: append a zero-valued sample only, so the
    /// timeline keeps moving.
    pub fn tick(&mut self) {
        self.close_pending_glide();

        let sample = self.source.next_sample();
        match self.run_state {
            RunState::Running => {
                self.buffer.push(sample);
                if self.view_mode == ViewMode::Following {
                    self.axes.update_sliding(sample.timestamp_ms, &self.buffer);
                }
                self.animation.start(&mut self.buffer);
                tracing::trace!(
                    "Tick: t={} v={:.3} ({} points)",
                    sample.timestamp_ms,
                    sample.value,
                    self.buffer.len()
                );
            }
            RunState::Stopped => {
                self.buffer.append(sample.timestamp_ms, 0.0);
            }
        }

        self.refresh_tooltip();
    }

    /// Deliver one animation sub-step
    pub fn step_animation(&mut self) -> StepOutcome {
        self.animation
            .step(&mut self.buffer, self.run_state.is_running())
    }

    /// Deliver every remaining sub-step of the current glide
    pub fn settle(&mut self) {
        while self.step_animation() == StepOutcome::Advanced {}
    }

    // ==================== Commands ====================

    /// Flip Running/Stopped; returns the new state
    pub fn toggle(&mut self) -> RunState {
        self.run_state = self.run_state.toggled();
        tracing::info!("Chart {}", self.run_state);
        self.run_state
    }

    /// Return to the sliding window driven by ticks
    pub fn reset_view(&mut self) {
        self.view_mode = ViewMode::Following;
        match self.buffer.last() {
            Ok(last) => self.axes.update_sliding(last.timestamp_ms, &self.buffer),
            Err(_) => self.axes.reset(now_millis() as f64),
        }
        self.refresh_tooltip();
    }

    /// Scale both axes about their centers (`> 1` zooms out)
    pub fn zoom(&mut self, factor: f64) {
        let zoomed = self.viewport_ctl.zoom(self.axes.viewport(), factor);
        self.apply_user_viewport(zoomed);
    }

    /// Shift the time axis by a horizontal drag of `delta_pixels`
    pub fn pan(&mut self, delta_pixels: f64) {
        let panned =
            self.viewport_ctl
                .pan(self.axes.viewport(), delta_pixels, self.plot_rect.width);
        self.apply_user_viewport(panned);
    }

    /// Export the buffer to a CSV file
    pub fn request_save_csv(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.close_pending_glide();
        csv_codec::save(path, self.buffer.points())
    }

    /// Replace the buffer with a CSV file and fit the view to it
    ///
    /// On failure the current buffer is left untouched. Returns the number
    /// of points loaded.
    pub fn request_load_csv(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let points = csv_codec::load(path)?;
        Ok(self.replace_series(points))
    }

    /// Replace the whole series, abort any glide and fit the view
    pub fn replace_series(&mut self, points: Vec<Point>) -> usize {
        self.animation.abort();
        self.buffer.clear();
        self.buffer.replace_all(points);

        if self.buffer.is_empty() {
            self.axes.reset(now_millis() as f64);
        } else {
            self.axes.fit_to_data(&self.buffer);
        }
        self.view_mode = ViewMode::Manual;
        self.refresh_tooltip();

        tracing::info!("Series replaced with {} points", self.buffer.len());
        self.buffer.len()
    }

    /// Ask the shell to capture the chart into an image file
    pub fn request_save_image(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let request = CaptureRequest::new(path)?;
        tracing::info!("Image capture requested: {:?}", request.path);
        self.capture_request = Some(request);
        Ok(())
    }

    /// Take the pending capture request, if any
    pub fn take_capture_request(&mut self) -> Option<CaptureRequest> {
        self.capture_request.take()
    }

    // ==================== Pointer Events ====================

    /// Report the plot area in screen pixels
    pub fn set_plot_rect(&mut self, rect: PlotRect) {
        self.plot_rect = rect;
    }

    pub fn on_press_start(&mut self, pos: ScreenPos) {
        self.drag.press(pos);
    }

    pub fn on_drag(&mut self, pos: ScreenPos) {
        if let Some(delta) = self.drag.drag_to(pos) {
            self.pan(delta);
        }
    }

    pub fn on_release(&mut self) {
        self.drag.release();
    }

    pub fn on_scroll(&mut self, direction: ScrollDirection) {
        let factor = self.viewport_ctl.step_factor(direction);
        self.zoom(factor);
    }

    pub fn on_hover_move(&mut self, pos: ScreenPos) {
        self.hover_pos = Some(pos);
        self.refresh_tooltip();
    }

    pub fn on_hover_leave(&mut self) {
        self.hover_pos = None;
        self.tooltip = None;
    }

    /// End a glide still in flight before the buffer is read or extended
    ///
    /// While running the point jumps to its sampled value so history keeps
    /// true values. A stopped chart keeps the point frozen where it is.
    fn close_pending_glide(&mut self) {
        if self.run_state.is_running() {
            self.animation.finish(&mut self.buffer);
        } else {
            self.animation.abort();
        }
    }

    fn apply_user_viewport(&mut self, viewport: Viewport) {
        if viewport == self.axes.viewport() {
            return;
        }
        self.axes.set_viewport(viewport);
        if self.hold_on_interact {
            self.view_mode = ViewMode::Manual;
        }
        self.refresh_tooltip();
    }

    fn refresh_tooltip(&mut self) {
        self.tooltip = self
            .hover_pos
            .filter(|pos| self.plot_rect.contains(*pos))
            .and_then(|pos| {
                self.hit_tester
                    .hover(pos, &self.buffer, &self.axes, &self.plot_rect)
            });
    }
}
