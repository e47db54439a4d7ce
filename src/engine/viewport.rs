//! Zoom and pan on the visible ranges
//!
//! Both operations are pure functions of a [`Viewport`]: the engine reads
//! the current ranges from the axis controller, transforms them here and
//! writes them back. Sample data is never touched.

use crate::config::ViewportConfig;
use crate::types::{ScreenPos, Viewport};

/// Scroll wheel direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    /// Wheel away from the user: zoom in
    Up,
    /// Wheel toward the user: zoom out
    Down,
}

impl ScrollDirection {
    /// Direction from a raw vertical scroll delta, `None` for zero
    pub fn from_delta(delta_y: f32) -> Option<Self> {
        if delta_y > 0.0 {
            Some(ScrollDirection::Up)
        } else if delta_y < 0.0 {
            Some(ScrollDirection::Down)
        } else {
            None
        }
    }
}

/// Zoom/pan parameters
#[derive(Debug, Clone)]
pub struct ViewportController {
    zoom_in_factor: f64,
    zoom_out_factor: f64,
    max_pan_delta: f64,
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new(&ViewportConfig::default())
    }
}

impl ViewportController {
    pub fn new(config: &ViewportConfig) -> Self {
        Self {
            zoom_in_factor: config.zoom_in_factor,
            zoom_out_factor: config.zoom_out_factor,
            max_pan_delta: config.max_pan_delta,
        }
    }

    /// Scale both axes about their centers
    ///
    /// `factor > 1` zooms out, `factor < 1` zooms in. Non-finite or
    /// non-positive factors leave the viewport unchanged.
    pub fn zoom(&self, viewport: Viewport, factor: f64) -> Viewport {
        if !factor.is_finite() || factor <= 0.0 || factor == 1.0 {
            return viewport;
        }
        let delta_x = viewport.x.span() * (factor - 1.0) / 2.0;
        let delta_y = viewport.y.span() * (factor - 1.0) / 2.0;
        Viewport::new(viewport.x.expanded(delta_x), viewport.y.expanded(delta_y))
    }

    /// Factor applied for one wheel notch
    pub fn step_factor(&self, direction: ScrollDirection) -> f64 {
        match direction {
            ScrollDirection::Up => self.zoom_in_factor,
            ScrollDirection::Down => self.zoom_out_factor,
        }
    }

    /// Zoom by one wheel notch
    pub fn zoom_step(&self, viewport: Viewport, direction: ScrollDirection) -> Viewport {
        self.zoom(viewport, self.step_factor(direction))
    }

    /// Shift the X range by a horizontal drag of `delta_pixels`
    ///
    /// The delta is clamped to the configured maximum, then converted to
    /// time using the visible span per pixel. Both X bounds move by that
    /// time delta in the drag direction: a drag to the right moves the view
    /// to later times. Y is untouched.
    pub fn pan(&self, viewport: Viewport, delta_pixels: f64, pixel_width: f64) -> Viewport {
        if !delta_pixels.is_finite() || delta_pixels == 0.0 || pixel_width <= 0.0 {
            return viewport;
        }
        let delta = delta_pixels.clamp(-self.max_pan_delta, self.max_pan_delta);
        let time_delta = delta * viewport.x.span() / pixel_width;
        Viewport::new(viewport.x.shifted(time_delta), viewport.y)
    }
}

/// Pointer drag tracking
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragState {
    pub active: bool,
    pub last_pos: ScreenPos,
}

impl DragState {
    /// Begin a drag at `pos`
    pub fn press(&mut self, pos: ScreenPos) {
        self.active = true;
        self.last_pos = pos;
    }

    /// Move the pointer; returns the horizontal delta while dragging
    pub fn drag_to(&mut self, pos: ScreenPos) -> Option<f64> {
        if !self.active {
            return None;
        }
        let delta = pos.x - self.last_pos.x;
        self.last_pos = pos;
        Some(delta)
    }

    /// End the drag
    pub fn release(&mut self) -> bool {
        std::mem::replace(&mut self.active, false)
    }
}
