//! Core data types for LiveChart-RS
//!
//! This module contains the fundamental value types shared by the engine
//! and the shell.
//!
//! # Main Types
//!
//! - [`Point`] - A single sample in domain coordinates (epoch ms, value)
//! - [`Range`] - Closed numeric interval used for one axis
//! - [`Viewport`] - The visible X (time) and Y (value) ranges
//! - [`ScreenPos`] - A pointer position in screen pixels
//! - [`PlotRect`] - The on-screen plot area used for pixel mapping
//!
//! # Coordinates
//!
//! Domain coordinates are `(timestamp_ms, value)`. Timestamps are epoch
//! milliseconds held as `f64`: interpolated points and imported CSV rows
//! both carry fractional milliseconds.

use serde::{Deserialize, Serialize};

/// A single timestamped sample
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Epoch timestamp in milliseconds
    pub timestamp_ms: f64,
    /// Sample value
    pub value: f64,
}

impl Point {
    /// Create a new point
    pub fn new(timestamp_ms: f64, value: f64) -> Self {
        Self {
            timestamp_ms,
            value,
        }
    }

    /// Create a point from an integer epoch-millisecond timestamp
    pub fn at_millis(timestamp_ms: i64, value: f64) -> Self {
        Self::new(timestamp_ms as f64, value)
    }

    /// Linear interpolation between `self` (t = 0) and `other` (t = 1)
    pub fn lerp(&self, other: &Point, t: f64) -> Point {
        Point {
            timestamp_ms: self.timestamp_ms + t * (other.timestamp_ms - self.timestamp_ms),
            value: self.value + t * (other.value - self.value),
        }
    }

    /// Convert to the `[x, y]` form used by egui_plot
    pub fn as_plot_point(&self) -> [f64; 2] {
        [self.timestamp_ms, self.value]
    }
}

/// Closed interval `[min, max]` on one axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
}

impl Range {
    /// Create a new range, swapping bounds if needed
    pub fn new(mut min: f64, mut max: f64) -> Self {
        if min > max {
            std::mem::swap(&mut min, &mut max);
        }
        Self { min, max }
    }

    /// Width of the range
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Midpoint of the range
    pub fn center(&self) -> f64 {
        (self.min + self.max) * 0.5
    }

    /// Check whether a value lies inside the closed range
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Check whether both bounds are finite
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Shift both bounds by `delta`
    pub fn shifted(&self, delta: f64) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }

    /// Grow (positive) or shrink (negative) both bounds by `delta`
    pub fn expanded(&self, delta: f64) -> Self {
        Self::new(self.min - delta, self.max + delta)
    }

    /// Ensure the range has at least the given span, keeping its center
    pub fn with_min_span(&self, min_span: f64) -> Self {
        if self.span() >= min_span {
            return *self;
        }
        let center = self.center();
        let half = min_span * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }
}

/// Visible data ranges on both axes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Time axis, epoch milliseconds
    pub x: Range,
    /// Value axis
    pub y: Range,
}

impl Viewport {
    /// Create a viewport from X and Y ranges
    pub fn new(x: Range, y: Range) -> Self {
        Self { x, y }
    }
}

/// Pointer position in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPos {
    pub x: f64,
    pub y: f64,
}

impl ScreenPos {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// On-screen plot area, in pixels, with Y growing downward
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlotRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Bottom edge in pixels
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Returns true if the rect has a usable area
    pub fn is_drawable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Check whether a screen position falls inside the rect
    pub fn contains(&self, pos: ScreenPos) -> bool {
        pos.x >= self.left
            && pos.x <= self.left + self.width
            && pos.y >= self.top
            && pos.y <= self.bottom()
    }
}

/// Whether the chart is sampling live values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    /// Random samples are appended and animated each tick
    #[default]
    Running,
    /// Ticks append zero-valued samples only
    Stopped,
}

impl RunState {
    pub fn is_running(&self) -> bool {
        matches!(self, RunState::Running)
    }

    /// The opposite state
    pub fn toggled(&self) -> RunState {
        match self {
            RunState::Running => RunState::Stopped,
            RunState::Stopped => RunState::Running,
        }
    }

    /// Label for the toggle command in this state
    pub fn toggle_label(&self) -> &'static str {
        match self {
            RunState::Running => "Stop",
            RunState::Stopped => "Continue",
        }
    }
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunState::Running => write!(f, "Running"),
            RunState::Stopped => write!(f, "Stopped"),
        }
    }
}
