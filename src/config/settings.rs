//! Engine settings sections
//!
//! Each section of `livechart.toml` maps to one struct here. All fields
//! carry serde defaults so a partial file loads cleanly.
//!
//! # Main Types
//!
//! - [`SamplingConfig`] - Tick period and random value range
//! - [`AnimationConfig`] - Sub-step count and cadence
//! - [`AxesConfig`] - Sliding window, Y padding and minimum spans
//! - [`ViewportConfig`] - Zoom factors and pan limits
//! - [`HoverConfig`] - Tooltip hit threshold

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Sample ingestion settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Time between ticks in milliseconds
    pub tick_period_ms: u64,
    /// Lower bound of random values (inclusive)
    pub value_min: f64,
    /// Upper bound of random values (exclusive)
    pub value_max: f64,
    /// Fixed seed for the random source (None = seeded from the OS)
    pub seed: Option<u64>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            tick_period_ms: 100,
            value_min: 0.0,
            value_max: 100.0,
            seed: None,
        }
    }
}

impl SamplingConfig {
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }
}

/// Newest-point glide settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Whether new samples glide in at all
    pub enabled: bool,
    /// Sub-steps per glide
    pub steps: usize,
    /// Time between sub-steps in milliseconds
    pub substep_interval_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            steps: 100,
            substep_interval_ms: 1,
        }
    }
}

impl AnimationConfig {
    pub fn substep_interval(&self) -> Duration {
        Duration::from_millis(self.substep_interval_ms)
    }
}

/// Which points feed the automatic Y range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YScope {
    /// Every buffered point
    #[default]
    #[serde(alias = "all")]
    AllPoints,
    /// Only points inside the current X range
    #[serde(alias = "visible")]
    VisibleWindow,
}

/// Axis auto-ranging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxesConfig {
    /// Width of the sliding time window in milliseconds
    pub window_ms: f64,
    /// Y padding as a fraction of the value span
    pub padding_fraction: f64,
    /// Smallest Y span shown (flat series)
    pub min_y_span: f64,
    /// Smallest X span shown after a fit (single-point series)
    pub min_x_span_ms: f64,
    /// Points considered for the Y range
    pub y_scope: YScope,
}

impl Default for AxesConfig {
    fn default() -> Self {
        Self {
            window_ms: 10_000.0,
            padding_fraction: 0.1,
            min_y_span: 2.0,
            min_x_span_ms: 1.0,
            y_scope: YScope::AllPoints,
        }
    }
}

/// Zoom/pan settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Scale factor for one zoom-in notch
    pub zoom_in_factor: f64,
    /// Scale factor for one zoom-out notch
    pub zoom_out_factor: f64,
    /// Largest drag delta (pixels) applied in one move
    pub max_pan_delta: f64,
    /// Keep user zoom/pan until the view is reset instead of sliding on the next tick
    pub hold_on_interact: bool,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            zoom_in_factor: 0.95,
            zoom_out_factor: 1.05,
            max_pan_delta: 10_000.0,
            hold_on_interact: false,
        }
    }
}

/// Hover tooltip settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoverConfig {
    /// Maximum pointer-to-line distance in pixels
    pub threshold_px: f64,
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self { threshold_px: 5.0 }
    }
}
