//! # LiveChart-RS: Live Time-Series Chart
//!
//! A single-series live chart. Every tick a new sample is appended and the
//! newest point glides in from its predecessor; the time axis slides to
//! follow the latest sample while the value axis auto-fits. The user can
//! zoom, pan, hover for values, and round-trip the series through CSV.
//!
//! ## Architecture
//!
//! - **Engine**: [`ChartEngine`] owns all chart state and is driven by a
//!   frame clock (`advance`); it never blocks or sleeps
//! - **Sources**: [`SampleSource`] produces one sample per tick
//! - **Persistence**: two-column CSV via [`csv_codec`], PNG capture via
//!   [`capture`]
//! - **Frontend**: eframe/egui shell with egui_plot rendering
//!
//! ## Configuration
//!
//! Engine settings (`livechart.toml`) and app state (`app_state.json`) live
//! in the platform data directory under `dev.livechart-rs`:
//!
//! - **Linux**: `~/.local/share/dev.livechart-rs/`
//! - **macOS**: `~/Library/Application Support/dev.livechart-rs/`
//! - **Windows**: `%APPDATA%\dev.livechart-rs\`
//!
//! ## Example
//!
//! ```ignore
//! use livechart_rs::{ChartConfig, ChartEngine};
//! use std::time::Duration;
//!
//! let mut engine = ChartEngine::new(&ChartConfig::default());
//! engine.advance(Duration::from_millis(500));
//! assert_eq!(engine.buffer().len(), 5);
//! ```

pub mod capture;
pub mod config;
pub mod csv_codec;
pub mod engine;
pub mod error;
pub mod frontend;
pub mod series;
pub mod source;
pub mod types;

// Re-export commonly used types
pub use config::{AppState, ChartConfig};
pub use engine::{ChartEngine, ScrollDirection, ViewMode};
pub use error::{ChartError, Result};
pub use frontend::LiveChartApp;
pub use series::SeriesBuffer;
pub use source::{RandomSource, SampleSource, SequenceSource};
pub use types::{Point, Range, RunState, Viewport};
