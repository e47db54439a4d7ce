//! Configuration module for LiveChart-RS
//!
//! This module handles:
//! - Engine configuration (`livechart.toml`): tick rate, animation, axes,
//!   zoom/pan and hover settings
//! - Application state persistence (`app_state.json`): recent CSV files and
//!   the last directory used by the file dialogs
//!
//! # App Data Location
//!
//! Both files live in the platform-appropriate data directory:
//! - **Linux**: `~/.local/share/dev.livechart-rs/`
//! - **macOS**: `~/Library/Application Support/dev.livechart-rs/`
//! - **Windows**: `%APPDATA%\dev.livechart-rs\`
//!
//! # Example
//!
//! ```ignore
//! use livechart_rs::config::{AppState, ChartConfig};
//!
//! let config = ChartConfig::load_or_default();
//! let mut state = AppState::load_or_default();
//!
//! state.add_recent_file("run.csv");
//! state.save()?;
//! ```

pub mod settings;

pub use settings::*;

use crate::error::{ChartError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application identifier for data directories
pub const APP_ID: &str = "dev.livechart-rs";

/// Engine configuration filename
pub const CONFIG_FILE: &str = "livechart.toml";

/// App state filename
pub const APP_STATE_FILE: &str = "app_state.json";

/// CSV file extension used by the file dialogs
pub const CSV_FILE_EXTENSION: &str = "csv";

/// Maximum number of recent files to remember
pub const MAX_RECENT_FILES: usize = 10;

// ==================== App Data Directory ====================

/// Get the application data directory path
pub fn app_data_dir() -> Option<PathBuf> {
    dirs_next::data_dir().map(|p| p.join(APP_ID))
}

/// Ensure the app data directory exists
pub fn ensure_app_data_dir() -> Result<PathBuf> {
    let dir = app_data_dir().ok_or_else(|| {
        ChartError::Config("Could not determine app data directory".to_string())
    })?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| {
            ChartError::Config(format!("Failed to create app data directory: {}", e))
        })?;
    }

    Ok(dir)
}

/// Get the path to the engine configuration file
pub fn config_path() -> Option<PathBuf> {
    app_data_dir().map(|p| p.join(CONFIG_FILE))
}

/// Get the path to the app state file
pub fn app_state_path() -> Option<PathBuf> {
    app_data_dir().map(|p| p.join(APP_STATE_FILE))
}

// ==================== Chart Config ====================

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub sampling: SamplingConfig,
    pub animation: AnimationConfig,
    pub axes: AxesConfig,
    pub viewport: ViewportConfig,
    pub hover: HoverConfig,
}

impl ChartConfig {
    /// Load from the default location; a missing file yields defaults
    pub fn load() -> Result<Self> {
        let path = config_path().ok_or_else(|| {
            ChartError::Config("Could not determine config path".to_string())
        })?;

        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load and validate a config file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ChartError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| {
            ChartError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load config, returning defaults on any error
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save to the default location
    pub fn save(&self) -> Result<()> {
        let dir = ensure_app_data_dir()?;
        self.save_to(dir.join(CONFIG_FILE))
    }

    /// Save to a specific path as TOML
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| ChartError::Serialization(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| {
            ChartError::Config(format!("Failed to write config file {:?}: {}", path, e))
        })
    }

    /// Reject settings the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.sampling.tick_period_ms == 0 {
            return Err(ChartError::Config("tick_period_ms must be positive".into()));
        }
        if !(self.sampling.value_min < self.sampling.value_max) {
            return Err(ChartError::Config(format!(
                "value range [{}, {}) is empty",
                self.sampling.value_min, self.sampling.value_max
            )));
        }
        if self.animation.enabled && self.animation.steps == 0 {
            return Err(ChartError::Config("animation steps must be positive".into()));
        }
        if !(self.axes.window_ms > 0.0) {
            return Err(ChartError::Config("window_ms must be positive".into()));
        }
        if !(self.axes.padding_fraction >= 0.0) {
            return Err(ChartError::Config("padding_fraction must not be negative".into()));
        }
        if !(self.axes.min_y_span >= 0.0) || !(self.axes.min_x_span_ms >= 0.0) {
            return Err(ChartError::Config("minimum spans must not be negative".into()));
        }
        let vp = &self.viewport;
        if !(vp.zoom_in_factor > 0.0 && vp.zoom_in_factor < 1.0)
            || !(vp.zoom_out_factor > 1.0)
        {
            return Err(ChartError::Config(
                "zoom factors must satisfy 0 < zoom_in < 1 < zoom_out".into(),
            ));
        }
        if !(vp.max_pan_delta > 0.0) {
            return Err(ChartError::Config("max_pan_delta must be positive".into()));
        }
        if !(self.hover.threshold_px >= 0.0) {
            return Err(ChartError::Config("threshold_px must not be negative".into()));
        }
        Ok(())
    }
}

// ==================== App State ====================

/// Persistent application state
///
/// User history that persists across sessions, separate from the engine
/// configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppState {
    /// Version for future migration support
    #[serde(default = "default_app_state_version")]
    pub version: u32,

    /// Recently saved or loaded CSV files, most recent first
    #[serde(default)]
    pub recent_files: Vec<PathBuf>,

    /// Directory last used by a file dialog
    #[serde(default)]
    pub last_directory: Option<PathBuf>,
}

fn default_app_state_version() -> u32 {
    1
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            version: 1,
            recent_files: Vec::new(),
            last_directory: None,
        }
    }
}

impl AppState {
    /// Load app state from the default location
    pub fn load() -> Result<Self> {
        let path = app_state_path().ok_or_else(|| {
            ChartError::Config("Could not determine app state path".to_string())
        })?;

        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load app state from a specific file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ChartError::Config(format!("Failed to read app state: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| ChartError::Config(format!("Failed to parse app state: {}", e)))
    }

    /// Load app state, returning defaults on any error
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load app state, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save app state to the default location
    pub fn save(&self) -> Result<()> {
        let dir = ensure_app_data_dir()?;
        self.save_to(dir.join(APP_STATE_FILE))
    }

    /// Save app state to a specific file
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::Config(format!("Failed to serialize app state: {}", e)))?;

        std::fs::write(path.as_ref(), content)
            .map_err(|e| ChartError::Config(format!("Failed to write app state: {}", e)))
    }

    /// Record a file as most recently used
    pub fn add_recent_file(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref().to_path_buf();

        self.recent_files.retain(|p| p != &path);
        self.last_directory = path.parent().map(Path::to_path_buf);
        self.recent_files.insert(0, path);
        self.recent_files.truncate(MAX_RECENT_FILES);
    }

    /// Drop recent files that no longer exist
    pub fn cleanup_missing_files(&mut self) {
        self.recent_files.retain(|p| p.exists());

        if let Some(ref dir) = self.last_directory {
            if !dir.exists() {
                self.last_directory = None;
            }
        }
    }
}
