//! UI actions and their dispatch
//!
//! Menu items and shortcuts return [`AppAction`]s instead of calling the
//! engine directly. [`apply_action`] is the single place where an action
//! reaches the engine, which keeps it testable without a window.

use std::path::PathBuf;

use crate::config::AppState;
use crate::engine::ChartEngine;
use crate::error::Result;

/// Actions the shell can emit
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    /// Flip Running/Stopped
    ToggleRun,
    /// Capture the chart into an image file
    SaveImage(PathBuf),
    /// Replace the series with a CSV file
    LoadCsv(PathBuf),
    /// Write the series to a CSV file
    SaveCsv(PathBuf),
    /// Return to the live sliding window
    ResetView,
}

/// Run an action against the engine
///
/// Returns a short status message on success. File actions record the path
/// in the recent-files history.
pub fn apply_action(
    engine: &mut ChartEngine,
    app_state: &mut AppState,
    action: AppAction,
) -> Result<String> {
    match action {
        AppAction::ToggleRun => {
            let state = engine.toggle();
            Ok(state.to_string())
        }
        AppAction::SaveImage(path) => {
            engine.request_save_image(&path)?;
            app_state.last_directory = path.parent().map(PathBuf::from);
            Ok(format!("Capturing {}", path.display()))
        }
        AppAction::LoadCsv(path) => {
            let count = engine.request_load_csv(&path)?;
            app_state.add_recent_file(&path);
            Ok(format!("Loaded {} points from {}", count, path.display()))
        }
        AppAction::SaveCsv(path) => {
            engine.request_save_csv(&path)?;
            app_state.add_recent_file(&path);
            Ok(format!(
                "Saved {} points to {}",
                engine.buffer().len(),
                path.display()
            ))
        }
        AppAction::ResetView => {
            engine.reset_view();
            Ok("View reset".to_string())
        }
    }
}
