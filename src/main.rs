//! LiveChart - Main Entry Point
//!
//! Opens a window with a live random-valued time series.

use livechart_rs::{AppState, ChartConfig, LiveChartApp};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,livechart_rs=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting LiveChart");

    let config = ChartConfig::load_or_default();

    let mut app_state = AppState::load_or_default();
    app_state.cleanup_missing_files();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 640.0])
            .with_min_inner_size([480.0, 320.0])
            .with_title("LiveChart"),
        ..Default::default()
    };

    let result = eframe::run_native(
        "LiveChart",
        native_options,
        Box::new(|cc| Ok(Box::new(LiveChartApp::new(cc, config, app_state)))),
    );

    tracing::info!("Shutting down...");
    result
}
