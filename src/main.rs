//! Application entry point — voice-assistant chat widget demo.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Build the [`VoiceWidgetApp`] — conversation script and timing come
//!    from the config, with the built-in demo script as the fallback.
//! 4. Run [`eframe::run_native`] — blocks the main thread until the window
//!    is closed.

use eframe::egui;
use voice_widget::{app::VoiceWidgetApp, config::AppConfig};

// ---------------------------------------------------------------------------
// Native options builder
// ---------------------------------------------------------------------------

fn native_options(config: &AppConfig) -> eframe::NativeOptions {
    let mut vp = egui::ViewportBuilder::default()
        .with_inner_size([360.0, 540.0])
        .with_min_inner_size([300.0, 400.0]);

    if config.ui.always_on_top {
        vp = vp.with_always_on_top();
    }

    if let Some((x, y)) = config.ui.window_position {
        vp = vp.with_position(egui::pos2(x, y));
    }

    eframe::NativeOptions {
        viewport: vp,
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> eframe::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("voice widget starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    // 3. Application
    let app = VoiceWidgetApp::new(config.clone());

    // 4. Run (blocks until the window is closed)
    eframe::run_native(
        "Voice Widget",
        native_options(&config),
        Box::new(move |_cc| Ok(Box::new(app))),
    )
}
