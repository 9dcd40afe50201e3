//! Configuration module for the voice widget.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for the UI and the
//! turn-cycle timing, `AppPaths` for cross-platform data directories, and
//! TOML persistence via `AppConfig::load` / `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, TimingConfig, TurnEntry, UiConfig};
