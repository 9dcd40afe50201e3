//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared freely.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::sim::{Script, Timing, Turn};

use super::AppPaths;

// ---------------------------------------------------------------------------
// UiConfig
// ---------------------------------------------------------------------------

/// Widget appearance and behaviour settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Assistant name shown in the widget header.
    pub title: String,
    /// Last saved widget position `(x, y)` in screen pixels.  `None` means
    /// let the OS / window manager pick a position on first launch.
    pub window_position: Option<(f32, f32)>,
    /// Keep the widget floating above all other windows.
    pub always_on_top: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: "Job Seeker Bot".into(),
            window_position: None,
            always_on_top: false,
        }
    }
}

// ---------------------------------------------------------------------------
// TimingConfig
// ---------------------------------------------------------------------------

/// Delays driving the simulated turn cycle, in milliseconds.
///
/// | Field               | Default | Meaning                                 |
/// |---------------------|---------|-----------------------------------------|
/// | `listening_ms`      | 3000    | Listening window before auto-stop       |
/// | `processing_ms`     | 1500    | Simulated recognition delay             |
/// | `reply_delay_ms`    | 500     | Pause before the reply appears          |
/// | `speaking_hold_ms`  | 4000    | Reading time before returning to idle   |
/// | `reveal_tick_ms`    | 20      | Cadence of the character reveal         |
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TimingConfig {
    pub listening_ms: u64,
    pub processing_ms: u64,
    pub reply_delay_ms: u64,
    pub speaking_hold_ms: u64,
    pub reveal_tick_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            listening_ms: 3000,
            processing_ms: 1500,
            reply_delay_ms: 500,
            speaking_hold_ms: 4000,
            reveal_tick_ms: 20,
        }
    }
}

impl TimingConfig {
    /// Convert to the sequencer's `Duration`-based [`Timing`].
    pub fn to_timing(self) -> Timing {
        use std::time::Duration;
        Timing {
            listening: Duration::from_millis(self.listening_ms),
            processing: Duration::from_millis(self.processing_ms),
            reply_delay: Duration::from_millis(self.reply_delay_ms),
            speaking_hold: Duration::from_millis(self.speaking_hold_ms),
            reveal_tick: Duration::from_millis(self.reveal_tick_ms),
        }
    }
}

// ---------------------------------------------------------------------------
// TurnEntry
// ---------------------------------------------------------------------------

/// One `[[script]]` table in `settings.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnEntry {
    /// The simulated user utterance.
    pub user: String,
    /// The assistant's canned reply.
    pub assistant: String,
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use voice_widget::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Widget appearance settings.
    pub ui: UiConfig,
    /// Turn-cycle delays.
    pub timing: TimingConfig,
    /// Custom conversation turns.  Empty means use the built-in demo script.
    #[serde(default)]
    pub script: Vec<TurnEntry>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ui: UiConfig::default(),
            timing: TimingConfig::default(),
            script: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// (first-run scenario) so callers never need to special-case a missing
    /// file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Build the conversation [`Script`] from the configured turns.
    ///
    /// An empty `[[script]]` list selects the built-in demo script; an
    /// invalid one falls back to it with a warning rather than aborting.
    pub fn script(&self) -> Script {
        if self.script.is_empty() {
            return Script::demo();
        }

        let turns: Vec<Turn> = self
            .script
            .iter()
            .map(|entry| Turn::new(entry.user.as_str(), entry.assistant.as_str()))
            .collect();

        match Script::new(turns) {
            Ok(script) => script,
            Err(err) => {
                log::warn!("config: invalid script ({err}); using the built-in demo script");
                Script::demo()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// Verify that a default `AppConfig` can be serialised to TOML and
    /// deserialised back without any data loss.
    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let original = AppConfig::default();
        original.save_to(&path).expect("save");

        let loaded = AppConfig::load_from(&path).expect("load");

        // UiConfig
        assert_eq!(original.ui.title, loaded.ui.title);
        assert_eq!(original.ui.always_on_top, loaded.ui.always_on_top);
        assert_eq!(original.ui.window_position, loaded.ui.window_position);

        // TimingConfig
        assert_eq!(original.timing.listening_ms, loaded.timing.listening_ms);
        assert_eq!(original.timing.processing_ms, loaded.timing.processing_ms);
        assert_eq!(original.timing.reply_delay_ms, loaded.timing.reply_delay_ms);
        assert_eq!(
            original.timing.speaking_hold_ms,
            loaded.timing.speaking_hold_ms
        );
        assert_eq!(original.timing.reveal_tick_ms, loaded.timing.reveal_tick_ms);

        // Script (empty by default)
        assert!(loaded.script.is_empty());
    }

    /// `load_from` on a non-existent path must return `Default` without error.
    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        let default = AppConfig::default();

        assert_eq!(config.ui.title, default.ui.title);
        assert_eq!(config.timing.listening_ms, default.timing.listening_ms);
        assert!(config.script.is_empty());
    }

    /// Verify default delays match the demo's pacing.
    #[test]
    fn default_timing_values() {
        let cfg = AppConfig::default();

        assert_eq!(cfg.timing.listening_ms, 3000);
        assert_eq!(cfg.timing.processing_ms, 1500);
        assert_eq!(cfg.timing.reply_delay_ms, 500);
        assert_eq!(cfg.timing.speaking_hold_ms, 4000);
        assert_eq!(cfg.timing.reveal_tick_ms, 20);
        assert_eq!(cfg.ui.title, "Job Seeker Bot");
    }

    /// Verify that modified non-default values survive a round trip.
    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("modified.toml");

        let mut cfg = AppConfig::default();
        cfg.ui.title = "Interview Coach".into();
        cfg.ui.always_on_top = true;
        cfg.ui.window_position = Some((100.0, 200.0));
        cfg.timing.listening_ms = 1000;
        cfg.timing.reveal_tick_ms = 5;
        cfg.script.push(TurnEntry {
            user: "hi".into(),
            assistant: "hello".into(),
        });

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded.ui.title, "Interview Coach");
        assert!(loaded.ui.always_on_top);
        assert_eq!(loaded.ui.window_position, Some((100.0, 200.0)));
        assert_eq!(loaded.timing.listening_ms, 1000);
        assert_eq!(loaded.timing.reveal_tick_ms, 5);
        assert_eq!(loaded.script.len(), 1);
        assert_eq!(loaded.script[0].assistant, "hello");
    }

    /// `to_timing` converts milliseconds into `Duration`s.
    #[test]
    fn timing_conversion() {
        let timing = TimingConfig::default().to_timing();
        assert_eq!(timing.listening.as_millis(), 3000);
        assert_eq!(timing.reveal_tick.as_millis(), 20);
    }

    /// An empty `[[script]]` list selects the built-in demo turns.
    #[test]
    fn empty_script_selects_demo() {
        let cfg = AppConfig::default();
        let script = cfg.script();
        assert_eq!(script.len(), Script::demo().len());
    }

    /// Configured turns take precedence over the demo script.
    #[test]
    fn configured_turns_build_the_script() {
        let mut cfg = AppConfig::default();
        cfg.script.push(TurnEntry {
            user: "custom question".into(),
            assistant: "custom answer".into(),
        });

        let script = cfg.script();
        assert_eq!(script.len(), 1);
        assert_eq!(script.current().user, "custom question");
    }
}
