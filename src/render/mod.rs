//! Rendering collaborator seam.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                WidgetRenderer (trait)                │
//! │                                                     │
//! │   Sequencer ──side effects──▶ set_status            │
//! │                               set_indicator         │
//! │                               set_container_mode    │
//! │                               set_waveform          │
//! │                               append_message        │
//! │                               update_reveal         │
//! │                               scroll_to_latest      │
//! │                                                     │
//! │   impls: ViewState (egui view)  NullRenderer (sink) │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! The sequencer never touches egui directly; every transition side effect
//! goes through this trait. [`ViewState`] is the production implementation —
//! retained view state the draw code reads each frame. [`NullRenderer`]
//! discards everything and is handy in headless tests and doctests.

pub mod view;

use crate::sim::{MessageId, Phase, Speaker};

// ── Public re-exports ──────────────────────────────────────────────────────

pub use view::{ViewMessage, ViewState};

// ---------------------------------------------------------------------------
// WaveformStyle
// ---------------------------------------------------------------------------

/// Visual style of the animated waveform bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveformStyle {
    /// Input style, shown while listening.
    Normal,
    /// Output style, shown while the assistant speaks.
    Speaking,
}

// ---------------------------------------------------------------------------
// WidgetRenderer
// ---------------------------------------------------------------------------

/// Consumer of the sequencer's state-change side effects.
pub trait WidgetRenderer {
    /// Update the human-readable status label.
    fn set_status(&mut self, label: &str);

    /// Turn the status-dot indicator on or off.
    fn set_indicator(&mut self, active: bool);

    /// Set the container-level mode marker (drives accent colours etc.).
    fn set_container_mode(&mut self, mode: Phase);

    /// Start or stop the waveform bar animation.
    fn set_waveform(&mut self, active: bool, style: WaveformStyle);

    /// Append a chat message and return a handle for later reveal updates.
    ///
    /// `text` is the full message body. Assistant messages are displayed
    /// empty at first and filled in through [`update_reveal`](Self::update_reveal).
    fn append_message(&mut self, speaker: Speaker, text: &str) -> MessageId;

    /// Replace the visible body of the message behind `id` with `visible`.
    fn update_reveal(&mut self, id: MessageId, visible: &str);

    /// Bring the latest message into view.
    fn scroll_to_latest(&mut self);
}

// ---------------------------------------------------------------------------
// NullRenderer
// ---------------------------------------------------------------------------

/// A renderer that drops every call on the floor.
///
/// Message handles are still minted sequentially so reveal updates stay
/// addressable.
#[derive(Debug, Default)]
pub struct NullRenderer {
    appended: usize,
}

impl WidgetRenderer for NullRenderer {
    fn set_status(&mut self, _label: &str) {}

    fn set_indicator(&mut self, _active: bool) {}

    fn set_container_mode(&mut self, _mode: Phase) {}

    fn set_waveform(&mut self, _active: bool, _style: WaveformStyle) {}

    fn append_message(&mut self, _speaker: Speaker, _text: &str) -> MessageId {
        let id = MessageId::from_index(self.appended);
        self.appended += 1;
        id
    }

    fn update_reveal(&mut self, _id: MessageId, _visible: &str) {}

    fn scroll_to_latest(&mut self) {}
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_renderer_mints_sequential_handles() {
        let mut r = NullRenderer::default();
        let a = r.append_message(Speaker::User, "a");
        let b = r.append_message(Speaker::Assistant, "b");
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
    }
}
