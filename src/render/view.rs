//! Retained view state for the egui widget.
//!
//! egui is immediate-mode, so the draw code needs something persistent to
//! read each frame. [`ViewState`] is that something: it implements
//! [`WidgetRenderer`] and accumulates the sequencer's side effects — status
//! label, indicator, container mode, waveform flags and the rendered chat
//! bubbles. The application's draw pass is a pure function of this struct.

use crate::sim::{MessageId, Phase, Speaker};

use super::{WaveformStyle, WidgetRenderer};

// ---------------------------------------------------------------------------
// ViewMessage
// ---------------------------------------------------------------------------

/// One chat bubble as currently rendered.
///
/// For assistant messages `text` is the revealed prefix, not the full reply;
/// it grows as the reveal ticks.
#[derive(Debug, Clone)]
pub struct ViewMessage {
    /// Which side the bubble belongs to.
    pub speaker: Speaker,
    /// The visible bubble body.
    pub text: String,
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// Everything the widget draw code reads each frame.
#[derive(Debug)]
pub struct ViewState {
    status: String,
    indicator: bool,
    mode: Phase,
    waveform_active: bool,
    waveform_style: WaveformStyle,
    messages: Vec<ViewMessage>,
    scroll_pending: bool,
}

impl ViewState {
    /// Fresh view state showing the idle widget.
    pub fn new() -> Self {
        Self {
            status: Phase::Idle.label().to_owned(),
            indicator: false,
            mode: Phase::Idle,
            waveform_active: false,
            waveform_style: WaveformStyle::Normal,
            messages: Vec::new(),
            scroll_pending: false,
        }
    }

    /// Current status label.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Whether the status dot is lit.
    pub fn indicator(&self) -> bool {
        self.indicator
    }

    /// Container-level mode marker.
    pub fn mode(&self) -> Phase {
        self.mode
    }

    /// Whether the waveform bars animate.
    pub fn waveform_active(&self) -> bool {
        self.waveform_active
    }

    /// Style of the waveform animation.
    pub fn waveform_style(&self) -> WaveformStyle {
        self.waveform_style
    }

    /// Rendered chat bubbles, oldest first.
    pub fn messages(&self) -> &[ViewMessage] {
        &self.messages
    }

    /// Consume a pending scroll request, returning whether one was queued.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_pending)
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetRenderer for ViewState {
    fn set_status(&mut self, label: &str) {
        self.status = label.to_owned();
    }

    fn set_indicator(&mut self, active: bool) {
        self.indicator = active;
    }

    fn set_container_mode(&mut self, mode: Phase) {
        self.mode = mode;
    }

    fn set_waveform(&mut self, active: bool, style: WaveformStyle) {
        self.waveform_active = active;
        self.waveform_style = style;
    }

    fn append_message(&mut self, speaker: Speaker, text: &str) -> MessageId {
        // Assistant bubbles open empty; the reveal fills them in.
        let body = match speaker {
            Speaker::User => text.to_owned(),
            Speaker::Assistant => String::new(),
        };
        let id = MessageId::from_index(self.messages.len());
        self.messages.push(ViewMessage {
            speaker,
            text: body,
        });
        id
    }

    fn update_reveal(&mut self, id: MessageId, visible: &str) {
        if let Some(msg) = self.messages.get_mut(id.index()) {
            visible.clone_into(&mut msg.text);
        }
    }

    fn scroll_to_latest(&mut self) {
        self.scroll_pending = true;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_view_shows_idle_widget() {
        let view = ViewState::new();
        assert_eq!(view.status(), "Ready");
        assert!(!view.indicator());
        assert_eq!(view.mode(), Phase::Idle);
        assert!(!view.waveform_active());
        assert!(view.messages().is_empty());
    }

    #[test]
    fn side_effects_are_retained() {
        let mut view = ViewState::new();
        view.set_status("Listening...");
        view.set_indicator(true);
        view.set_container_mode(Phase::Listening);
        view.set_waveform(true, WaveformStyle::Speaking);

        assert_eq!(view.status(), "Listening...");
        assert!(view.indicator());
        assert_eq!(view.mode(), Phase::Listening);
        assert!(view.waveform_active());
        assert_eq!(view.waveform_style(), WaveformStyle::Speaking);
    }

    #[test]
    fn user_bubbles_show_full_text_immediately() {
        let mut view = ViewState::new();
        view.append_message(Speaker::User, "hello");
        assert_eq!(view.messages()[0].text, "hello");
    }

    #[test]
    fn assistant_bubbles_open_empty_and_fill_via_reveal() {
        let mut view = ViewState::new();
        let id = view.append_message(Speaker::Assistant, "full reply");
        assert_eq!(view.messages()[0].text, "");

        view.update_reveal(id, "fu");
        assert_eq!(view.messages()[0].text, "fu");

        view.update_reveal(id, "full reply");
        assert_eq!(view.messages()[0].text, "full reply");
    }

    #[test]
    fn reveal_updates_address_the_right_bubble() {
        let mut view = ViewState::new();
        view.append_message(Speaker::User, "question");
        let reply = view.append_message(Speaker::Assistant, "answer");
        view.update_reveal(reply, "ans");

        assert_eq!(view.messages()[0].text, "question");
        assert_eq!(view.messages()[1].text, "ans");
    }

    #[test]
    fn scroll_request_is_consumed_once() {
        let mut view = ViewState::new();
        view.scroll_to_latest();
        assert!(view.take_scroll_request());
        assert!(!view.take_scroll_request());
    }
}
