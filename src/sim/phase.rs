//! Widget phase enum and display helpers.
//!
//! [`Phase`] is the single current value the [`Sequencer`] owns; the renderer
//! reads it to pick the container mode, status label and accent colour.
//!
//! [`Sequencer`]: crate::sim::Sequencer

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Phases of the simulated voice-assistant turn cycle.
///
/// The transitions are:
///
/// ```text
/// Idle ──activate()──▶ Listening
///      ──3 s elapsed──▶ Processing   (simulated end of utterance)
///      ──activate()───▶ Processing   (manual stop, cancels the 3 s timer)
/// Processing ──1.5 s──▶ Speaking     (user utterance appended on this edge)
/// Speaking ──0.5 s───▶ assistant reply appended, cursor advances
///          ──+4 s────▶ Idle
/// ```
///
/// `activate()` while Processing or Speaking is a state-gated no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the user to press the mic button.
    Idle,

    /// "Capturing" the user's utterance; waveform bars animate.
    Listening,

    /// Simulated recognition delay; waveform is flat.
    Processing,

    /// The assistant reply is being delivered and revealed.
    Speaking,
}

impl Phase {
    /// Returns `true` while a simulated turn is in flight.
    ///
    /// The mic button is drawn disabled in these phases, mirroring the
    /// `activate()` no-op contract.
    ///
    /// ```
    /// use voice_widget::sim::Phase;
    ///
    /// assert!(!Phase::Idle.is_busy());
    /// assert!(!Phase::Listening.is_busy());
    /// assert!(Phase::Processing.is_busy());
    /// assert!(Phase::Speaking.is_busy());
    /// ```
    pub fn is_busy(&self) -> bool {
        matches!(self, Phase::Processing | Phase::Speaking)
    }

    /// A short human-readable label for the status row.
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Idle => "Ready",
            Phase::Listening => "Listening...",
            Phase::Processing => "Processing...",
            Phase::Speaking => "Speaking...",
        }
    }

    /// Whether the waveform bars animate in this phase.
    pub fn waveform_active(&self) -> bool {
        matches!(self, Phase::Listening | Phase::Speaking)
    }
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Idle
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // ---- Phase::is_busy ---

    #[test]
    fn idle_is_not_busy() {
        assert!(!Phase::Idle.is_busy());
    }

    #[test]
    fn listening_is_not_busy() {
        // activate() still has an effect here (manual stop), so the button
        // stays enabled.
        assert!(!Phase::Listening.is_busy());
    }

    #[test]
    fn processing_is_busy() {
        assert!(Phase::Processing.is_busy());
    }

    #[test]
    fn speaking_is_busy() {
        assert!(Phase::Speaking.is_busy());
    }

    // ---- Phase::label ---

    #[test]
    fn labels() {
        assert_eq!(Phase::Idle.label(), "Ready");
        assert_eq!(Phase::Listening.label(), "Listening...");
        assert_eq!(Phase::Processing.label(), "Processing...");
        assert_eq!(Phase::Speaking.label(), "Speaking...");
    }

    // ---- Phase::waveform_active ---

    #[test]
    fn waveform_runs_while_listening_and_speaking() {
        assert!(Phase::Listening.waveform_active());
        assert!(Phase::Speaking.waveform_active());
        assert!(!Phase::Idle.waveform_active());
        assert!(!Phase::Processing.waveform_active());
    }

    // ---- Default ---

    #[test]
    fn default_phase_is_idle() {
        assert_eq!(Phase::default(), Phase::Idle);
    }
}
