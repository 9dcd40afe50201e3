//! Conversation sequencer — the timer-chained phase machine.
//!
//! [`Sequencer`] owns the current [`Phase`], the scripted turns, the
//! transcript and the reveal in flight. It has exactly two inputs:
//!
//! * [`activate`](Sequencer::activate) — the single user gesture (mic press).
//! * [`tick`](Sequencer::tick) — the clock, called by the frame loop with the
//!   current `Instant`.
//!
//! # Timer model
//!
//! ```text
//! activate()          3000 ms            1500 ms          500 ms
//! Idle ──────▶ Listening ──────▶ Processing ──────▶ Speaking ──────▶ reply
//!                  │ activate()        ▲                              │
//!                  └────(cancels)──────┘                       4000 ms│
//!                                                                     ▼
//!                                                                   Idle
//! ```
//!
//! Instead of chained callbacks there is at most one armed phase timer at any
//! time: a due `Instant` plus a `TimerEvent` discriminant. Arming replaces
//! the previous handle, and the manual stop out of Listening clears it, so a
//! stale end-of-utterance timer can never fire after a force-advance. When a
//! late `tick` covers several deadlines the chain drains in order, each fired
//! timer's *scheduled* due time serving as the base for the next — the logical
//! schedule is immune to frame jitter.
//!
//! The reveal runs on its own 20 ms cadence, independent of the phase chain;
//! a long reply keeps typing after the widget returns to Idle.
//!
//! # Quick start
//!
//! ```
//! use std::time::{Duration, Instant};
//! use voice_widget::render::NullRenderer;
//! use voice_widget::sim::{Phase, Script, Sequencer, Timing};
//!
//! let mut sim = Sequencer::new(Script::demo(), Timing::default());
//! let mut view = NullRenderer::default();
//!
//! let t0 = Instant::now();
//! sim.activate(t0, &mut view);
//! assert_eq!(sim.phase(), Phase::Listening);
//!
//! sim.tick(t0 + Duration::from_millis(3000), &mut view);
//! assert_eq!(sim.phase(), Phase::Processing);
//! ```

use std::time::{Duration, Instant};

use crate::render::{WaveformStyle, WidgetRenderer};

use super::reveal::Reveal;
use super::script::Script;
use super::transcript::{MessageId, Speaker, Transcript};
use super::Phase;

// ---------------------------------------------------------------------------
// Timing
// ---------------------------------------------------------------------------

/// Delays driving the simulated turn cycle.
///
/// The defaults reproduce the demo's pacing; the config file can override
/// them for faster or slower playback.
#[derive(Debug, Clone, Copy)]
pub struct Timing {
    /// How long Listening runs before the simulated end of utterance.
    pub listening: Duration,
    /// Simulated recognition delay in Processing.
    pub processing: Duration,
    /// Pause between entering Speaking and the reply appearing.
    pub reply_delay: Duration,
    /// How long Speaking lingers after the reply appears ("reading time").
    pub speaking_hold: Duration,
    /// Cadence of the character reveal.
    pub reveal_tick: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            listening: Duration::from_millis(3000),
            processing: Duration::from_millis(1500),
            reply_delay: Duration::from_millis(500),
            speaking_hold: Duration::from_millis(4000),
            reveal_tick: Duration::from_millis(20),
        }
    }
}

// ---------------------------------------------------------------------------
// Armed timer
// ---------------------------------------------------------------------------

/// What a fired phase timer means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerEvent {
    /// Listening window elapsed — move to Processing.
    UtteranceEnded,
    /// Recognition delay elapsed — deliver the user line, move to Speaking.
    RecognitionDone,
    /// Reply pause elapsed — deliver the assistant line, advance the cursor.
    ReplyDue,
    /// Reading time elapsed — back to Idle.
    SpeakingDone,
}

/// The single armed phase timer. Arming replaces the previous one.
#[derive(Debug, Clone, Copy)]
struct ArmedTimer {
    due: Instant,
    event: TimerEvent,
}

/// Reveal in flight for the newest assistant bubble.
#[derive(Debug)]
struct ActiveReveal {
    /// Entry in the sequencer-owned transcript.
    transcript_id: MessageId,
    /// Handle the renderer returned for the same bubble.
    view_handle: MessageId,
    reveal: Reveal,
    next_step: Instant,
}

// ---------------------------------------------------------------------------
// Sequencer
// ---------------------------------------------------------------------------

/// The conversation simulator: phase machine, script cursor, transcript and
/// reveal, all behind two entry points and read-only accessors.
#[derive(Debug)]
pub struct Sequencer {
    phase: Phase,
    script: Script,
    transcript: Transcript,
    timing: Timing,
    armed: Option<ArmedTimer>,
    reveal: Option<ActiveReveal>,
}

impl Sequencer {
    /// Build a sequencer over `script`, starting in [`Phase::Idle`].
    pub fn new(script: Script, timing: Timing) -> Self {
        Self {
            phase: Phase::Idle,
            script,
            transcript: Transcript::new(),
            timing,
            armed: None,
            reveal: None,
        }
    }

    // -----------------------------------------------------------------------
    // Inputs
    // -----------------------------------------------------------------------

    /// The one external gesture: the mic button.
    ///
    /// From Idle this starts a listening phase; from Listening it stops
    /// early, cancelling the armed end-of-utterance timer. In Processing and
    /// Speaking it is ignored, so at most one simulated turn is ever in
    /// flight.
    pub fn activate<R: WidgetRenderer>(&mut self, now: Instant, renderer: &mut R) {
        match self.phase {
            Phase::Idle => self.enter_listening(now, renderer),
            Phase::Listening => {
                // Manual stop: the 3 s timer must never fire after this.
                self.armed = None;
                self.enter_processing(now, renderer);
            }
            Phase::Processing | Phase::Speaking => {
                log::debug!("sim: activate ignored while {:?}", self.phase);
            }
        }
    }

    /// Advance the clock to `now`, firing every due timer and reveal step.
    ///
    /// Safe to call at any cadence; a single late call drains the whole
    /// pending chain at its scheduled instants.
    pub fn tick<R: WidgetRenderer>(&mut self, now: Instant, renderer: &mut R) {
        while let Some(timer) = self.armed {
            if timer.due > now {
                break;
            }
            self.armed = None;
            self.fire(timer, renderer);
        }

        self.advance_reveal(now, renderer);
    }

    // -----------------------------------------------------------------------
    // Read-only accessors
    // -----------------------------------------------------------------------

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current script cursor.
    pub fn cursor(&self) -> usize {
        self.script.cursor()
    }

    /// Number of turns in the script.
    pub fn script_len(&self) -> usize {
        self.script.len()
    }

    /// The append-only chat transcript.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// The next instant at which [`tick`](Self::tick) has work to do, if any.
    ///
    /// The frame loop uses this to schedule its next repaint.
    pub fn next_deadline(&self) -> Option<Instant> {
        let timer = self.armed.as_ref().map(|t| t.due);
        let reveal = self.reveal.as_ref().map(|r| r.next_step);
        match (timer, reveal) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    // -----------------------------------------------------------------------
    // Phase entry
    // -----------------------------------------------------------------------

    fn enter_listening<R: WidgetRenderer>(&mut self, now: Instant, renderer: &mut R) {
        log::debug!("sim: -> Listening");
        self.phase = Phase::Listening;
        renderer.set_status(Phase::Listening.label());
        renderer.set_indicator(true);
        renderer.set_container_mode(Phase::Listening);
        renderer.set_waveform(true, WaveformStyle::Normal);
        self.arm(now + self.timing.listening, TimerEvent::UtteranceEnded);
    }

    fn enter_processing<R: WidgetRenderer>(&mut self, now: Instant, renderer: &mut R) {
        log::debug!("sim: -> Processing");
        self.phase = Phase::Processing;
        renderer.set_status(Phase::Processing.label());
        renderer.set_container_mode(Phase::Processing);
        renderer.set_waveform(false, WaveformStyle::Normal);
        self.arm(now + self.timing.processing, TimerEvent::RecognitionDone);
    }

    fn enter_speaking<R: WidgetRenderer>(&mut self, now: Instant, renderer: &mut R) {
        log::debug!("sim: -> Speaking");
        self.phase = Phase::Speaking;
        renderer.set_status(Phase::Speaking.label());
        renderer.set_indicator(true);
        renderer.set_container_mode(Phase::Speaking);
        renderer.set_waveform(true, WaveformStyle::Speaking);
        self.arm(now + self.timing.reply_delay, TimerEvent::ReplyDue);
    }

    fn enter_idle<R: WidgetRenderer>(&mut self, renderer: &mut R) {
        log::debug!("sim: -> Idle");
        self.phase = Phase::Idle;
        renderer.set_status(Phase::Idle.label());
        renderer.set_indicator(false);
        renderer.set_container_mode(Phase::Idle);
        renderer.set_waveform(false, WaveformStyle::Normal);
        self.armed = None;
    }

    // -----------------------------------------------------------------------
    // Timer machinery
    // -----------------------------------------------------------------------

    fn arm(&mut self, due: Instant, event: TimerEvent) {
        self.armed = Some(ArmedTimer { due, event });
    }

    /// Dispatch one fired timer. `timer.due` — not the wall clock — is the
    /// base for whatever gets armed next.
    fn fire<R: WidgetRenderer>(&mut self, timer: ArmedTimer, renderer: &mut R) {
        match timer.event {
            TimerEvent::UtteranceEnded => self.enter_processing(timer.due, renderer),

            TimerEvent::RecognitionDone => {
                let user_line = self.script.current().user.clone();
                self.transcript.push(Speaker::User, user_line.as_str());
                renderer.append_message(Speaker::User, &user_line);
                renderer.scroll_to_latest();
                self.enter_speaking(timer.due, renderer);
            }

            TimerEvent::ReplyDue => {
                let reply = self.script.current().assistant.clone();
                self.script.advance();

                let transcript_id = self.transcript.push(Speaker::Assistant, reply.as_str());
                let view_handle = renderer.append_message(Speaker::Assistant, &reply);
                renderer.scroll_to_latest();

                self.reveal = Some(ActiveReveal {
                    transcript_id,
                    view_handle,
                    reveal: Reveal::new(reply),
                    next_step: timer.due + self.timing.reveal_tick,
                });

                self.arm(timer.due + self.timing.speaking_hold, TimerEvent::SpeakingDone);
            }

            TimerEvent::SpeakingDone => self.enter_idle(renderer),
        }
    }

    /// Run the reveal up to `now`, one character per tick.
    fn advance_reveal<R: WidgetRenderer>(&mut self, now: Instant, renderer: &mut R) {
        let mut done = false;
        if let Some(active) = self.reveal.as_mut() {
            while active.next_step <= now {
                match active.reveal.step() {
                    Some(visible) => {
                        let revealed = visible.len();
                        renderer.update_reveal(active.view_handle, visible);
                        self.transcript.set_revealed(active.transcript_id, revealed);
                        active.next_step += self.timing.reveal_tick;
                    }
                    None => {
                        done = true;
                        break;
                    }
                }
            }
        }
        if done {
            self.reveal = None;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
