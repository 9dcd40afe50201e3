//! Conversation simulator — the core of the demo.
//!
//! Everything here is deterministic and UI-free: the [`Sequencer`] owns the
//! phase machine, the scripted turns and the transcript, and pushes its side
//! effects through the [`WidgetRenderer`] seam. Time comes in from outside
//! via `tick(now)`, so tests drive whole conversations with synthetic
//! `Instant`s and never sleep.
//!
//! # Quick start
//!
//! ```
//! use std::time::{Duration, Instant};
//! use voice_widget::render::NullRenderer;
//! use voice_widget::sim::{Phase, Script, Sequencer, Timing};
//!
//! let mut sim = Sequencer::new(Script::demo(), Timing::default());
//! let mut renderer = NullRenderer::default();
//!
//! let t0 = Instant::now();
//! sim.activate(t0, &mut renderer);
//!
//! // One late tick drains the whole first turn.
//! sim.tick(t0 + Duration::from_secs(60), &mut renderer);
//! assert_eq!(sim.phase(), Phase::Idle);
//! assert_eq!(sim.transcript().len(), 2);
//! ```
//!
//! [`WidgetRenderer`]: crate::render::WidgetRenderer

pub mod phase;
pub mod reveal;
pub mod script;
pub mod sequencer;
pub mod transcript;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use phase::Phase;
pub use reveal::Reveal;
pub use script::{Script, ScriptError, Turn};
pub use sequencer::{Sequencer, Timing};
pub use transcript::{Message, MessageId, Speaker, Transcript};
