//! Canned conversation script and the wrapping cursor over it.
//!
//! The demo never performs recognition; it plays back a fixed ordered list of
//! [`Turn`]s. [`Script`] guarantees the cursor always points at a valid turn
//! by wrapping modulo the turn count, so the conversation replays forever.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Turn
// ---------------------------------------------------------------------------

/// One scripted exchange: what the "user" said and what the assistant answers.
///
/// Immutable after construction; the script never mutates its turns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// The simulated user utterance.
    pub user: String,
    /// The assistant's canned reply.
    pub assistant: String,
}

impl Turn {
    /// Convenience constructor taking anything string-like.
    pub fn new(user: impl Into<String>, assistant: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            assistant: assistant.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// ScriptError
// ---------------------------------------------------------------------------

/// Script validation errors.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// A script must contain at least one turn, otherwise the cursor
    /// invariant cannot hold.
    #[error("conversation script must contain at least one turn")]
    Empty,
}

// ---------------------------------------------------------------------------
// Script
// ---------------------------------------------------------------------------

/// A non-empty ordered list of [`Turn`]s plus a wrapping cursor.
///
/// The cursor advances by exactly one, modulo the turn count, each time an
/// assistant reply is delivered. After a full pass the script replays from
/// turn zero.
///
/// ```
/// use voice_widget::sim::{Script, Turn};
///
/// let mut script = Script::new(vec![
///     Turn::new("hi", "hello"),
///     Turn::new("bye", "goodbye"),
/// ])
/// .unwrap();
///
/// assert_eq!(script.current().user, "hi");
/// script.advance();
/// assert_eq!(script.current().user, "bye");
/// script.advance(); // wraps
/// assert_eq!(script.cursor(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct Script {
    turns: Vec<Turn>,
    cursor: usize,
}

impl Script {
    /// Build a script from `turns`, starting at turn zero.
    ///
    /// Returns [`ScriptError::Empty`] when `turns` is empty.
    pub fn new(turns: Vec<Turn>) -> Result<Self, ScriptError> {
        if turns.is_empty() {
            return Err(ScriptError::Empty);
        }
        Ok(Self { turns, cursor: 0 })
    }

    /// The built-in demo script — a small job-interview assistant exchange.
    pub fn demo() -> Self {
        Self {
            turns: vec![
                Turn::new(
                    "I need to prepare for my software engineer interview.",
                    "I can help with that. Let's start with a technical screening \
                     question. Can you explain the difference between synchronous \
                     and asynchronous code?",
                ),
                Turn::new(
                    "Find me remote frontend developer jobs in New York.",
                    "I found 15 new listings for remote frontend developer roles in \
                     New York. Top companies include TechFlow and FutureSystems. \
                     Shall I read the first description?",
                ),
                Turn::new(
                    "What are the common behavioral questions?",
                    "Common questions include: 'Tell me about a time you failed', \
                     'How do you handle conflict', and 'Describe your greatest \
                     strength'. Would you like to practice one?",
                ),
            ],
            cursor: 0,
        }
    }

    /// Number of turns in the script.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Always `false` — construction rejects empty scripts. Provided for
    /// API completeness alongside [`len`](Self::len).
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Current cursor position (`0 ≤ cursor < len`).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The turn the cursor currently points at.
    pub fn current(&self) -> &Turn {
        &self.turns[self.cursor]
    }

    /// Advance the cursor by one, wrapping to zero past the last turn.
    pub fn advance(&mut self) {
        self.cursor = (self.cursor + 1) % self.turns.len();
    }
}

impl Default for Script {
    fn default() -> Self {
        Self::demo()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn two_turns() -> Script {
        Script::new(vec![Turn::new("u0", "a0"), Turn::new("u1", "a1")]).unwrap()
    }

    #[test]
    fn empty_script_is_rejected() {
        assert!(matches!(Script::new(Vec::new()), Err(ScriptError::Empty)));
    }

    #[test]
    fn cursor_starts_at_zero() {
        let script = two_turns();
        assert_eq!(script.cursor(), 0);
        assert_eq!(script.current().user, "u0");
    }

    #[test]
    fn advance_moves_to_next_turn() {
        let mut script = two_turns();
        script.advance();
        assert_eq!(script.cursor(), 1);
        assert_eq!(script.current().assistant, "a1");
    }

    #[test]
    fn advance_wraps_to_zero() {
        let mut script = two_turns();
        script.advance();
        script.advance();
        assert_eq!(script.cursor(), 0);
    }

    #[test]
    fn full_pass_replays_turn_zero_identically() {
        let mut script = two_turns();
        let first = script.current().clone();
        for _ in 0..script.len() {
            script.advance();
        }
        assert_eq!(script.current(), &first);
    }

    #[test]
    fn single_turn_script_always_points_at_it() {
        let mut script = Script::new(vec![Turn::new("only", "one")]).unwrap();
        for _ in 0..5 {
            assert_eq!(script.current().user, "only");
            script.advance();
        }
    }

    #[test]
    fn demo_script_has_three_turns() {
        let script = Script::demo();
        assert_eq!(script.len(), 3);
        assert!(!script.is_empty());
    }
}
