//! Append-only chat transcript.
//!
//! The transcript is the logical record of the conversation: one entry per
//! rendered message, in delivery order, alive for the session and never
//! persisted. Assistant entries start hidden and grow as their reveal runs;
//! [`Message::visible_text`] is the prefix currently on screen.

// ---------------------------------------------------------------------------
// Speaker
// ---------------------------------------------------------------------------

/// Which side of the conversation a message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    /// The simulated user.
    User,
    /// The voice assistant.
    Assistant,
}

// ---------------------------------------------------------------------------
// MessageId
// ---------------------------------------------------------------------------

/// Opaque handle to a transcript entry.
///
/// Returned by [`Transcript::push`] and by the renderer's `append_message`;
/// used to address reveal updates to the right bubble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageId(pub(crate) usize);

impl MessageId {
    /// Build a handle from a raw index.
    ///
    /// Renderers that keep their own message list use this to hand back
    /// handles from `append_message`.
    pub fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// Index of the message within the transcript.
    pub fn index(&self) -> usize {
        self.0
    }
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// One transcript entry.
#[derive(Debug, Clone)]
pub struct Message {
    id: MessageId,
    speaker: Speaker,
    text: String,
    /// Byte length of the visible prefix; always on a `char` boundary.
    revealed: usize,
}

impl Message {
    /// Handle of this message.
    pub fn id(&self) -> MessageId {
        self.id
    }

    /// Sender of this message.
    pub fn speaker(&self) -> Speaker {
        self.speaker
    }

    /// The full message text, regardless of reveal progress.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The currently revealed prefix.
    pub fn visible_text(&self) -> &str {
        &self.text[..self.revealed]
    }

    /// `true` once the whole text is visible.
    pub fn is_fully_revealed(&self) -> bool {
        self.revealed == self.text.len()
    }
}

// ---------------------------------------------------------------------------
// Transcript
// ---------------------------------------------------------------------------

/// Append-only ordered message log.
#[derive(Debug, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message.
    ///
    /// User messages are fully visible immediately; assistant messages start
    /// with nothing revealed and are driven by the sequencer's reveal ticks.
    pub fn push(&mut self, speaker: Speaker, text: impl Into<String>) -> MessageId {
        let text = text.into();
        let revealed = match speaker {
            Speaker::User => text.len(),
            Speaker::Assistant => 0,
        };
        let id = MessageId(self.messages.len());
        self.messages.push(Message {
            id,
            speaker,
            text,
            revealed,
        });
        id
    }

    /// Set the visible prefix length (in bytes) of a message.
    ///
    /// The sequencer only ever passes boundaries produced by the reveal, so
    /// `revealed` is always a valid `char` boundary within the text.
    pub(crate) fn set_revealed(&mut self, id: MessageId, revealed: usize) {
        if let Some(msg) = self.messages.get_mut(id.0) {
            msg.revealed = revealed;
        }
    }

    /// All messages, in append order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Look up a message by handle.
    pub fn get(&self, id: MessageId) -> Option<&Message> {
        self.messages.get(id.0)
    }

    /// Number of messages appended so far.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// `true` before the first message is appended.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages_are_visible_on_append() {
        let mut t = Transcript::new();
        let id = t.push(Speaker::User, "hello there");
        let msg = t.get(id).unwrap();
        assert_eq!(msg.visible_text(), "hello there");
        assert!(msg.is_fully_revealed());
    }

    #[test]
    fn assistant_messages_start_hidden() {
        let mut t = Transcript::new();
        let id = t.push(Speaker::Assistant, "reply");
        let msg = t.get(id).unwrap();
        assert_eq!(msg.visible_text(), "");
        assert_eq!(msg.text(), "reply");
        assert!(!msg.is_fully_revealed());
    }

    #[test]
    fn set_revealed_grows_visible_prefix() {
        let mut t = Transcript::new();
        let id = t.push(Speaker::Assistant, "reply");
        t.set_revealed(id, 3);
        assert_eq!(t.get(id).unwrap().visible_text(), "rep");
        t.set_revealed(id, 5);
        assert!(t.get(id).unwrap().is_fully_revealed());
    }

    #[test]
    fn messages_keep_append_order() {
        let mut t = Transcript::new();
        t.push(Speaker::User, "first");
        t.push(Speaker::Assistant, "second");
        t.push(Speaker::User, "third");

        let speakers: Vec<Speaker> = t.messages().iter().map(Message::speaker).collect();
        assert_eq!(
            speakers,
            vec![Speaker::User, Speaker::Assistant, Speaker::User]
        );
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn ids_index_into_the_transcript() {
        let mut t = Transcript::new();
        let a = t.push(Speaker::User, "a");
        let b = t.push(Speaker::Assistant, "b");
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(t.get(b).unwrap().text(), "b");
    }

    #[test]
    fn empty_transcript() {
        let t = Transcript::new();
        assert!(t.is_empty());
        assert_eq!(t.len(), 0);
    }
}
