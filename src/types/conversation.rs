use crate::types::Turn;

/// An append-only, ordered sequence of turns.
///
/// A conversation is created with exactly one system turn and grows
/// monotonically from there: assistant and user turns can be appended at the
/// end, and nothing is ever mutated, removed, or reordered. The system turn
/// stays at index 0 for the life of the conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    /// Creates a conversation seeded with a single system turn.
    pub fn new(system: impl Into<String>) -> Self {
        Self {
            turns: vec![Turn::system(system)],
        }
    }

    /// Appends an assistant turn at the end.
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::assistant(content));
    }

    /// Appends a user turn at the end.
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::user(content));
    }

    /// Returns the turns in order.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Returns the number of turns.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// A conversation always holds at least its system turn.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the most recently appended turn.
    pub fn last(&self) -> &Turn {
        self.turns.last().expect("conversation holds a system turn")
    }

    /// Returns the system turn's content.
    pub fn system_prompt(&self) -> &str {
        &self.turns[0].content
    }
}

impl AsRef<[Turn]> for Conversation {
    fn as_ref(&self) -> &[Turn] {
        &self.turns
    }
}
