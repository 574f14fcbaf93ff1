//! Append-only conversation history for a single session.

use concierge_types::chat::{Role, Turn};
use uuid::Uuid;

/// Ordered sequence of user and assistant turns.
///
/// Created empty when a session starts and dropped with it. The system turn
/// is never stored here; it is synthesized fresh for every request.
#[derive(Debug)]
pub struct ConversationStore {
    session_id: Uuid,
    turns: Vec<Turn>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::now_v7(),
            turns: Vec::new(),
        }
    }

    /// Identifier of the session this history belongs to (used in log fields).
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Add a turn to the end of the history. No size bound is applied.
    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Current turns in chronological order.
    pub fn snapshot(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Number of stored turns with the given role.
    pub fn count(&self, role: Role) -> usize {
        self.turns.iter().filter(|t| t.role() == role).count()
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}
