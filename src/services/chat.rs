//! Per-session chat transcript bookkeeping.
//!
//! The only process-lifetime mutable state in the system. Each session keeps
//! the most recent turns so the insight generator receives a bounded history.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Maximum number of turns supplied to the insight generator per session.
const MAX_TURNS: usize = 10;

/// One chat turn.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// In-memory chat history, keyed by session id.
#[derive(Clone, Default)]
pub struct ChatHistory {
    sessions: Arc<RwLock<HashMap<String, Vec<ChatTurn>>>>,
}

impl ChatHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new session and return its id.
    pub fn create_session(&self) -> String {
        let session_id = Uuid::new_v4().to_string();
        self.sessions.write().insert(session_id.clone(), vec![]);
        session_id
    }

    /// Append a turn, trimming the transcript to the most recent
    /// [`MAX_TURNS`] entries. Unknown session ids are created implicitly.
    pub fn push(&self, session_id: &str, role: ChatRole, content: impl Into<String>) {
        let mut sessions = self.sessions.write();
        let turns = sessions.entry(session_id.to_string()).or_default();
        turns.push(ChatTurn {
            role,
            content: content.into(),
        });
        if turns.len() > MAX_TURNS {
            let excess = turns.len() - MAX_TURNS;
            turns.drain(..excess);
        }
    }

    /// Transcript for a session, most recent turns only.
    pub fn turns(&self, session_id: &str) -> Vec<ChatTurn> {
        self.sessions
            .read()
            .get(session_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_ids_unique() {
        let history = ChatHistory::new();
        assert_ne!(history.create_session(), history.create_session());
    }

    #[test]
    fn test_push_and_read_back() {
        let history = ChatHistory::new();
        let session = history.create_session();
        history.push(&session, ChatRole::User, "What does my chart say?");
        history.push(&session, ChatRole::Assistant, "Saturn is busy.");
        let turns = history.turns(&session);
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, ChatRole::User);
    }

    #[test]
    fn test_transcript_capped_at_ten_turns() {
        let history = ChatHistory::new();
        let session = history.create_session();
        for i in 0..25 {
            history.push(&session, ChatRole::User, format!("turn {i}"));
        }
        let turns = history.turns(&session);
        assert_eq!(turns.len(), 10);
        assert_eq!(turns[0].content, "turn 15");
        assert_eq!(turns[9].content, "turn 24");
    }

    #[test]
    fn test_sessions_isolated() {
        let history = ChatHistory::new();
        let a = history.create_session();
        let b = history.create_session();
        history.push(&a, ChatRole::User, "hello");
        assert_eq!(history.turns(&a).len(), 1);
        assert!(history.turns(&b).is_empty());
    }

    #[test]
    fn test_unknown_session_reads_empty() {
        let history = ChatHistory::new();
        assert!(history.turns("missing").is_empty());
    }
}
