//! Per-chat conversation state and its store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::types::ChatId;

/// What the bot remembers about a chat between messages.
///
/// `pending_query` only means something while `awaiting_location` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationState {
    pub awaiting_location: bool,
    pub pending_query: String,
}

impl ConversationState {
    /// State for a chat that has asked a location-seeking question.
    pub fn awaiting(query: impl Into<String>) -> Self {
        Self {
            awaiting_location: true,
            pending_query: query.into(),
        }
    }

    /// The pending query, if the chat is waiting for a location.
    pub fn pending_query(&self) -> Option<&str> {
        self.awaiting_location.then_some(self.pending_query.as_str())
    }
}

/// Backing storage for conversation state, keyed by chat.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Current state for the chat, or the default state on first contact.
    async fn get(&self, chat_id: ChatId) -> ConversationState;

    async fn set(&self, chat_id: ChatId, state: ConversationState);

    /// Put the chat back into the default state.
    async fn reset(&self, chat_id: ChatId) {
        self.set(chat_id, ConversationState::default()).await;
    }
}

/// Process-lifetime store backed by a map. Entries are never evicted.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    states: RwLock<HashMap<ChatId, ConversationState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConversationStore for InMemoryStore {
    async fn get(&self, chat_id: ChatId) -> ConversationState {
        self.states
            .read()
            .await
            .get(&chat_id)
            .cloned()
            .unwrap_or_default()
    }

    async fn set(&self, chat_id: ChatId, state: ConversationState) {
        self.states.write().await.insert(chat_id, state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_chat_gets_default_state() {
        let store = InMemoryStore::new();
        let state = store.get(ChatId(1)).await;
        assert_eq!(state, ConversationState::default());
        assert!(state.pending_query().is_none());
    }

    #[tokio::test]
    async fn set_then_get_returns_state() {
        let store = InMemoryStore::new();
        store
            .set(ChatId(7), ConversationState::awaiting("tacos near me"))
            .await;

        let state = store.get(ChatId(7)).await;
        assert_eq!(state.pending_query(), Some("tacos near me"));
        assert_eq!(store.get(ChatId(8)).await, ConversationState::default());
    }

    #[tokio::test]
    async fn reset_restores_default() {
        let store = InMemoryStore::new();
        store.set(ChatId(3), ConversationState::awaiting("bars")).await;
        store.reset(ChatId(3)).await;
        assert_eq!(store.get(ChatId(3)).await, ConversationState::default());
    }

    #[test]
    fn pending_query_ignored_when_not_awaiting() {
        let state = ConversationState {
            awaiting_location: false,
            pending_query: "stale".to_string(),
        };
        assert!(state.pending_query().is_none());
    }
}
