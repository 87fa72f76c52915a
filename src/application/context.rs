//! # Conversation Contexts
//!
//! Per-conversation state (selected model and message history) and the keyed store holding it.
//! Contexts are created on first access and only disappear when the whole store is reset.

use crate::domain::types::{MessageRecord, Role};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// A context shared between the store and the turn currently using it.
pub type SharedContext = Arc<Mutex<ConversationContext>>;

#[derive(Debug, Clone)]
pub struct ConversationContext {
    pub room_id: String,
    pub model: String,
    pub messages: Vec<MessageRecord>,
}

impl ConversationContext {
    pub fn new(room_id: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            room_id: room_id.into(),
            model: model.into(),
            messages: Vec::new(),
        }
    }

    pub fn push(&mut self, message: MessageRecord) {
        self.messages.push(message);
    }

    pub fn pop(&mut self) -> Option<MessageRecord> {
        self.messages.pop()
    }

    /// Empties the history, keeping the model selection.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn set_model(&mut self, model: impl Into<String>) {
        self.model = model.into();
    }

    pub fn last_role(&self) -> Option<Role> {
        self.messages.last().map(|m| m.role)
    }
}

/// Maps room IDs to their conversation contexts.
#[derive(Debug)]
pub struct ContextStore {
    default_model: String,
    contexts: HashMap<String, SharedContext>,
}

impl ContextStore {
    pub fn new(default_model: impl Into<String>) -> Self {
        Self {
            default_model: default_model.into(),
            contexts: HashMap::new(),
        }
    }

    /// Gets or creates the context for a specific room.
    pub fn get(&mut self, room_id: &str) -> SharedContext {
        self.contexts
            .entry(room_id.to_string())
            .or_insert_with(|| {
                tracing::debug!("Creating conversation context for {}", room_id);
                Arc::new(Mutex::new(ConversationContext::new(
                    room_id,
                    self.default_model.clone(),
                )))
            })
            .clone()
    }

    /// Drops every context.
    pub fn reset(&mut self) {
        if self.is_empty() {
            return;
        }
        tracing::info!("Dropping {} conversation contexts", self.len());
        self.contexts.clear();
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }
}
