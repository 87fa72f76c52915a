//! # Domain Traits
//!
//! Abstract interfaces for core system components (Chat, LLM).
//! Allows for pluggable implementations in the Infrastructure layer.

use crate::domain::types::{Attachment, MessageRecord, ModelInfo};
use async_trait::async_trait;

/// Abstract interface for a Chat Provider bound to one conversation (e.g., a Matrix room)
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a message to the room
    async fn send_message(&self, content: &str) -> Result<String, String>;

    /// Send a notification (not tracked)
    async fn send_notification(&self, content: &str) -> Result<(), String>;

    /// Send a typing indicator
    async fn typing(&self, active: bool) -> Result<(), String>;

    /// Update the bot account's presence and status text
    async fn set_presence(&self, online: bool, status: &str) -> Result<(), String>;

    /// Download the payload of an attachment
    async fn fetch_attachment(&self, attachment: &Attachment) -> Result<Vec<u8>, String>;

    /// Get the current room ID
    fn room_id(&self) -> String;
}

/// Abstract interface for the inference backend
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Submit a full history and return the single reply record (non-streaming).
    async fn chat(&self, model: &str, messages: &[MessageRecord]) -> Result<MessageRecord, String>;

    /// Models available on the backend.
    async fn list_models(&self) -> Result<Vec<ModelInfo>, String>;

    /// Models currently loaded in memory.
    async fn running_models(&self) -> Result<Vec<ModelInfo>, String>;
}
