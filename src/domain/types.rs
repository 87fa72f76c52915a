//! # Domain Types
//!
//! Common data structures used across the application logic: conversation records
//! exchanged with the inference backend and inbound chat messages.

use serde::{Deserialize, Serialize};

/// Author of a message record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One entry of a conversation history, in the shape the backend expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub role: Role,
    pub content: String,
    /// Base64-encoded image payloads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

impl MessageRecord {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            images: None,
        }
    }

    #[cfg(test)]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            images: None,
        }
    }

    pub fn has_images(&self) -> bool {
        self.images.as_ref().is_some_and(|images| !images.is_empty())
    }
}

/// A model reported by the backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    #[serde(default)]
    pub size: u64,
}

impl ModelInfo {
    pub fn size_gb(&self) -> f64 {
        self.size as f64 / 1_000_000_000.0
    }
}

/// A file attached to an inbound message.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub media_type: String,
    pub description: Option<String>,
    /// Transport-specific handle used to download the payload.
    pub source: serde_json::Value,
}

/// A message as handed over by the chat transport.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub room_id: String,
    pub sender: String,
    pub body: String,
    /// One-to-one conversation (as opposed to group or channel traffic).
    pub is_direct: bool,
    pub attachments: Vec<Attachment>,
}

#[cfg(test)]
impl InboundMessage {
    pub fn text(
        room_id: impl Into<String>,
        sender: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            room_id: room_id.into(),
            sender: sender.into(),
            body: body.into(),
            is_direct: true,
            attachments: Vec::new(),
        }
    }
}
