//! Wire types for the Ollama HTTP API

use crate::domain::types::{MessageRecord, ModelInfo};
use serde::{Deserialize, Serialize};

/// `POST /api/chat` request body
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub stream: bool,
    pub messages: &'a [MessageRecord],
}

/// `POST /api/chat` response body (non-streaming)
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub message: MessageRecord,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub done: Option<bool>,
    #[serde(default)]
    pub eval_count: Option<u64>,
    #[serde(default)]
    pub prompt_eval_count: Option<u64>,
}

/// `GET /api/tags` and `GET /api/ps` response body
#[derive(Debug, Deserialize)]
pub struct ModelList {
    #[serde(default)]
    pub models: Vec<ModelInfo>,
}

/// Error type
#[derive(Debug)]
pub struct Error {
    pub message: String,
    pub provider: String,
}

impl Error {
    pub fn new(provider: &str, message: impl Into<String>) -> Self {
        Self {
            provider: provider.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.provider, self.message)
    }
}

impl std::error::Error for Error {}
