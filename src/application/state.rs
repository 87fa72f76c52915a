//! # Bot State
//!
//! Process-wide state of the bot (`BotState`): availability switch, status text, admin set and
//! the conversation context store. Built once at startup and shared by `Arc`.
//!
//! Lock order is status, then store, then a single context. Chat turns hold a read guard on
//! `status` for their whole duration, so `enable`/`disable` (write guard) never overlap a turn.

use crate::application::context::{ContextStore, SharedContext};
use crate::domain::config::AppConfig;
use crate::domain::traits::LlmProvider;
use chrono::{DateTime, Local};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

#[derive(Debug, Clone, PartialEq)]
pub struct BotStatus {
    pub enabled: bool,
    pub message: String,
}

pub struct BotState {
    pub status: RwLock<BotStatus>,
    pub contexts: Mutex<ContextStore>,
    pub llm: Arc<dyn LlmProvider>,
    pub started_at: DateTime<Local>,
    admins: HashSet<String>,
}

impl BotState {
    pub fn new(
        default_model: &str,
        status_message: &str,
        admins: &[String],
        llm: Arc<dyn LlmProvider>,
    ) -> Self {
        Self {
            status: RwLock::new(BotStatus {
                enabled: true,
                message: status_message.to_string(),
            }),
            contexts: Mutex::new(ContextStore::new(default_model)),
            llm,
            started_at: Local::now(),
            admins: admins.iter().map(|a| a.to_lowercase()).collect(),
        }
    }

    pub fn from_config(config: &AppConfig, llm: Arc<dyn LlmProvider>) -> Self {
        Self::new(
            &config.services.ollama.default_model,
            &config.system.status_message,
            &config.system.admin,
            llm,
        )
    }

    /// Admin check (case-insensitive).
    pub fn is_admin(&self, sender: &str) -> bool {
        self.admins.contains(&sender.to_lowercase())
    }

    /// Gets or creates the context for a room.
    pub async fn context(&self, room_id: &str) -> SharedContext {
        self.contexts.lock().await.get(room_id)
    }

    #[cfg(test)]
    pub async fn is_enabled(&self) -> bool {
        self.status.read().await.enabled
    }
}
