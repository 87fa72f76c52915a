//! In-memory chat and LLM doubles shared by the unit tests.

use crate::domain::traits::{ChatProvider, LlmProvider};
use crate::domain::types::{Attachment, MessageRecord, ModelInfo};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

pub struct MockChat {
    room_id: String,
    sent: Mutex<Vec<String>>,
    typing: Mutex<Vec<bool>>,
    presence: Mutex<Vec<(bool, String)>>,
    attachments: HashMap<String, Vec<u8>>,
    fail_notifications: bool,
}

impl MockChat {
    pub fn new(room_id: &str) -> Self {
        Self {
            room_id: room_id.to_string(),
            sent: Mutex::new(Vec::new()),
            typing: Mutex::new(Vec::new()),
            presence: Mutex::new(Vec::new()),
            attachments: HashMap::new(),
            fail_notifications: false,
        }
    }

    /// Makes every `send_notification` fail without recording the notice.
    pub fn with_failing_notifications(mut self) -> Self {
        self.fail_notifications = true;
        self
    }

    /// Makes the attachment whose source is the JSON string `source` downloadable.
    pub fn with_attachment(mut self, source: &str, data: &[u8]) -> Self {
        self.attachments.insert(source.to_string(), data.to_vec());
        self
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    pub fn typing_changes(&self) -> Vec<bool> {
        self.typing.lock().unwrap().clone()
    }

    pub fn presence_changes(&self) -> Vec<(bool, String)> {
        self.presence.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatProvider for MockChat {
    async fn send_message(&self, content: &str) -> Result<String, String> {
        let mut sent = self.sent.lock().unwrap();
        sent.push(content.to_string());
        Ok(format!("$event{}", sent.len()))
    }

    async fn send_notification(&self, content: &str) -> Result<(), String> {
        if self.fail_notifications {
            return Err("M_LIMIT_EXCEEDED".to_string());
        }
        self.sent.lock().unwrap().push(content.to_string());
        Ok(())
    }

    async fn typing(&self, active: bool) -> Result<(), String> {
        self.typing.lock().unwrap().push(active);
        Ok(())
    }

    async fn set_presence(&self, online: bool, status: &str) -> Result<(), String> {
        self.presence.lock().unwrap().push((online, status.to_string()));
        Ok(())
    }

    async fn fetch_attachment(&self, attachment: &Attachment) -> Result<Vec<u8>, String> {
        attachment
            .source
            .as_str()
            .and_then(|key| self.attachments.get(key))
            .cloned()
            .ok_or_else(|| "404 Not Found".to_string())
    }

    fn room_id(&self) -> String {
        self.room_id.clone()
    }
}

#[derive(Default)]
pub struct MockLlm {
    pub available: Vec<ModelInfo>,
    pub running: Vec<ModelInfo>,
    replies: Mutex<VecDeque<Result<MessageRecord, String>>>,
    requests: Mutex<Vec<(String, Vec<MessageRecord>)>>,
}

impl MockLlm {
    pub fn with_models(names: &[&str]) -> Self {
        Self {
            available: names
                .iter()
                .map(|name| ModelInfo {
                    name: name.to_string(),
                    size: 0,
                })
                .collect(),
            ..Default::default()
        }
    }

    pub fn with_running(mut self, running: Vec<ModelInfo>) -> Self {
        self.running = running;
        self
    }

    /// Queues the outcome of the next `chat` call. Without a queued outcome the reply echoes
    /// the number of records received.
    pub fn push_reply(&self, reply: Result<MessageRecord, String>) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn requests(&self) -> Vec<(String, Vec<MessageRecord>)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for MockLlm {
    async fn chat(&self, model: &str, messages: &[MessageRecord]) -> Result<MessageRecord, String> {
        self.requests
            .lock()
            .unwrap()
            .push((model.to_string(), messages.to_vec()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Ok(MessageRecord::assistant(format!(
                    "reply to {} records",
                    messages.len()
                )))
            })
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>, String> {
        Ok(self.available.clone())
    }

    async fn running_models(&self) -> Result<Vec<ModelInfo>, String> {
        Ok(self.running.clone())
    }
}
