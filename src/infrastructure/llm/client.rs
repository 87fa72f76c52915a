//! # LLM Client
//!
//! Talks to an Ollama server: `/api/chat` for replies, `/api/tags` for the models that can be
//! selected and `/api/ps` for the models currently loaded. Requests are sent once; failures are
//! reported to the caller and never retried here.

use crate::domain::config::OllamaConfig;
use crate::domain::traits::LlmProvider;
use crate::domain::types::{MessageRecord, ModelInfo};
use crate::infrastructure::llm::types::{ChatRequest, ChatResponse, Error, ModelList};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Response;

const PROVIDER: &str = "ollama";

pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

impl Client {
    /// Create a new client from the backend configuration
    pub fn new(config: &OllamaConfig) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        let http = builder.build().context("Failed to create HTTP client")?;
        Ok(Self {
            http,
            base_url: normalize_base_url(&config.url),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `POST /api/chat` (non-streaming)
    pub async fn send_chat(
        &self,
        model: &str,
        messages: &[MessageRecord],
    ) -> Result<MessageRecord, Error> {
        let request = ChatRequest {
            model,
            stream: false,
            messages,
        };
        tracing::debug!("POST /api/chat model={} records={}", model, messages.len());

        let response = self
            .http
            .post(self.url("/api/chat"))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::new(PROVIDER, format!("HTTP request failed: {}", e)))?;

        let body: ChatResponse = parse(response).await?;
        tracing::debug!(
            "Chat reply model={} done={} prompt_tokens={} eval_tokens={}",
            body.model.as_deref().unwrap_or(model),
            body.done.unwrap_or_default(),
            body.prompt_eval_count.unwrap_or_default(),
            body.eval_count.unwrap_or_default()
        );
        Ok(body.message)
    }

    /// `GET /api/tags`
    pub async fn tags(&self) -> Result<Vec<ModelInfo>, Error> {
        self.model_list("/api/tags").await
    }

    /// `GET /api/ps`
    pub async fn ps(&self) -> Result<Vec<ModelInfo>, Error> {
        self.model_list("/api/ps").await
    }

    async fn model_list(&self, path: &str) -> Result<Vec<ModelInfo>, Error> {
        let response = self
            .http
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| Error::new(PROVIDER, format!("HTTP request failed: {}", e)))?;
        let list: ModelList = parse(response).await?;
        Ok(list.models)
    }
}

/// Strips trailing slashes so paths can be appended directly.
fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

async fn parse<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, Error> {
    let status = response.status();

    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error response".to_string());

        // Ollama reports failures as {"error": "..."}
        if let Ok(error_json) = serde_json::from_str::<serde_json::Value>(&error_text) {
            if let Some(error_msg) = error_json.get("error").and_then(|e| e.as_str()) {
                return Err(Error::new(PROVIDER, format!("HTTP {}: {}", status, error_msg)));
            }
        }

        return Err(Error::new(PROVIDER, format!("HTTP {}: {}", status, error_text)));
    }

    response
        .json()
        .await
        .map_err(|e| Error::new(PROVIDER, format!("Failed to parse response: {}", e)))
}

#[async_trait]
impl LlmProvider for Client {
    async fn chat(&self, model: &str, messages: &[MessageRecord]) -> Result<MessageRecord, String> {
        self.send_chat(model, messages).await.map_err(|e| e.to_string())
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>, String> {
        self.tags().await.map_err(|e| e.to_string())
    }

    async fn running_models(&self) -> Result<Vec<ModelInfo>, String> {
        self.ps().await.map_err(|e| e.to_string())
    }
}
