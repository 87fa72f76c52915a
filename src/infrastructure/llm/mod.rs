//! # LLM Infrastructure
//!
//! Ollama HTTP client implementing the `LlmProvider` domain trait.

mod client;
mod types;

pub use client::Client;
