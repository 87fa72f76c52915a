//! # Application Layer
//!
//! Contains the core logic and orchestration of the bot.
//! This includes command routing, chat turns, per-room queues and shared state.

pub mod chat;
pub mod context;
pub mod queue;
pub mod registry;
pub mod router;
pub mod state;
pub mod tokenizer;
pub mod utils;

#[cfg(test)]
pub mod testing;
