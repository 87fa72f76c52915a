//! # Command Registry
//!
//! Maps command keys (`!status`, `!model`, ...) to handlers and their help descriptions.
//! Privileged commands are stored already wrapped by the admin gate, so lookups never need to
//! know about privileges.

use crate::application::state::BotState;
use crate::domain::traits::ChatProvider;
use crate::domain::types::InboundMessage;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

pub const COMMAND_PREFIX: char = '!';
const ADMIN_ONLY_SUFFIX: &str = " _(admin only)_";

/// Everything a handler may touch while serving one message.
pub struct CommandContext<'a> {
    pub state: &'a BotState,
    pub registry: &'a CommandRegistry,
    pub chat: &'a dyn ChatProvider,
    pub message: &'a InboundMessage,
}

#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// `args[0]` is the command key itself.
    async fn call(&self, ctx: &CommandContext<'_>, args: &[String]) -> Result<()>;
}

pub type SharedHandler = Arc<dyn CommandHandler>;

/// Decides whether the caller of a command may run it.
pub type Predicate = fn(&CommandContext<'_>) -> bool;

struct Gate {
    inner: SharedHandler,
    allow: Predicate,
}

#[async_trait]
impl CommandHandler for Gate {
    async fn call(&self, ctx: &CommandContext<'_>, args: &[String]) -> Result<()> {
        if !(self.allow)(ctx) {
            tracing::warn!(
                "Rejected {} from {}",
                args.first().map(String::as_str).unwrap_or_default(),
                ctx.message.sender
            );
            ctx.chat
                .send_notification(crate::strings::messages::AUTH_DENIED)
                .await
                .map_err(|e| anyhow::anyhow!(e))?;
            return Ok(());
        }
        self.inner.call(ctx, args).await
    }
}

/// Wraps `inner` so it only runs when `allow` accepts the caller.
pub fn gate(inner: SharedHandler, allow: Predicate) -> SharedHandler {
    Arc::new(Gate { inner, allow })
}

fn sender_is_admin(ctx: &CommandContext<'_>) -> bool {
    ctx.state.is_admin(&ctx.message.sender)
}

pub fn require_admin(inner: SharedHandler) -> SharedHandler {
    gate(inner, sender_is_admin)
}

pub struct CommandEntry {
    pub key: String,
    pub description: String,
    pub requires_admin: bool,
    pub handler: SharedHandler,
}

#[derive(Default)]
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
    index: HashMap<String, usize>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` under `!name` and returns the stored (possibly gated) handler.
    /// Registering an existing name replaces the previous entry in place.
    pub fn register(
        &mut self,
        name: &str,
        description: &str,
        requires_admin: bool,
        handler: SharedHandler,
    ) -> SharedHandler {
        let key = format!("{COMMAND_PREFIX}{name}");

        let (handler, description) = if requires_admin {
            (require_admin(handler), format!("{description}{ADMIN_ONLY_SUFFIX}"))
        } else {
            (handler, description.to_string())
        };

        let entry = CommandEntry {
            key: key.clone(),
            description,
            requires_admin,
            handler: handler.clone(),
        };
        tracing::debug!("Register command: {} (admin: {})", entry.key, entry.requires_admin);

        match self.index.get(&key) {
            Some(&i) => self.entries[i] = entry,
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push(entry);
            }
        }
        handler
    }

    pub fn lookup(&self, key: &str) -> Option<SharedHandler> {
        self.index.get(key).map(|&i| self.entries[i].handler.clone())
    }

    #[cfg(test)]
    pub fn entry(&self, key: &str) -> Option<&CommandEntry> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    /// `(key, description)` pairs in registration order.
    pub fn list(&self) -> Vec<(&str, &str)> {
        self.entries
            .iter()
            .map(|e| (e.key.as_str(), e.description.as_str()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{MockChat, MockLlm};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counter(AtomicUsize);

    #[async_trait]
    impl CommandHandler for Counter {
        async fn call(&self, _ctx: &CommandContext<'_>, _args: &[String]) -> Result<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn state() -> BotState {
        BotState::new(
            "m",
            "Available",
            &["@admin:example.org".to_string()],
            Arc::new(MockLlm::default()),
        )
    }

    #[test]
    fn test_register_prefixes_key_and_annotates_admin() {
        let mut registry = CommandRegistry::new();
        registry.register("help", "Print available commands", false, Arc::new(Counter::default()));
        registry.register("disable", "Put the bot offline", true, Arc::new(Counter::default()));

        assert!(registry.lookup("!help").is_some());
        assert!(registry.lookup("help").is_none());
        assert_eq!(
            registry.list(),
            vec![
                ("!help", "Print available commands"),
                ("!disable", "Put the bot offline _(admin only)_"),
            ]
        );
        let entry = registry.entry("!disable").unwrap();
        assert_eq!(entry.key, "!disable");
        assert!(entry.requires_admin);
    }

    #[test]
    fn test_reregistration_overwrites_in_place() {
        let mut registry = CommandRegistry::new();
        registry.register("a", "first", false, Arc::new(Counter::default()));
        registry.register("b", "second", false, Arc::new(Counter::default()));
        registry.register("a", "replaced", true, Arc::new(Counter::default()));

        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.list(),
            vec![("!a", "replaced _(admin only)_"), ("!b", "second")]
        );
    }

    #[tokio::test]
    async fn test_admin_gate_blocks_non_admin() {
        let counter = Arc::new(Counter::default());
        let mut registry = CommandRegistry::new();
        let handler = registry.register("disable", "Put the bot offline", true, counter.clone());

        let state = state();
        let chat = MockChat::new("!dm:example.org");
        let message = InboundMessage::text("!dm:example.org", "@eve:example.org", "!disable");
        let ctx = CommandContext {
            state: &state,
            registry: &registry,
            chat: &chat,
            message: &message,
        };
        handler.call(&ctx, &["!disable".to_string()]).await.unwrap();

        assert_eq!(counter.0.load(Ordering::SeqCst), 0);
        assert_eq!(chat.sent(), vec![crate::strings::messages::AUTH_DENIED.to_string()]);
    }

    #[tokio::test]
    async fn test_admin_gate_passes_admin() {
        let counter = Arc::new(Counter::default());
        let mut registry = CommandRegistry::new();
        registry.register("disable", "Put the bot offline", true, counter.clone());

        let state = state();
        let chat = MockChat::new("!dm:example.org");
        let message = InboundMessage::text("!dm:example.org", "@Admin:example.org", "!disable");
        let ctx = CommandContext {
            state: &state,
            registry: &registry,
            chat: &chat,
            message: &message,
        };
        let handler = registry.lookup("!disable").unwrap();
        handler.call(&ctx, &["!disable".to_string()]).await.unwrap();

        assert_eq!(counter.0.load(Ordering::SeqCst), 1);
        assert!(chat.sent().is_empty());
    }

    #[tokio::test]
    async fn test_custom_predicate() {
        let counter = Arc::new(Counter::default());
        let never: Predicate = |_| false;
        let gated = gate(counter.clone(), never);

        let state = state();
        let registry = CommandRegistry::new();
        let chat = MockChat::new("!dm:example.org");
        let message = InboundMessage::text("!dm:example.org", "@admin:example.org", "!x");
        let ctx = CommandContext {
            state: &state,
            registry: &registry,
            chat: &chat,
            message: &message,
        };
        gated.call(&ctx, &["!x".to_string()]).await.unwrap();
        assert_eq!(counter.0.load(Ordering::SeqCst), 0);
    }
}
