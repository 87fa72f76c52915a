//! # Command Router
//!
//! Routes incoming messages either to a registered command handler (`!name args...`) or to the
//! chat pipeline. Messages from the bot itself and from non-direct rooms are ignored.

use anyhow::Result;
use std::sync::Arc;

use crate::application::chat;
use crate::application::registry::{COMMAND_PREFIX, CommandContext, CommandRegistry};
use crate::application::state::BotState;
use crate::application::tokenizer::tokenize;
use crate::application::utils::notify;
use crate::domain::traits::ChatProvider;
use crate::domain::types::InboundMessage;

pub struct CommandRouter {
    state: Arc<BotState>,
    registry: CommandRegistry,
    bot_user_id: String,
}

impl CommandRouter {
    pub fn new(
        state: Arc<BotState>,
        registry: CommandRegistry,
        bot_user_id: impl Into<String>,
    ) -> Self {
        Self {
            state,
            registry,
            bot_user_id: bot_user_id.into(),
        }
    }

    pub fn state(&self) -> &Arc<BotState> {
        &self.state
    }

    pub async fn route(&self, chat: &dyn ChatProvider, message: &InboundMessage) -> Result<()> {
        if message.sender == self.bot_user_id {
            return Ok(());
        }
        if !message.is_direct {
            tracing::debug!("Ignoring message in non-direct room {}", message.room_id);
            return Ok(());
        }

        if !message.body.starts_with(COMMAND_PREFIX) {
            return chat::chat_turn(&self.state, chat, message).await;
        }

        let args = tokenize(&message.body);
        // A lone prefix tokenizes to a single argument, so `args` is never empty here.
        let Some(key) = args.first() else {
            return Ok(());
        };
        tracing::info!(
            "Router dispatching cmd='{}' args={:?} sender='{}'",
            key,
            &args[1..],
            message.sender
        );

        let Some(handler) = self.registry.lookup(key) else {
            return notify(chat, &crate::strings::messages::command_not_found(key)).await;
        };

        let ctx = CommandContext {
            state: &self.state,
            registry: &self.registry,
            chat,
            message,
        };
        handler.call(&ctx, &args).await
    }
}
