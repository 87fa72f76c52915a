//! # Miscellaneous Commands
//!
//! Handles `!status`, `!retry` and `!clear`.

use crate::application::chat;
use crate::application::registry::{CommandContext, CommandHandler};
use crate::application::utils::{say, set_typing};
use crate::strings::messages;
use anyhow::{Result, anyhow};
use async_trait::async_trait;

pub struct Status;
pub struct Retry;
pub struct Clear;

#[async_trait]
impl CommandHandler for Status {
    async fn call(&self, ctx: &CommandContext<'_>, _args: &[String]) -> Result<()> {
        set_typing(ctx.chat, true).await;

        let status = ctx.state.status.read().await.clone();
        let model = {
            let shared = ctx.state.context(&ctx.message.room_id).await;
            let guard = shared.lock().await;
            guard.model.clone()
        };
        let running = ctx.state.llm.running_models().await;

        set_typing(ctx.chat, false).await;
        let running = running.map_err(|e| anyhow!("Listing running models failed: {}", e))?;

        let since = ctx.state.started_at.format("%Y-%m-%d %H:%M:%S").to_string();
        let report =
            messages::status_report(status.enabled, &model, &status.message, &since, &running);
        say(ctx.chat, &report).await
    }
}

#[async_trait]
impl CommandHandler for Retry {
    async fn call(&self, ctx: &CommandContext<'_>, _args: &[String]) -> Result<()> {
        chat::retry_turn(ctx.state, ctx.chat, &ctx.message.room_id).await
    }
}

#[async_trait]
impl CommandHandler for Clear {
    async fn call(&self, ctx: &CommandContext<'_>, _args: &[String]) -> Result<()> {
        {
            let shared = ctx.state.context(&ctx.message.room_id).await;
            shared.lock().await.clear();
        }
        say(ctx.chat, messages::HISTORY_CLEARED).await
    }
}
