//! # Availability Commands
//!
//! Handles `!enable` and `!disable`. Both are registered admin-only; the optional argument
//! replaces the status text. Disabling also drops every conversation context.

use crate::application::registry::{CommandContext, CommandHandler};
use crate::application::utils::say;
use crate::strings::{logs, messages};
use anyhow::Result;
use async_trait::async_trait;

pub struct Enable;
pub struct Disable;

#[async_trait]
impl CommandHandler for Enable {
    async fn call(&self, ctx: &CommandContext<'_>, args: &[String]) -> Result<()> {
        let status_text = set_enabled(ctx, true, args.get(1)).await;
        tracing::info!("Bot enabled by {}", ctx.message.sender);
        update_presence(ctx, true, &status_text).await;
        say(ctx.chat, messages::NOW_ONLINE).await
    }
}

#[async_trait]
impl CommandHandler for Disable {
    async fn call(&self, ctx: &CommandContext<'_>, args: &[String]) -> Result<()> {
        let status_text = set_enabled(ctx, false, args.get(1)).await;
        tracing::info!("Bot disabled by {}", ctx.message.sender);
        update_presence(ctx, false, &status_text).await;
        say(ctx.chat, messages::NOW_OFFLINE).await
    }
}

/// Flips the switch under the status write lock, which waits for in-flight chat turns.
async fn set_enabled(ctx: &CommandContext<'_>, enabled: bool, text: Option<&String>) -> String {
    let mut status = ctx.state.status.write().await;
    status.enabled = enabled;
    if let Some(text) = text {
        status.message = text.clone();
    }
    if !enabled {
        ctx.state.contexts.lock().await.reset();
    }
    status.message.clone()
}

async fn update_presence(ctx: &CommandContext<'_>, online: bool, status_text: &str) {
    if let Err(e) = ctx.chat.set_presence(online, status_text).await {
        tracing::warn!("{}", logs::presence_fail(&e));
    }
}
