//! # Model Command
//!
//! Handles `!model`: without argument lists the backend's models and the room's selection,
//! with one argument switches the room to that model if the backend knows it.

use crate::application::registry::{CommandContext, CommandHandler};
use crate::application::utils::{notify, say};
use crate::strings::messages;
use anyhow::{Result, anyhow};
use async_trait::async_trait;

pub struct Model;

#[async_trait]
impl CommandHandler for Model {
    async fn call(&self, ctx: &CommandContext<'_>, args: &[String]) -> Result<()> {
        match args {
            [_] => list(ctx).await,
            [_, name] => select(ctx, name).await,
            _ => notify(ctx.chat, messages::INVALID_ARGUMENTS).await,
        }
    }
}

async fn list(ctx: &CommandContext<'_>) -> Result<()> {
    let models = ctx
        .state
        .llm
        .list_models()
        .await
        .map_err(|e| anyhow!("Listing models failed: {}", e))?;
    let shared = ctx.state.context(&ctx.message.room_id).await;
    let current = shared.lock().await.model.clone();
    say(ctx.chat, &messages::available_models(&models, &current)).await
}

async fn select(ctx: &CommandContext<'_>, name: &str) -> Result<()> {
    let models = ctx
        .state
        .llm
        .list_models()
        .await
        .map_err(|e| anyhow!("Listing models failed: {}", e))?;

    if !models.iter().any(|m| m.name == name) {
        return say(ctx.chat, &messages::unknown_model(name)).await;
    }

    let shared = ctx.state.context(&ctx.message.room_id).await;
    shared.lock().await.set_model(name);
    tracing::info!("Room {} switched to model {}", ctx.message.room_id, name);
    say(ctx.chat, &messages::new_model(name)).await
}
