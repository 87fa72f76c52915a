//! # Chat Turn
//!
//! One request/response cycle with the inference backend: the user's message (and any image
//! attachments) is appended to the room's history, the whole history is submitted, and the
//! reply is appended and posted back.
//!
//! A turn holds the status read guard and the room's context lock from start to finish, so turns
//! in the same room never interleave and the bot cannot be disabled halfway through one.

use crate::application::context::ConversationContext;
use crate::application::state::BotState;
use crate::application::utils::{notify, notify_or_warn, say, set_typing};
use crate::domain::traits::ChatProvider;
use crate::domain::types::{InboundMessage, MessageRecord, Role};
use crate::strings::messages;
use anyhow::{Result, anyhow};
use base64::{Engine, engine::general_purpose::STANDARD};

pub const ACCEPTED_IMAGE_TYPES: [&str; 2] = ["image/png", "image/jpeg"];

/// Runs a turn for an ordinary (non-command) message.
pub async fn chat_turn(
    state: &BotState,
    chat: &dyn ChatProvider,
    message: &InboundMessage,
) -> Result<()> {
    let status = state.status.read().await;
    if !status.enabled {
        return notify(chat, messages::OFFLINE_IGNORED).await;
    }

    let shared = state.context(&message.room_id).await;
    let mut ctx = shared.lock().await;

    let record = build_user_record(chat, message).await;
    ctx.push(record);

    complete_turn(state, chat, &mut ctx).await
}

/// Drops the last reply of the room (if any) and asks the backend again.
///
/// A trailing user record (left behind by a failed turn) is resubmitted as is.
pub async fn retry_turn(state: &BotState, chat: &dyn ChatProvider, room_id: &str) -> Result<()> {
    let status = state.status.read().await;
    if !status.enabled {
        return notify(chat, messages::OFFLINE_IGNORED).await;
    }

    let shared = state.context(room_id).await;
    let mut ctx = shared.lock().await;

    if ctx.last_role() == Some(Role::Assistant) {
        ctx.pop();
    }
    if ctx.messages.is_empty() {
        tracing::debug!("Nothing to retry in {}", room_id);
        return Ok(());
    }

    complete_turn(state, chat, &mut ctx).await
}

/// Attachment problems are reported per attachment and never abort the turn.
async fn build_user_record(chat: &dyn ChatProvider, message: &InboundMessage) -> MessageRecord {
    let mut record = MessageRecord::user(message.body.clone());
    let mut images = Vec::new();
    let mut description = String::new();

    for attachment in &message.attachments {
        if !ACCEPTED_IMAGE_TYPES.contains(&attachment.media_type.as_str()) {
            notify_or_warn(chat, &messages::unknown_attachment_type(&attachment.media_type)).await;
            continue;
        }

        match chat.fetch_attachment(attachment).await {
            Ok(data) => {
                images.push(STANDARD.encode(data));
                if let Some(text) = &attachment.description {
                    description.push('\n');
                    description.push_str(text);
                }
            }
            Err(e) => {
                let name = attachment.description.as_deref().unwrap_or("(unnamed)");
                tracing::warn!(
                    "Attachment {} in {} could not be fetched: {}",
                    name,
                    message.room_id,
                    e
                );
                notify_or_warn(chat, &messages::attachment_fetch_failed(name, &e)).await;
            }
        }
    }

    if !images.is_empty() {
        record.content.push_str(&description);
        record.images = Some(images);
    }
    record
}

async fn complete_turn(
    state: &BotState,
    chat: &dyn ChatProvider,
    ctx: &mut ConversationContext,
) -> Result<()> {
    set_typing(chat, true).await;
    let result = exchange(state, chat, ctx).await;
    set_typing(chat, false).await;
    result
}

async fn exchange(
    state: &BotState,
    chat: &dyn ChatProvider,
    ctx: &mut ConversationContext,
) -> Result<()> {
    tracing::info!(
        "Submitting {} records to {} for {}",
        ctx.messages.len(),
        ctx.model,
        ctx.room_id
    );
    let reply = state
        .llm
        .chat(&ctx.model, &ctx.messages)
        .await
        .map_err(|e| anyhow!("Chat request for {} failed: {}", ctx.room_id, e))?;

    let content = reply.content.clone();
    let has_images = reply.has_images();
    ctx.push(reply);

    say(chat, &content).await?;
    if has_images {
        notify(chat, messages::REPLY_HAS_IMAGES).await?;
    }
    Ok(())
}
