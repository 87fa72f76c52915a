use crate::domain::traits::ChatProvider;
use anyhow::Result;

/// Sends a message, turning the transport error into an `anyhow` error.
pub async fn say(chat: &dyn ChatProvider, content: &str) -> Result<()> {
    chat.send_message(content)
        .await
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!("Failed to send message to {}: {}", chat.room_id(), e))
}

pub async fn notify(chat: &dyn ChatProvider, content: &str) -> Result<()> {
    chat.send_notification(content)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to send notification to {}: {}", chat.room_id(), e))
}

/// Sends a notice that must not interrupt the caller; failures are only logged.
pub async fn notify_or_warn(chat: &dyn ChatProvider, content: &str) {
    if let Err(e) = notify(chat, content).await {
        tracing::warn!("{:#}", e);
    }
}

/// Typing indicators are cosmetic; failures are only logged.
pub async fn set_typing(chat: &dyn ChatProvider, active: bool) {
    if let Err(e) = chat.typing(active).await {
        tracing::warn!("Failed to set typing={} in {}: {}", active, chat.room_id(), e);
    }
}
