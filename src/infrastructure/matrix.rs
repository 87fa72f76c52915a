//! # Matrix Service Adapter
//!
//! Implements the `ChatProvider` trait for the Matrix protocol using the `matrix_sdk`.
//! This module acts as the bridge between the generic `ChatProvider` interface used by the
//! bot's core logic and the specific implementation details of the Matrix SDK. It also
//! converts room message events into `InboundMessage`s.

use crate::domain::traits::ChatProvider;
use crate::domain::types::{Attachment, InboundMessage};
use anyhow::Result;
use async_trait::async_trait;
use matrix_sdk::Client;
use matrix_sdk::media::{MediaFormat, MediaRequestParameters};
use matrix_sdk::room::Room;
use matrix_sdk::ruma::api::client::presence::set_presence;
use matrix_sdk::ruma::events::room::MediaSource;
use matrix_sdk::ruma::events::room::message::{
    MessageType, OriginalSyncRoomMessageEvent, RoomMessageEventContent,
};
use matrix_sdk::ruma::presence::PresenceState;

const UNKNOWN_MEDIA_TYPE: &str = "application/octet-stream";

#[derive(Clone)]
pub struct MatrixService {
    room: Room,
}

impl MatrixService {
    pub fn new(room: Room) -> Self {
        Self { room }
    }

    async fn internal_fetch(&self, attachment: &Attachment) -> Result<Vec<u8>> {
        let source: MediaSource = serde_json::from_value(attachment.source.clone())?;
        let request = MediaRequestParameters {
            source,
            format: MediaFormat::File,
        };
        let data = self
            .room
            .client()
            .media()
            .get_media_content(&request, true)
            .await?;
        Ok(data)
    }
}

#[async_trait]
impl ChatProvider for MatrixService {
    fn room_id(&self) -> String {
        self.room.room_id().as_str().to_string()
    }

    async fn send_message(&self, content: &str) -> Result<String, String> {
        tracing::info!("Bot sending message to {}: {}", self.room_id(), content);
        self.room
            .send(RoomMessageEventContent::text_markdown(content))
            .await
            .map(|resp| resp.event_id.to_string())
            .map_err(|e| e.to_string())
    }

    async fn send_notification(&self, content: &str) -> Result<(), String> {
        tracing::info!("Bot sending notice to {}: {}", self.room_id(), content);
        self.room
            .send(RoomMessageEventContent::notice_markdown(content))
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }

    async fn typing(&self, active: bool) -> Result<(), String> {
        self.room
            .typing_notice(active)
            .await
            .map_err(|e| e.to_string())
    }

    async fn set_presence(&self, online: bool, status: &str) -> Result<(), String> {
        update_presence(&self.room.client(), online, status)
            .await
            .map_err(|e| e.to_string())
    }

    async fn fetch_attachment(&self, attachment: &Attachment) -> Result<Vec<u8>, String> {
        self.internal_fetch(attachment)
            .await
            .map_err(|e| e.to_string())
    }
}

/// Sets the account's presence and status text.
pub async fn update_presence(client: &Client, online: bool, status: &str) -> Result<()> {
    let user_id = client
        .user_id()
        .ok_or_else(|| anyhow::anyhow!("Client is not logged in"))?
        .to_owned();
    let presence = if online {
        PresenceState::Online
    } else {
        PresenceState::Unavailable
    };
    let mut request = set_presence::v3::Request::new(user_id, presence);
    request.status_msg = Some(status.to_string());
    client.send(request).await?;
    Ok(())
}

fn attachment(
    media_type: Option<&String>,
    description: &str,
    source: &MediaSource,
) -> Option<Attachment> {
    let source = match serde_json::to_value(source) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Unable to encode media source: {}", e);
            return None;
        }
    };
    Some(Attachment {
        media_type: media_type
            .cloned()
            .unwrap_or_else(|| UNKNOWN_MEDIA_TYPE.to_string()),
        description: Some(description.to_string()).filter(|d| !d.is_empty()),
        source,
    })
}

/// Converts a room message event. Returns `None` for message types the bot does not handle.
pub async fn inbound_message(
    room: &Room,
    event: &OriginalSyncRoomMessageEvent,
) -> Option<InboundMessage> {
    let (body, attachments) = match &event.content.msgtype {
        MessageType::Text(text) => (text.body.clone(), Vec::new()),
        MessageType::Image(image) => {
            let mimetype = image.info.as_ref().and_then(|i| i.mimetype.as_ref());
            (
                String::new(),
                attachment(mimetype, &image.body, &image.source).into_iter().collect(),
            )
        }
        MessageType::File(file) => {
            let mimetype = file.info.as_ref().and_then(|i| i.mimetype.as_ref());
            (
                String::new(),
                attachment(mimetype, &file.body, &file.source).into_iter().collect(),
            )
        }
        _ => return None,
    };

    let is_direct = match room.is_direct().await {
        Ok(direct) => direct,
        Err(e) => {
            tracing::warn!("Unable to tell whether {} is direct: {}", room.room_id(), e);
            false
        }
    };

    Some(InboundMessage {
        room_id: room.room_id().as_str().to_string(),
        sender: event.sender.as_str().to_string(),
        body,
        is_direct,
        attachments,
    })
}
