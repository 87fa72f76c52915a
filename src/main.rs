#![recursion_limit = "256"]
//! # Main Entry Point
//!
//! Wires the layers together:
//! - Domain: Configuration, Types and Traits
//! - Infrastructure: Matrix, Ollama client, Logging
//! - Application: Router, Chat turns, Per-room queues, State
//! - Interface: Command Handlers
//!

mod application;
mod domain;
mod infrastructure;
mod interface;
mod strings;

use anyhow::{Context, Result};
use clap::Parser;
use matrix_sdk::{
    Client,
    config::SyncSettings,
    room::Room,
    ruma::events::room::{
        member::{MembershipState, StrippedRoomMemberEvent},
        message::SyncRoomMessageEvent,
    },
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::queue::ConversationQueues;
use crate::application::router::CommandRouter;
use crate::application::state::BotState;
use crate::domain::config::AppConfig;
use crate::infrastructure::llm::Client as LlmClient;
use crate::infrastructure::matrix::{self, MatrixService};
use crate::strings::logs;

#[derive(Parser, Debug)]
#[command(name = "ollama-chat-bot", about = "Matrix chat bot backed by an Ollama server")]
struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, env = "OLLAMA_BOT_CONFIG", default_value = "data/config.yaml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 1. Load Configuration
    let config = AppConfig::load(&args.config)?;

    // 2. Logging Setup
    let _guard = infrastructure::logging::init(Path::new(&config.system.log_dir))?;
    tracing::info!("{}", logs::config_loaded(&config.services.matrix.username));

    // 3. Inference backend and shared state
    let llm = Arc::new(LlmClient::new(&config.services.ollama)?);
    let state = Arc::new(BotState::from_config(&config, llm));

    // 4. Matrix Setup
    let client = Client::builder()
        .homeserver_url(&config.services.matrix.homeserver)
        .build()
        .await?;

    let password = config.services.matrix.resolve_password()?;
    client
        .matrix_auth()
        .login_username(&config.services.matrix.username, &password)
        .initial_device_display_name("ollama-chat-bot")
        .send()
        .await
        .context("Matrix login failed")?;
    tracing::info!("{}", logs::LOGIN_SUCCESS);

    if let Some(name) = &config.services.matrix.display_name {
        tracing::info!("{}", logs::setting_display_name(name));
        if let Err(e) = client.account().set_display_name(Some(name.as_str())).await {
            tracing::warn!("{}", logs::set_display_name_fail(&e.to_string()));
        }
    }

    let own_user_id = client
        .user_id()
        .context("Logged in client has no user id")?
        .to_string();

    // 5. Application Components
    let registry = interface::commands::registry();
    tracing::info!("Registered {} commands", registry.len());
    let router = Arc::new(CommandRouter::new(state.clone(), registry, own_user_id));
    let queues: Arc<ConversationQueues<MatrixService>> =
        Arc::new(ConversationQueues::new(router.clone()));

    let status_message = router.state().status.read().await.message.clone();
    if let Err(e) = matrix::update_presence(&client, true, &status_message).await {
        tracing::warn!("{}", logs::presence_fail(&e.to_string()));
    }

    // 6. Event Handlers
    let start_time = std::time::SystemTime::now();

    client.add_event_handler(move |ev: SyncRoomMessageEvent, room: Room| {
        let queues = queues.clone();
        async move {
            let Some(original_msg) = ev.as_original() else {
                return;
            };

            // Ignore events older than start_time
            let ts = ev.origin_server_ts();
            let event_time =
                std::time::UNIX_EPOCH + std::time::Duration::from_millis(ts.get().into());
            if event_time < start_time {
                return;
            }

            let Some(message) = matrix::inbound_message(&room, original_msg).await else {
                return;
            };
            tracing::info!(
                "Received message from {} in {}: \n{}",
                message.sender,
                message.room_id,
                message.body
            );
            queues.dispatch(MatrixService::new(room), message).await;
        }
    });

    // Handle Invites
    client.add_event_handler(|ev: StrippedRoomMemberEvent, room: Room| async move {
        if ev.content.membership != MembershipState::Invite {
            return;
        }
        tracing::info!("{}", logs::invite_received(room.room_id().as_str()));
        if let Err(e) = room.join().await {
            tracing::error!("{}", logs::join_invite_fail(&e.to_string()));
        }
    });

    // 7. Sync Loop
    tracing::info!("{}", logs::SYNC_LOOP_START);
    client.sync(SyncSettings::default()).await?;

    Ok(())
}
