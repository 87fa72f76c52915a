//! # Conversation Queues
//!
//! Serializes message handling per room: each room gets its own worker task fed by an
//! unbounded channel, so messages of one room are routed strictly in arrival order while
//! different rooms are served concurrently.

use crate::application::router::CommandRouter;
use crate::domain::traits::ChatProvider;
use crate::domain::types::InboundMessage;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

type Job<C> = (C, InboundMessage);

pub struct ConversationQueues<C> {
    router: Arc<CommandRouter>,
    senders: Mutex<HashMap<String, mpsc::UnboundedSender<Job<C>>>>,
}

impl<C> ConversationQueues<C>
where
    C: ChatProvider + 'static,
{
    pub fn new(router: Arc<CommandRouter>) -> Self {
        Self {
            router,
            senders: Mutex::new(HashMap::new()),
        }
    }

    /// Queues `message` behind the room's pending messages.
    pub async fn dispatch(&self, chat: C, message: InboundMessage) {
        let room_id = message.room_id.clone();
        let mut senders = self.senders.lock().await;

        let job = match senders.get(&room_id) {
            Some(tx) => match tx.send((chat, message)) {
                Ok(()) => return,
                // Worker is gone (a handler panicked); start a fresh one below.
                Err(mpsc::error::SendError(job)) => {
                    tracing::warn!("Worker for {} stopped, restarting", room_id);
                    job
                }
            },
            None => (chat, message),
        };

        let tx = self.spawn_worker(room_id.clone());
        if tx.send(job).is_err() {
            tracing::error!("Failed to queue message for {}", room_id);
        }
        senders.insert(room_id, tx);
    }

    fn spawn_worker(&self, room_id: String) -> mpsc::UnboundedSender<Job<C>> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Job<C>>();
        let router = self.router.clone();
        tracing::debug!("Starting worker for {}", room_id);
        tokio::spawn(async move {
            while let Some((chat, message)) = rx.recv().await {
                if let Err(e) = router.route(&chat, &message).await {
                    tracing::error!("{}", crate::strings::logs::route_fail(&room_id, &e));
                }
            }
        });
        tx
    }
}
