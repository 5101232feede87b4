//! Broadcast-channel notification transport.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use quizroom_core::error::AppResult;
use quizroom_session::application::notification::RoomNotification;
use quizroom_session::application::ports::RoomNotifier;
use tokio::sync::broadcast;
use uuid::Uuid;

const CHANNEL_CAPACITY: usize = 64;

/// Fans notifications out to a `tokio::sync::broadcast` channel per room.
/// The transport layer subscribes a receiver per connected client.
#[derive(Debug, Default)]
pub struct BroadcastNotifier {
    channels: RwLock<HashMap<Uuid, broadcast::Sender<RoomNotification>>>,
}

impl BroadcastNotifier {
    /// Creates a notifier with no channels.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to a room's notification stream, creating the channel on
    /// first use.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn subscribe(&self, room_id: Uuid) -> broadcast::Receiver<RoomNotification> {
        self.channels
            .write()
            .unwrap()
            .entry(room_id)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .subscribe()
    }
}

#[async_trait]
impl RoomNotifier for BroadcastNotifier {
    async fn notify_room(&self, room_id: Uuid, notification: &RoomNotification) -> AppResult<()> {
        let sender = self
            .channels
            .read()
            .unwrap()
            .get(&room_id)
            .cloned();
        if let Some(sender) = sender {
            // A send error only means nobody is subscribed right now;
            // broadcasting to an empty room is not a failure.
            let _ = sender.send(notification.clone());
        }
        Ok(())
    }
}
