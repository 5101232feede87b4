//! Bidirectional map between transport connections and players.
//!
//! The transport layer registers a connection after a successful join and
//! looks players up here when a socket drops; kicks use the reverse
//! direction to find and sever the victim's live connection.

use std::collections::HashMap;
use std::sync::Mutex;

use quizroom_core::error::{AppError, AppResult};
use uuid::Uuid;

#[derive(Debug, Default)]
struct ConnectionMaps {
    by_connection: HashMap<String, (Uuid, Uuid)>,
    by_player: HashMap<Uuid, String>,
}

/// Tracks which transport connection belongs to which player, and back.
#[derive(Debug, Default)]
pub struct ConnectionService {
    inner: Mutex<ConnectionMaps>,
}

impl ConnectionService {
    /// Creates an empty service.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a connection for a player in a room.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExists` if the connection id is already registered.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn add_connection(
        &self,
        connection_id: &str,
        player_id: Uuid,
        room_id: Uuid,
    ) -> AppResult<()> {
        let mut maps = self.inner.lock().unwrap();
        if maps.by_connection.contains_key(connection_id) {
            return Err(AppError::already_exists(format!(
                "connection {connection_id} is already registered"
            )));
        }
        maps.by_connection
            .insert(connection_id.to_owned(), (player_id, room_id));
        maps.by_player.insert(player_id, connection_id.to_owned());
        Ok(())
    }

    /// Removes a connection, returning the `(player_id, room_id)` it was
    /// registered to, if any.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn remove_connection(&self, connection_id: &str) -> Option<(Uuid, Uuid)> {
        let mut maps = self.inner.lock().unwrap();
        let entry = maps.by_connection.remove(connection_id);
        if let Some((player_id, _)) = entry {
            maps.by_player.remove(&player_id);
        }
        entry
    }

    /// Looks up the `(player_id, room_id)` behind a connection. Used by the
    /// transport's disconnect hook.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn player_by_connection(&self, connection_id: &str) -> Option<(Uuid, Uuid)> {
        self.inner
            .lock()
            .unwrap()
            .by_connection
            .get(connection_id)
            .copied()
    }

    /// Looks up a player's live connection id. Used by kick.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn connection_by_player(&self, player_id: Uuid) -> Option<String> {
        self.inner.lock().unwrap().by_player.get(&player_id).cloned()
    }
}
