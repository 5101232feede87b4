//! Player entity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user's membership in a single room.
///
/// `display_name` is transient: it is populated on demand from the user
/// directory when the player joins and is never the source of truth for
/// the user's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Player identifier, unique per membership.
    pub id: Uuid,
    /// The user this membership belongs to.
    pub user_id: Uuid,
    /// The room this membership belongs to.
    pub room_id: Uuid,
    /// Live transport connection, if any.
    pub connection_id: Option<String>,
    /// Display name resolved from the user directory.
    pub display_name: Option<String>,
}

impl Player {
    /// Creates a new membership for `user_id` in `room_id`.
    #[must_use]
    pub fn new(user_id: Uuid, room_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            room_id,
            connection_id: None,
            display_name: None,
        }
    }

    /// Sets the resolved display name.
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }
}
