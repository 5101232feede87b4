//! Room entity and invite-code generation.

use chrono::{DateTime, Utc};
use quizroom_core::error::{AppError, AppResult};
use quizroom_core::random::RandomSource;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::player::Player;

/// Alphabet for invite codes. Uppercase and digits, with the easily
/// confused characters (I, O, 0, 1) left out.
pub const INVITE_CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Fixed invite-code length.
pub const INVITE_CODE_LEN: usize = 6;

/// Generates an invite code from the fixed alphabet.
pub fn generate_invite_code(random: &mut dyn RandomSource) -> String {
    (0..INVITE_CODE_LEN)
        .map(|_| INVITE_CODE_ALPHABET[random.pick_index(INVITE_CODE_ALPHABET.len())] as char)
        .collect()
}

/// Room visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Privacy {
    /// Discoverable through quick-room lookup.
    Public,
    /// Joinable only with the password.
    Private,
}

/// Room lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomStatus {
    /// Open for membership changes.
    Available,
    /// Closed; rejects all membership mutation.
    Archived,
}

/// A session container: membership, privacy, and attached games.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Room identifier.
    pub id: Uuid,
    /// User who owns the room.
    pub owner_id: Uuid,
    /// Visibility.
    pub privacy: Privacy,
    /// Password required to join when private.
    pub password: Option<String>,
    /// Lifecycle state.
    pub status: RoomStatus,
    /// Maximum member count.
    pub max_players: u32,
    /// Short random code used to address the room.
    pub invite_code: String,
    /// Scheduled close time, swept by an external job.
    pub expires_at: DateTime<Utc>,
    /// Current members.
    pub players: Vec<Player>,
    /// Games attached to the room, in creation order.
    pub game_ids: Vec<Uuid>,
}

impl Room {
    /// Creates an available room with no members.
    #[must_use]
    pub fn new(
        owner_id: Uuid,
        privacy: Privacy,
        password: Option<String>,
        max_players: u32,
        invite_code: String,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            privacy,
            password,
            status: RoomStatus::Available,
            max_players,
            invite_code,
            expires_at,
            players: Vec::new(),
            game_ids: Vec::new(),
        }
    }

    /// Whether the room's TTL has elapsed.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Whether the room is at capacity.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.players.len() >= self.max_players as usize
    }

    /// Returns the membership for `user_id`, if any.
    #[must_use]
    pub fn member_for_user(&self, user_id: Uuid) -> Option<&Player> {
        self.players.iter().find(|p| p.user_id == user_id)
    }

    /// Returns the membership with the given player id, if any.
    #[must_use]
    pub fn member_by_player_id(&self, player_id: Uuid) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    /// Adds a member, enforcing the membership invariants.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` if the room is archived or at capacity,
    /// and `AlreadyExists` if the user already has a membership here.
    pub fn add_member(&mut self, player: Player) -> AppResult<()> {
        if self.status == RoomStatus::Archived {
            return Err(AppError::invalid_operation("room is archived"));
        }
        if self.is_full() {
            return Err(AppError::invalid_operation("room is at capacity"));
        }
        if self.member_for_user(player.user_id).is_some() {
            return Err(AppError::already_exists("user is already in the room"));
        }
        self.players.push(player);
        Ok(())
    }

    /// Removes the membership for `user_id`, transferring ownership to
    /// another member when the owner leaves.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the user has no membership here, and
    /// `InvalidOperation` if the owner tries to leave with no other member
    /// to hand the room to. On error the member list is untouched.
    pub fn remove_member_by_user(&mut self, user_id: Uuid) -> AppResult<Player> {
        let index = self
            .players
            .iter()
            .position(|p| p.user_id == user_id)
            .ok_or_else(|| AppError::not_found("user is not a member of the room"))?;
        if user_id == self.owner_id && self.players.len() == 1 {
            return Err(AppError::invalid_operation(
                "owner cannot leave: no other member to transfer the room to",
            ));
        }
        let removed = self.players.remove(index);
        if removed.user_id == self.owner_id {
            // The position check above guarantees a remaining member.
            self.owner_id = self.players[0].user_id;
        }
        Ok(removed)
    }
}
