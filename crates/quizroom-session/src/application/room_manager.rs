//! Room lifecycle: create, join, leave, kick, quick-room discovery.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use quizroom_core::clock::Clock;
use quizroom_core::error::{AppError, AppResult};
use quizroom_core::random::RandomSource;
use quizroom_core::retry::{RetryPolicy, retry};
use uuid::Uuid;

use crate::application::connections::ConnectionService;
use crate::application::notification::{Notifications, RoomNotification};
use crate::application::ports::{RoomStore, UserDirectory};
use crate::domain::player::Player;
use crate::domain::room::{Privacy, Room, RoomStatus, generate_invite_code};

/// Room capacity when the creator does not pick one.
pub const DEFAULT_MAX_PLAYERS: u32 = 4;

/// How long a fresh room lives before the external sweep may reap it.
pub const ROOM_TTL: Duration = Duration::from_secs(2 * 60 * 60);

/// Orchestrates room membership against the room store, the user directory,
/// the connection registry, and the notification transport.
pub struct RoomManager {
    rooms: Arc<dyn RoomStore>,
    users: Arc<dyn UserDirectory>,
    connections: Arc<ConnectionService>,
    notifications: Notifications,
    clock: Arc<dyn Clock>,
    random: Mutex<Box<dyn RandomSource>>,
    policy: RetryPolicy,
}

impl RoomManager {
    /// Creates a manager over the given collaborators.
    #[must_use]
    pub fn new(
        rooms: Arc<dyn RoomStore>,
        users: Arc<dyn UserDirectory>,
        connections: Arc<ConnectionService>,
        notifications: Notifications,
        clock: Arc<dyn Clock>,
        random: Box<dyn RandomSource>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            rooms,
            users,
            connections,
            notifications,
            clock,
            random: Mutex::new(random),
            policy,
        }
    }

    /// Creates a room owned by `owner_id` and persists it.
    ///
    /// The owner is *not* added as a member; joining is always explicit,
    /// including for the owner.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for a zero capacity and store errors once
    /// retries are exhausted.
    pub async fn create_room(
        &self,
        owner_id: Uuid,
        privacy: Privacy,
        password: Option<String>,
        max_players: Option<u32>,
    ) -> AppResult<Room> {
        let max_players = max_players.unwrap_or(DEFAULT_MAX_PLAYERS);
        if max_players == 0 {
            return Err(AppError::validation("max_players must be at least 1"));
        }
        let invite_code = {
            let mut random = self.random.lock().unwrap();
            generate_invite_code(random.as_mut())
        };
        let room = Room::new(
            owner_id,
            privacy,
            password,
            max_players,
            invite_code,
            self.clock.deadline(ROOM_TTL),
        );
        retry(self.policy, "room_store.add", || self.rooms.add(&room)).await?;
        tracing::info!(room_id = %room.id, owner_id = %owner_id, "room created");
        Ok(room)
    }

    /// Loads a room snapshot.
    ///
    /// # Errors
    ///
    /// `NotFound` if the room is missing, store errors once retries are
    /// exhausted.
    pub async fn get_room(&self, room_id: Uuid) -> AppResult<Room> {
        self.load_room(room_id).await
    }

    /// Adds `user_id` to a room and broadcasts the arrival.
    ///
    /// # Errors
    ///
    /// `NotFound` if the room is missing; `InvalidOperation` if it is
    /// expired, archived, or at capacity; `AlreadyExists` if the user is
    /// already a member; `Unauthorized` if the room is private and the
    /// password does not match.
    pub async fn join_room(
        &self,
        room_id: Uuid,
        user_id: Uuid,
        password: Option<&str>,
    ) -> AppResult<Room> {
        let mut room = self.load_room(room_id).await?;
        if room.is_expired(self.clock.now()) {
            return Err(AppError::invalid_operation("room has expired"));
        }
        if room.status == RoomStatus::Archived {
            return Err(AppError::invalid_operation("room is archived"));
        }
        if room.is_full() {
            return Err(AppError::invalid_operation("room is at capacity"));
        }
        if room.member_for_user(user_id).is_some() {
            return Err(AppError::already_exists("user is already in the room"));
        }
        if room.privacy == Privacy::Private && room.password.as_deref() != password {
            return Err(AppError::unauthorized("wrong room password"));
        }

        let display_name = retry(self.policy, "user_directory.display_name", || {
            self.users.display_name(user_id)
        })
        .await?;
        let player = Player::new(user_id, room.id).with_display_name(display_name.clone());
        room.add_member(player.clone())?;
        retry(self.policy, "room_store.update", || self.rooms.update(&room)).await?;
        self.notifications
            .publish(
                room.id,
                &RoomNotification::NewPlayerEntered {
                    player_id: player.id,
                    player_name: display_name,
                },
            )
            .await?;
        Ok(room)
    }

    /// Removes `user_id` from a room and broadcasts the departure.
    ///
    /// # Errors
    ///
    /// `NotFound` if the room or the membership is missing;
    /// `InvalidOperation` if the owner is the last member.
    pub async fn leave_room(&self, room_id: Uuid, user_id: Uuid) -> AppResult<()> {
        self.remove_member(room_id, user_id).await.map(|_| ())
    }

    /// Removes the player `target_player_id` on behalf of the room owner
    /// and severs the target's live connection.
    ///
    /// # Errors
    ///
    /// `Forbidden` if the requester is not the owner; `NotFound` if the
    /// room or the target membership is missing.
    pub async fn kick_player(
        &self,
        requester_id: Uuid,
        room_id: Uuid,
        target_player_id: Uuid,
    ) -> AppResult<()> {
        let room = self.load_room(room_id).await?;
        if room.owner_id != requester_id {
            return Err(AppError::forbidden("only the owner can kick players"));
        }
        let target_user_id = room
            .member_by_player_id(target_player_id)
            .map(|p| p.user_id)
            .ok_or_else(|| AppError::not_found("player is not a member of the room"))?;
        self.remove_member(room_id, target_user_id).await.map(|_| ())
    }

    /// Finds a joinable public room, creating one when none exists, and
    /// joins `user_id` into it.
    ///
    /// # Errors
    ///
    /// Store errors once retries are exhausted, plus any `join_room`
    /// failure.
    pub async fn find_or_create_quick_room(&self, user_id: Uuid) -> AppResult<Room> {
        let found = self.joinable_public_rooms().await?.into_iter().next();
        let room = match found {
            Some(room) => room,
            None => {
                self.create_room(user_id, Privacy::Public, None, None)
                    .await?
            }
        };
        self.join_room(room.id, user_id, None).await
    }

    /// Counts public rooms currently open to quick-join discovery. Exposed
    /// as a coarse load signal on the health endpoint.
    ///
    /// # Errors
    ///
    /// Store errors once retries are exhausted.
    pub async fn open_public_room_count(&self) -> AppResult<usize> {
        Ok(self.joinable_public_rooms().await?.len())
    }

    async fn joinable_public_rooms(&self) -> AppResult<Vec<Room>> {
        let candidates = retry(self.policy, "room_store.get_waiting_public_rooms", || {
            self.rooms.get_waiting_public_rooms()
        })
        .await?;
        let now = self.clock.now();
        Ok(candidates
            .into_iter()
            .filter(|room| {
                room.privacy == Privacy::Public
                    && room.status == RoomStatus::Available
                    && !room.is_expired(now)
                    && !room.is_full()
            })
            .collect())
    }

    /// Translates a transport-level disconnect into a room departure.
    ///
    /// Unknown connections are ignored; a room or membership that no longer
    /// exists only clears the stale mapping. Store failures keep the mapping
    /// intact and propagate so the transport can retry the hook.
    ///
    /// # Errors
    ///
    /// Propagates store failures and `leave_room` failures.
    pub async fn handle_disconnect(&self, connection_id: &str) -> AppResult<()> {
        let Some((player_id, room_id)) = self.connections.player_by_connection(connection_id)
        else {
            return Ok(());
        };
        let room = match self.load_room(room_id).await {
            Ok(room) => room,
            Err(AppError::NotFound(_)) => {
                self.connections.remove_connection(connection_id);
                return Ok(());
            }
            Err(error) => return Err(error),
        };
        let Some(user_id) = room.member_by_player_id(player_id).map(|p| p.user_id) else {
            self.connections.remove_connection(connection_id);
            return Ok(());
        };
        self.leave_room(room_id, user_id).await
    }

    async fn load_room(&self, room_id: Uuid) -> AppResult<Room> {
        retry(self.policy, "room_store.get_by_id", || {
            self.rooms.get_by_id(room_id)
        })
        .await?
        .ok_or_else(|| AppError::not_found(format!("room {room_id} does not exist")))
    }

    async fn remove_member(&self, room_id: Uuid, user_id: Uuid) -> AppResult<(Room, Player)> {
        let mut room = self.load_room(room_id).await?;
        let removed = room.remove_member_by_user(user_id)?;
        retry(self.policy, "room_store.update", || self.rooms.update(&room)).await?;
        if let Some(connection_id) = self.connections.connection_by_player(removed.id) {
            self.connections.remove_connection(&connection_id);
        }
        self.notifications
            .publish(
                room.id,
                &RoomNotification::PlayerLeft {
                    player_id: removed.id,
                    new_owner_id: room.owner_id,
                },
            )
            .await?;
        Ok((room, removed))
    }
}
