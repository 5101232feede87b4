//! Collaborator contracts consumed by the session services.
//!
//! Persistence backends, the question bank, the user directory, and the
//! notification transport all live behind these traits. The crate ships no
//! implementation; `quizroom-store` provides the in-process ones and tests
//! inject mocks.

use async_trait::async_trait;
use quizroom_core::error::AppResult;
use uuid::Uuid;

use crate::application::notification::RoomNotification;
use crate::domain::game::{Game, GameMode};
use crate::domain::question::{Question, SubmittedAnswer};
use crate::domain::room::Room;
use crate::domain::score::Statistic;

/// Room persistence.
#[async_trait]
pub trait RoomStore: Send + Sync {
    /// Loads a room by id. `None` if it does not exist.
    async fn get_by_id(&self, room_id: Uuid) -> AppResult<Option<Room>>;

    /// Lists available public rooms. Callers filter expiry and capacity.
    async fn get_waiting_public_rooms(&self) -> AppResult<Vec<Room>>;

    /// Persists a new room.
    async fn add(&self, room: &Room) -> AppResult<()>;

    /// Persists the current state of an existing room.
    async fn update(&self, room: &Room) -> AppResult<()>;

    /// Returns the room's newest non-finished game, if any.
    async fn get_current_game(&self, room_id: Uuid) -> AppResult<Option<Game>>;
}

/// Game persistence.
#[async_trait]
pub trait GameStore: Send + Sync {
    /// Persists a new game.
    async fn add_game(&self, game: &Game) -> AppResult<()>;

    /// Loads a game by id. `None` if it does not exist.
    async fn get_game(&self, game_id: Uuid) -> AppResult<Option<Game>>;

    /// Persists the current state of an existing game.
    async fn update_game(&self, game: &Game) -> AppResult<()>;

    /// Persists the cumulative statistic for a game after a round.
    async fn save_statistic(&self, game_id: Uuid, statistic: &Statistic) -> AppResult<()>;
}

/// Question bank.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// Returns `count` distinct questions for `mode`.
    async fn get_unique_questions(&self, count: u32, mode: GameMode) -> AppResult<Vec<Question>>;
}

/// Submitted-answer persistence.
#[async_trait]
pub trait AnswerStore: Send + Sync {
    /// Records one player's answer to one question of one game.
    async fn save_answer(
        &self,
        game_id: Uuid,
        question_id: Uuid,
        answer: &SubmittedAnswer,
    ) -> AppResult<()>;

    /// Loads every answer submitted for `(game_id, question_id)`.
    async fn load_answers(
        &self,
        game_id: Uuid,
        question_id: Uuid,
    ) -> AppResult<Vec<SubmittedAnswer>>;
}

/// Notification transport: delivers a payload to a room's subscriber group.
///
/// Delivery is wrapped in a bounded retry upstream, so implementations are
/// called at-least-once per notification and subscribers must tolerate
/// duplicates.
#[async_trait]
pub trait RoomNotifier: Send + Sync {
    /// Broadcasts `notification` to everyone subscribed to `room_id`.
    async fn notify_room(&self, room_id: Uuid, notification: &RoomNotification) -> AppResult<()>;
}

/// Read-only access to user profiles, for transient player display data.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Resolves the display name for a user.
    async fn display_name(&self, user_id: Uuid) -> AppResult<String>;
}
