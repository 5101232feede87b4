//! Game lifecycle: create, start, answer submission, finish.

use std::sync::Arc;

use quizroom_core::error::{AppError, AppResult};
use quizroom_core::retry::{RetryPolicy, retry};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::application::game_loop::GameCoreService;
use crate::application::notification::{Notifications, RoomNotification};
use crate::application::ports::{AnswerStore, GameStore, RoomStore};
use crate::domain::game::{Game, GameMode};
use crate::domain::question::{AnswerValue, Question, SubmittedAnswer};
use crate::domain::room::Room;

/// Members a room needs before a game may start.
const MIN_PLAYERS_TO_START: usize = 2;

/// Orchestrates game lifecycle against the stores and the tick loop.
pub struct GameManager {
    rooms: Arc<dyn RoomStore>,
    games: Arc<dyn GameStore>,
    answers: Arc<dyn AnswerStore>,
    notifications: Notifications,
    core: Arc<GameCoreService>,
    policy: RetryPolicy,
    shutdown: CancellationToken,
}

impl GameManager {
    /// Creates a manager over the given collaborators. `shutdown` is the
    /// root cancellation signal; every started game gets a child token.
    #[must_use]
    pub fn new(
        rooms: Arc<dyn RoomStore>,
        games: Arc<dyn GameStore>,
        answers: Arc<dyn AnswerStore>,
        notifications: Notifications,
        core: Arc<GameCoreService>,
        policy: RetryPolicy,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            rooms,
            games,
            answers,
            notifications,
            core,
            policy,
            shutdown,
        }
    }

    /// Creates a game in a room on behalf of the owner.
    ///
    /// Steps run fail-fast: persist the game, attach it to the room,
    /// broadcast. A failure aborts the remaining steps.
    ///
    /// # Errors
    ///
    /// `NotFound` if the room is missing, `Forbidden` if the requester is
    /// not the owner, `Validation` for a zero question count, plus store
    /// and notification failures once retries are exhausted.
    pub async fn create_new_game(
        &self,
        room_id: Uuid,
        requester_id: Uuid,
        mode: GameMode,
        question_count: u32,
        question_duration_secs: u64,
        questions: Option<Vec<Question>>,
    ) -> AppResult<Game> {
        let mut room = self.load_room(room_id).await?;
        if room.owner_id != requester_id {
            return Err(AppError::forbidden("only the owner can create a game"));
        }
        if question_count == 0 {
            return Err(AppError::validation("question_count must be at least 1"));
        }

        let game = Game::new(
            room.id,
            mode,
            question_count,
            question_duration_secs,
            questions.unwrap_or_default(),
        );
        retry(self.policy, "game_store.add_game", || {
            self.games.add_game(&game)
        })
        .await?;

        room.game_ids.push(game.id);
        retry(self.policy, "room_store.update", || self.rooms.update(&room)).await?;

        self.notifications
            .publish(room.id, &RoomNotification::NewGameAdded { game: game.clone() })
            .await?;
        tracing::info!(game_id = %game.id, room_id = %room.id, "game created");
        Ok(game)
    }

    /// Starts the room's current game by detaching its tick loop.
    ///
    /// The loop runs as an independent background task; this call returns
    /// as soon as the task is spawned. A failure inside the detached loop
    /// is caught and logged, never surfaced to this caller — the caller
    /// was acknowledged that the game was scheduled, not that it finished.
    ///
    /// # Errors
    ///
    /// `NotFound` if the room or a startable game is missing, `Forbidden`
    /// if the requester is not the owner, `InvalidOperation` with fewer
    /// than two members.
    pub async fn start_new_game(&self, room_id: Uuid, requester_id: Uuid) -> AppResult<()> {
        let room = self.load_room(room_id).await?;
        if room.owner_id != requester_id {
            return Err(AppError::forbidden("only the owner can start the game"));
        }
        if room.players.len() < MIN_PLAYERS_TO_START {
            return Err(AppError::invalid_operation(
                "at least two players are needed to start",
            ));
        }
        let game = retry(self.policy, "room_store.get_current_game", || {
            self.rooms.get_current_game(room_id)
        })
        .await?
        .ok_or_else(|| AppError::not_found("room has no game to start"))?;

        let core = Arc::clone(&self.core);
        let cancel = self.shutdown.child_token();
        let game_id = game.id;
        tokio::spawn(async move {
            match core.run(game, cancel).await {
                Ok(finished) => {
                    tracing::info!(game_id = %finished.id, status = ?finished.status, "game loop exited");
                }
                Err(error) => {
                    tracing::error!(game_id = %game_id, error = %error, "game loop failed");
                }
            }
        });
        Ok(())
    }

    /// Records a player's answer. Pure pass-through to the answer store.
    ///
    /// # Errors
    ///
    /// Store failures once retries are exhausted.
    pub async fn submit_answer(
        &self,
        game_id: Uuid,
        question_id: Uuid,
        player_id: Uuid,
        value: AnswerValue,
    ) -> AppResult<()> {
        let answer = SubmittedAnswer { player_id, value };
        retry(self.policy, "answer_store.save_answer", || {
            self.answers.save_answer(game_id, question_id, &answer)
        })
        .await
    }

    /// Ends the session on behalf of the owner: broadcasts "return to
    /// room" and hands the room snapshot back.
    ///
    /// # Errors
    ///
    /// `NotFound` if the room is missing, `Forbidden` if the requester is
    /// not the owner, notification failures once retries are exhausted.
    pub async fn finish_game(&self, requester_id: Uuid, room_id: Uuid) -> AppResult<Room> {
        let room = self.load_room(room_id).await?;
        if room.owner_id != requester_id {
            return Err(AppError::forbidden("only the owner can finish the game"));
        }
        self.notifications
            .publish(room.id, &RoomNotification::ReturnToRoom { room: room.clone() })
            .await?;
        Ok(room)
    }

    async fn load_room(&self, room_id: Uuid) -> AppResult<Room> {
        retry(self.policy, "room_store.get_by_id", || {
            self.rooms.get_by_id(room_id)
        })
        .await?
        .ok_or_else(|| AppError::not_found(format!("room {room_id} does not exist")))
    }
}
