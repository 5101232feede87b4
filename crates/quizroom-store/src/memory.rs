//! Map-backed implementations of the session ports.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use quizroom_core::error::{AppError, AppResult};
use quizroom_session::application::ports::{
    AnswerStore, GameStore, QuestionStore, RoomStore, UserDirectory,
};
use quizroom_session::domain::game::{Game, GameMode};
use quizroom_session::domain::question::{Question, SubmittedAnswer};
use quizroom_session::domain::room::{Privacy, Room, RoomStatus};
use quizroom_session::domain::score::Statistic;
use uuid::Uuid;

/// One store implementing every persistence port. Single-process only:
/// session ownership never crosses process boundaries, so there is no
/// durability or cross-process sharing here.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rooms: RwLock<HashMap<Uuid, Room>>,
    games: RwLock<HashMap<Uuid, Game>>,
    questions: RwLock<Vec<Question>>,
    answers: RwLock<HashMap<(Uuid, Uuid), Vec<SubmittedAnswer>>>,
    statistics: RwLock<HashMap<Uuid, Statistic>>,
    display_names: RwLock<HashMap<Uuid, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads questions into the bank.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn seed_questions(&self, questions: Vec<Question>) {
        self.questions.write().unwrap().extend(questions);
    }

    /// Registers a display name for a user. Users without one get a
    /// generated placeholder.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn set_display_name(&self, user_id: Uuid, name: &str) {
        self.display_names
            .write()
            .unwrap()
            .insert(user_id, name.to_owned());
    }

    /// Returns the last statistic saved for a game, if any.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn saved_statistic(&self, game_id: Uuid) -> Option<Statistic> {
        self.statistics.read().unwrap().get(&game_id).cloned()
    }
}

#[async_trait]
impl RoomStore for MemoryStore {
    async fn get_by_id(&self, room_id: Uuid) -> AppResult<Option<Room>> {
        Ok(self.rooms.read().unwrap().get(&room_id).cloned())
    }

    async fn get_waiting_public_rooms(&self) -> AppResult<Vec<Room>> {
        Ok(self
            .rooms
            .read()
            .unwrap()
            .values()
            .filter(|room| {
                room.privacy == Privacy::Public && room.status == RoomStatus::Available
            })
            .cloned()
            .collect())
    }

    async fn add(&self, room: &Room) -> AppResult<()> {
        self.rooms.write().unwrap().insert(room.id, room.clone());
        Ok(())
    }

    async fn update(&self, room: &Room) -> AppResult<()> {
        self.rooms.write().unwrap().insert(room.id, room.clone());
        Ok(())
    }

    async fn get_current_game(&self, room_id: Uuid) -> AppResult<Option<Game>> {
        let rooms = self.rooms.read().unwrap();
        let Some(room) = rooms.get(&room_id) else {
            return Ok(None);
        };
        let games = self.games.read().unwrap();
        Ok(room
            .game_ids
            .iter()
            .rev()
            .filter_map(|id| games.get(id))
            .find(|game| !game.is_finished())
            .cloned())
    }
}

#[async_trait]
impl GameStore for MemoryStore {
    async fn add_game(&self, game: &Game) -> AppResult<()> {
        self.games.write().unwrap().insert(game.id, game.clone());
        Ok(())
    }

    async fn get_game(&self, game_id: Uuid) -> AppResult<Option<Game>> {
        Ok(self.games.read().unwrap().get(&game_id).cloned())
    }

    async fn update_game(&self, game: &Game) -> AppResult<()> {
        // Upsert: a loop may persist a game the caller never stored, e.g.
        // in tests driving the loop directly.
        self.games.write().unwrap().insert(game.id, game.clone());
        Ok(())
    }

    async fn save_statistic(&self, game_id: Uuid, statistic: &Statistic) -> AppResult<()> {
        self.statistics
            .write()
            .unwrap()
            .insert(game_id, statistic.clone());
        Ok(())
    }
}

#[async_trait]
impl QuestionStore for MemoryStore {
    async fn get_unique_questions(&self, count: u32, mode: GameMode) -> AppResult<Vec<Question>> {
        let questions: Vec<Question> = self
            .questions
            .read()
            .unwrap()
            .iter()
            .filter(|q| q.mode == mode)
            .take(count as usize)
            .cloned()
            .collect();
        if questions.len() < count as usize {
            return Err(AppError::service_unavailable(format!(
                "question bank has only {} questions for mode {mode:?}, {count} requested",
                questions.len()
            )));
        }
        Ok(questions)
    }
}

#[async_trait]
impl AnswerStore for MemoryStore {
    async fn save_answer(
        &self,
        game_id: Uuid,
        question_id: Uuid,
        answer: &SubmittedAnswer,
    ) -> AppResult<()> {
        self.answers
            .write()
            .unwrap()
            .entry((game_id, question_id))
            .or_default()
            .push(*answer);
        Ok(())
    }

    async fn load_answers(
        &self,
        game_id: Uuid,
        question_id: Uuid,
    ) -> AppResult<Vec<SubmittedAnswer>> {
        Ok(self
            .answers
            .read()
            .unwrap()
            .get(&(game_id, question_id))
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl UserDirectory for MemoryStore {
    async fn display_name(&self, user_id: Uuid) -> AppResult<String> {
        Ok(self
            .display_names
            .read()
            .unwrap()
            .get(&user_id)
            .cloned()
            .unwrap_or_else(|| format!("Player {}", &user_id.simple().to_string()[..8])))
    }
}
