//! Mock collaborator implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use quizroom_core::error::{AppError, AppResult};
use quizroom_session::application::notification::RoomNotification;
use quizroom_session::application::ports::{AnswerStore, QuestionStore, RoomNotifier};
use quizroom_session::domain::game::GameMode;
use quizroom_session::domain::question::{Question, SubmittedAnswer};
use uuid::Uuid;

/// A notification transport that records every broadcast and always
/// succeeds.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(Uuid, RoomNotification)>>,
}

impl RecordingNotifier {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of every `(room_id, notification)` broadcast so
    /// far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn sent(&self) -> Vec<(Uuid, RoomNotification)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl RoomNotifier for RecordingNotifier {
    async fn notify_room(&self, room_id: Uuid, notification: &RoomNotification) -> AppResult<()> {
        self.sent
            .lock()
            .unwrap()
            .push((room_id, notification.clone()));
        Ok(())
    }
}

/// A notification transport that fails a configured number of times before
/// delivering. Used to exercise the retry combinator end to end.
#[derive(Debug)]
pub struct FlakyNotifier {
    remaining_failures: Mutex<u32>,
    attempts: Mutex<u32>,
    sent: Mutex<Vec<(Uuid, RoomNotification)>>,
}

impl FlakyNotifier {
    /// Creates a transport whose first `failures` calls fail transiently.
    #[must_use]
    pub fn new(failures: u32) -> Self {
        Self {
            remaining_failures: Mutex::new(failures),
            attempts: Mutex::new(0),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Total calls observed, failed and delivered.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        *self.attempts.lock().unwrap()
    }

    /// Delivered broadcasts, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn sent(&self) -> Vec<(Uuid, RoomNotification)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl RoomNotifier for FlakyNotifier {
    async fn notify_room(&self, room_id: Uuid, notification: &RoomNotification) -> AppResult<()> {
        *self.attempts.lock().unwrap() += 1;
        let mut remaining = self.remaining_failures.lock().unwrap();
        if *remaining > 0 {
            *remaining -= 1;
            return Err(AppError::external_service("transport glitch"));
        }
        self.sent
            .lock()
            .unwrap()
            .push((room_id, notification.clone()));
        Ok(())
    }
}

/// An answer store that always fails. Used to prove a tick loop whose
/// answer load fails never finishes the game.
#[derive(Debug)]
pub struct FailingAnswerStore;

#[async_trait]
impl AnswerStore for FailingAnswerStore {
    async fn save_answer(
        &self,
        _game_id: Uuid,
        _question_id: Uuid,
        _answer: &SubmittedAnswer,
    ) -> AppResult<()> {
        Err(AppError::external_service("connection refused"))
    }

    async fn load_answers(
        &self,
        _game_id: Uuid,
        _question_id: Uuid,
    ) -> AppResult<Vec<SubmittedAnswer>> {
        Err(AppError::external_service("connection refused"))
    }
}

/// A question bank that always fails.
#[derive(Debug)]
pub struct FailingQuestionStore;

#[async_trait]
impl QuestionStore for FailingQuestionStore {
    async fn get_unique_questions(
        &self,
        _count: u32,
        _mode: GameMode,
    ) -> AppResult<Vec<Question>> {
        Err(AppError::external_service("connection refused"))
    }
}
