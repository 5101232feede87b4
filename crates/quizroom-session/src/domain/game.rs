//! Game entity and its status state machine.

use std::time::Duration;

use quizroom_core::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::question::Question;
use super::score::Statistic;

/// Scoring mode of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// Timestamp questions scored by exponential decay over day distance.
    Default,
    /// True/false questions. No scoring rule is registered for this mode
    /// yet; the evaluation service rejects it.
    TrueFalse,
}

/// Game lifecycle state. Transitions are monotonic:
/// `NotStarted → InProgress → Finished`, never backward, never skipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Created but not yet started.
    NotStarted,
    /// The tick loop is running.
    InProgress,
    /// Every question was processed without error.
    Finished,
}

/// One timed run of N questions within a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    /// Game identifier.
    pub id: Uuid,
    /// Owning room.
    pub room_id: Uuid,
    /// Scoring mode.
    pub mode: GameMode,
    /// Lifecycle state.
    pub status: GameStatus,
    /// Number of questions to play.
    pub question_count: u32,
    /// Seconds each question stays open.
    pub question_duration_secs: u64,
    /// Question list; empty until resolved by the tick loop unless the
    /// creator attached questions up front.
    pub questions: Vec<Question>,
    /// Cumulative per-player scores for this game.
    pub statistic: Statistic,
}

impl Game {
    /// Creates a game in `NotStarted` state.
    #[must_use]
    pub fn new(
        room_id: Uuid,
        mode: GameMode,
        question_count: u32,
        question_duration_secs: u64,
        questions: Vec<Question>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            room_id,
            mode,
            status: GameStatus::NotStarted,
            question_count,
            question_duration_secs,
            questions,
            statistic: Statistic::new(),
        }
    }

    /// How long each question stays open.
    #[must_use]
    pub fn question_duration(&self) -> Duration {
        Duration::from_secs(self.question_duration_secs)
    }

    /// Whether the game has finished.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.status == GameStatus::Finished
    }

    /// Moves `NotStarted → InProgress`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` from any other state.
    pub fn start(&mut self) -> AppResult<()> {
        if self.status != GameStatus::NotStarted {
            return Err(AppError::invalid_operation(format!(
                "game cannot start from {:?}",
                self.status
            )));
        }
        self.status = GameStatus::InProgress;
        Ok(())
    }

    /// Moves `InProgress → Finished`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` from any other state; in particular a
    /// game can never finish without having been in progress.
    pub fn finish(&mut self) -> AppResult<()> {
        if self.status != GameStatus::InProgress {
            return Err(AppError::invalid_operation(format!(
                "game cannot finish from {:?}",
                self.status
            )));
        }
        self.status = GameStatus::Finished;
        Ok(())
    }
}
