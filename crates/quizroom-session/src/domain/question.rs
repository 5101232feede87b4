//! Question and answer value types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::game::GameMode;

/// The answer to a question, submitted or correct.
///
/// A tagged sum type: every consumer matches exhaustively, and the scoring
/// and serialization boundaries never see an untyped discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AnswerValue {
    /// A point in time, e.g. "when did this happen?".
    Timestamp(DateTime<Utc>),
    /// A true/false judgment.
    Boolean(bool),
}

/// A quiz question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Question identifier.
    pub id: Uuid,
    /// The correct answer.
    pub correct_answer: AnswerValue,
    /// The question text shown to players.
    pub formulation: String,
    /// Optional reference to an illustration.
    pub image_ref: Option<String>,
    /// Game mode this question belongs to.
    pub mode: GameMode,
}

/// An answer a player submitted for one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedAnswer {
    /// The submitting player.
    pub player_id: Uuid,
    /// The submitted value.
    pub value: AnswerValue,
}
