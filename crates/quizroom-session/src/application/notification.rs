//! Room notification payloads and the retrying publisher.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use quizroom_core::error::AppResult;
use quizroom_core::retry::{RetryPolicy, retry};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::ports::RoomNotifier;
use crate::domain::game::Game;
use crate::domain::question::AnswerValue;
use crate::domain::room::Room;
use crate::domain::score::Statistic;

/// A payload broadcast to a room's subscriber group.
///
/// The tag is the transport method name; the fields are the wire shape the
/// client sees. Delivery is at-least-once, so clients must treat repeated
/// payloads as idempotent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "camelCase")]
pub enum RoomNotification {
    /// A player joined the room.
    #[serde(rename_all = "camelCase")]
    NewPlayerEntered {
        /// The new membership's identifier.
        player_id: Uuid,
        /// Display name resolved from the user directory.
        player_name: String,
    },

    /// A player left the room (or was kicked).
    #[serde(rename_all = "camelCase")]
    PlayerLeft {
        /// The removed membership's identifier.
        player_id: Uuid,
        /// The room owner after the departure.
        new_owner_id: Uuid,
    },

    /// A game was created in the room.
    #[serde(rename_all = "camelCase")]
    NewGameAdded {
        /// Snapshot of the created game.
        game: Game,
    },

    /// The owner ended the session; clients should show the room again.
    #[serde(rename_all = "camelCase")]
    ReturnToRoom {
        /// Snapshot of the room.
        room: Room,
    },

    /// A question is open for answers.
    #[serde(rename_all = "camelCase")]
    QuestionAsked {
        /// The question being asked.
        question_id: Uuid,
        /// The question text.
        formulation: String,
        /// Optional illustration reference.
        image_ref: Option<String>,
        /// When the question closes.
        end_time: DateTime<Utc>,
        /// How long the question stays open.
        duration_seconds: u64,
    },

    /// The question closed; the correct answer is revealed.
    #[serde(rename_all = "camelCase")]
    QuestionClosed {
        /// The question that closed.
        question_id: Uuid,
        /// The correct answer.
        correct_answer: AnswerValue,
    },

    /// Leaderboard state. Broadcast twice per question: once with the
    /// round's delta, once with the cumulative snapshot.
    #[serde(rename_all = "camelCase")]
    LeaderboardUpdate {
        /// The statistic being published.
        statistic: Statistic,
    },
}

/// Publisher that wraps the notification transport in the bounded retry
/// combinator. Cheap to clone; every service that broadcasts holds one.
#[derive(Clone)]
pub struct Notifications {
    transport: Arc<dyn RoomNotifier>,
    policy: RetryPolicy,
}

impl Notifications {
    /// Creates a publisher over `transport` with the given retry policy.
    #[must_use]
    pub fn new(transport: Arc<dyn RoomNotifier>, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    /// Broadcasts `notification` to `room_id`, retrying transient transport
    /// failures per the policy.
    ///
    /// # Errors
    ///
    /// Returns the transport error once retries are exhausted.
    pub async fn publish(&self, room_id: Uuid, notification: &RoomNotification) -> AppResult<()> {
        retry(self.policy, "notify_room", || {
            self.transport.notify_room(room_id, notification)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_payload_serializes_with_method_tag() {
        // Arrange
        let notification = RoomNotification::QuestionAsked {
            question_id: Uuid::nil(),
            formulation: "When did the Berlin Wall fall?".to_owned(),
            image_ref: None,
            end_time: Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 30).unwrap(),
            duration_seconds: 30,
        };

        // Act
        let json = serde_json::to_value(&notification).unwrap();

        // Assert
        assert_eq!(json["method"], "questionAsked");
        assert_eq!(json["durationSeconds"], 30);
        assert_eq!(json["questionId"], Uuid::nil().to_string());
    }

    #[test]
    fn test_answer_payload_round_trips() {
        // Arrange
        let notification = RoomNotification::QuestionClosed {
            question_id: Uuid::new_v4(),
            correct_answer: AnswerValue::Boolean(true),
        };

        // Act
        let json = serde_json::to_string(&notification).unwrap();
        let back: RoomNotification = serde_json::from_str(&json).unwrap();

        // Assert
        assert_eq!(back, notification);
    }
}
