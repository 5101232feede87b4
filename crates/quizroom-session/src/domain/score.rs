//! Score and per-game statistic value types.

use std::collections::HashMap;
use std::ops::{Add, AddAssign, Sub};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::question::{AnswerValue, SubmittedAnswer};

/// A player's score, cumulative or as a delta.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Score(pub i64);

impl Add for Score {
    type Output = Score;

    fn add(self, rhs: Score) -> Score {
        Score(self.0 + rhs.0)
    }
}

impl AddAssign for Score {
    fn add_assign(&mut self, rhs: Score) {
        self.0 += rhs.0;
    }
}

impl Sub for Score {
    type Output = Score;

    fn sub(self, rhs: Score) -> Score {
        Score(self.0 - rhs.0)
    }
}

/// Cumulative per-player score state for one game. Keys are unique player
/// identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Statistic {
    scores: HashMap<Uuid, Score>,
}

impl Statistic {
    /// Creates an empty statistic.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the score for a player, zero if the player never scored.
    #[must_use]
    pub fn score(&self, player_id: Uuid) -> Score {
        self.scores.get(&player_id).copied().unwrap_or_default()
    }

    /// Number of players with an entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Whether no player has an entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Scores every submitted answer against `correct_answer` and **adds**
    /// the result to the player's cumulative score, inserting the player if
    /// absent. Accumulation across rounds, never a replace.
    pub fn update<F>(&mut self, answers: &[SubmittedAnswer], correct_answer: &AnswerValue, score_fn: F)
    where
        F: Fn(&AnswerValue, &AnswerValue) -> Score,
    {
        for answer in answers {
            let earned = score_fn(&answer.value, correct_answer);
            *self.scores.entry(answer.player_id).or_default() += earned;
        }
    }

    /// Element-wise `self − other` over the union of player keys, treating
    /// an absent key as zero.
    #[must_use]
    pub fn diff(&self, other: &Statistic) -> Statistic {
        let mut scores = HashMap::new();
        for &player_id in self.scores.keys().chain(other.scores.keys()) {
            scores
                .entry(player_id)
                .or_insert_with(|| self.score(player_id) - other.score(player_id));
        }
        Statistic { scores }
    }

    /// Independent deep copy; later mutation of `self` never affects it.
    #[must_use]
    pub fn snapshot(&self) -> Statistic {
        self.clone()
    }
}
