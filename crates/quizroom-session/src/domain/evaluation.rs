//! Pure scoring functions, keyed by game mode.

use quizroom_core::error::{AppError, AppResult};

use super::game::GameMode;
use super::question::AnswerValue;
use super::score::Score;

/// Constants of the default-mode decay curve. Kept out of the algorithm so
/// deployments can tune the curve without touching its shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringConfig {
    /// Score awarded for an exact match.
    pub max_score: f64,
    /// Decay constant, in days.
    pub decay_days: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            max_score: 2222.0,
            decay_days: 10_000.0,
        }
    }
}

/// Returns the scoring function for `mode`.
///
/// The returned function is deterministic and side-effect free. For
/// [`GameMode::Default`] it scores `round(K · e^(−|Δdays| / τ))` over the
/// absolute day distance between the submitted and correct timestamps; equal
/// timestamps earn exactly `K`, and the score never increases as the
/// distance grows. A submitted answer of the wrong shape earns zero.
///
/// # Errors
///
/// Returns `Validation` for a mode with no registered scoring rule, rather
/// than degrading to some default curve.
pub fn score_fn(
    mode: GameMode,
    config: ScoringConfig,
) -> AppResult<impl Fn(&AnswerValue, &AnswerValue) -> Score> {
    match mode {
        GameMode::Default => Ok(move |submitted: &AnswerValue, correct: &AnswerValue| {
            timestamp_decay(submitted, correct, config)
        }),
        GameMode::TrueFalse => Err(AppError::validation(
            "no scoring rule registered for mode TrueFalse",
        )),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn timestamp_decay(submitted: &AnswerValue, correct: &AnswerValue, config: ScoringConfig) -> Score {
    match (submitted, correct) {
        (AnswerValue::Timestamp(submitted_at), AnswerValue::Timestamp(correct_at)) => {
            let delta_days =
                (*submitted_at - *correct_at).num_seconds().abs() as f64 / 86_400.0;
            Score((config.max_score * (-delta_days / config.decay_days).exp()).round() as i64)
        }
        _ => Score(0),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn at_day(day_offset: i64) -> AnswerValue {
        let base = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        AnswerValue::Timestamp(base + chrono::Duration::days(day_offset))
    }

    #[test]
    fn test_exact_timestamp_earns_max_score() {
        // Arrange
        let score = score_fn(GameMode::Default, ScoringConfig::default()).unwrap();

        // Act / Assert
        assert_eq!(score(&at_day(0), &at_day(0)), Score(2222));
    }

    #[test]
    fn test_score_decreases_with_day_distance() {
        // Arrange
        let score = score_fn(GameMode::Default, ScoringConfig::default()).unwrap();
        let correct = at_day(0);

        // Act
        let near = score(&at_day(2_000), &correct);
        let far = score(&at_day(10_000), &correct);
        let very_far = score(&at_day(40_000), &correct);

        // Assert
        assert!(near < Score(2222));
        assert!(far < near);
        assert!(very_far < far);
    }

    #[test]
    fn test_distance_is_symmetric() {
        // Arrange
        let score = score_fn(GameMode::Default, ScoringConfig::default()).unwrap();

        // Act / Assert
        assert_eq!(
            score(&at_day(5_000), &at_day(0)),
            score(&at_day(0), &at_day(5_000))
        );
    }

    #[test]
    fn test_mismatched_answer_shape_earns_zero() {
        // Arrange
        let score = score_fn(GameMode::Default, ScoringConfig::default()).unwrap();

        // Act / Assert
        assert_eq!(score(&AnswerValue::Boolean(true), &at_day(0)), Score(0));
    }

    #[test]
    fn test_unsupported_mode_fails_fast() {
        // Act
        let result = score_fn(GameMode::TrueFalse, ScoringConfig::default());

        // Assert
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
