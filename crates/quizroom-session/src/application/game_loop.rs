//! The question-cycling tick loop.
//!
//! One running game is one invocation of [`GameCoreService::run`], executed
//! as a detached task. Phases within a game are strictly sequential:
//! open → wait → close → score, once per question, no pipelining. Loops for
//! different games share nothing but the collaborators behind the ports.

use std::sync::Arc;

use quizroom_core::clock::Clock;
use quizroom_core::error::AppResult;
use quizroom_core::retry::{RetryPolicy, retry};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::application::notification::{Notifications, RoomNotification};
use crate::application::ports::{AnswerStore, GameStore, QuestionStore};
use crate::domain::evaluation::{ScoringConfig, score_fn};
use crate::domain::game::Game;
use crate::domain::question::{AnswerValue, Question};
use crate::domain::score::Score;

/// Runs the timed question cycle for one game at a time.
pub struct GameCoreService {
    games: Arc<dyn GameStore>,
    questions: Arc<dyn QuestionStore>,
    answers: Arc<dyn AnswerStore>,
    notifications: Notifications,
    clock: Arc<dyn Clock>,
    scoring: ScoringConfig,
    policy: RetryPolicy,
}

impl GameCoreService {
    /// Creates the service over the given collaborators.
    #[must_use]
    pub fn new(
        games: Arc<dyn GameStore>,
        questions: Arc<dyn QuestionStore>,
        answers: Arc<dyn AnswerStore>,
        notifications: Notifications,
        clock: Arc<dyn Clock>,
        scoring: ScoringConfig,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            games,
            questions,
            answers,
            notifications,
            clock,
            scoring,
            policy,
        }
    }

    /// Runs the full question cycle for `game` and returns its final state.
    ///
    /// The game reaches `Finished` only if every question was processed
    /// without error; any terminal failure aborts the loop with the game
    /// left `InProgress` (or `NotStarted`, if the question set never
    /// resolved). Cancelling `cancel` stops the loop cooperatively at the
    /// next wait point and is not an error.
    ///
    /// # Errors
    ///
    /// Returns the first terminal failure from scoring setup, question
    /// resolution, answer loading, persistence, or notification delivery.
    pub async fn run(&self, mut game: Game, cancel: CancellationToken) -> AppResult<Game> {
        let score = score_fn(game.mode, self.scoring)?;

        if game.questions.is_empty() {
            // Attached and fetched question sets are never mixed.
            game.questions = retry(self.policy, "question_store.get_unique_questions", || {
                self.questions.get_unique_questions(game.question_count, game.mode)
            })
            .await?;
        }

        game.start()?;
        retry(self.policy, "game_store.update_game", || {
            self.games.update_game(&game)
        })
        .await?;
        tracing::info!(
            game_id = %game.id,
            room_id = %game.room_id,
            questions = game.questions.len(),
            "game started"
        );

        let questions = game.questions.clone();
        for question in &questions {
            self.open_question(&game, question).await?;

            let duration = game.question_duration();
            tokio::select! {
                () = cancel.cancelled() => {
                    tracing::info!(game_id = %game.id, "game cancelled mid-question");
                    return Ok(game);
                }
                () = tokio::time::sleep(duration) => {}
            }

            self.close_question(&game, question).await?;
            self.score_question(&mut game, question.id, &question.correct_answer, &score)
                .await?;
        }

        game.finish()?;
        retry(self.policy, "game_store.update_game", || {
            self.games.update_game(&game)
        })
        .await?;
        tracing::info!(game_id = %game.id, "game finished");
        Ok(game)
    }

    async fn open_question(&self, game: &Game, question: &Question) -> AppResult<()> {
        let duration = game.question_duration();
        self.notifications
            .publish(
                game.room_id,
                &RoomNotification::QuestionAsked {
                    question_id: question.id,
                    formulation: question.formulation.clone(),
                    image_ref: question.image_ref.clone(),
                    end_time: self.clock.deadline(duration),
                    duration_seconds: game.question_duration_secs,
                },
            )
            .await
    }

    async fn close_question(&self, game: &Game, question: &Question) -> AppResult<()> {
        self.notifications
            .publish(
                game.room_id,
                &RoomNotification::QuestionClosed {
                    question_id: question.id,
                    correct_answer: question.correct_answer,
                },
            )
            .await
    }

    async fn score_question<F>(
        &self,
        game: &mut Game,
        question_id: Uuid,
        correct_answer: &AnswerValue,
        score: &F,
    ) -> AppResult<()>
    where
        F: Fn(&AnswerValue, &AnswerValue) -> Score,
    {
        let submitted = retry(self.policy, "answer_store.load_answers", || {
            self.answers.load_answers(game.id, question_id)
        })
        .await?;

        let before = game.statistic.snapshot();
        game.statistic.update(&submitted, correct_answer, score);
        let delta = game.statistic.diff(&before);

        retry(self.policy, "game_store.save_statistic", || {
            self.games.save_statistic(game.id, &game.statistic)
        })
        .await?;

        self.notifications
            .publish(
                game.room_id,
                &RoomNotification::LeaderboardUpdate { statistic: delta },
            )
            .await?;
        self.notifications
            .publish(
                game.room_id,
                &RoomNotification::LeaderboardUpdate {
                    statistic: game.statistic.snapshot(),
                },
            )
            .await
    }
}
