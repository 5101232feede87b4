//! Routes for game lifecycle.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use quizroom_session::domain::game::{Game, GameMode};
use quizroom_session::domain::question::{AnswerValue, Question};
use quizroom_session::domain::room::Room;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct CreateGameRequest {
    room_id: Uuid,
    user_id: Uuid,
    mode: GameMode,
    question_count: u32,
    question_duration_secs: u64,
    questions: Option<Vec<Question>>,
}

#[derive(Debug, Deserialize)]
struct StartGameRequest {
    room_id: Uuid,
    user_id: Uuid,
}

#[derive(Debug, Deserialize)]
struct SubmitAnswerRequest {
    game_id: Uuid,
    question_id: Uuid,
    player_id: Uuid,
    answer: AnswerValue,
}

#[derive(Debug, Deserialize)]
struct FinishGameRequest {
    room_id: Uuid,
    user_id: Uuid,
}

/// POST /
async fn create_game(
    State(state): State<AppState>,
    Json(request): Json<CreateGameRequest>,
) -> Result<Json<Game>, ApiError> {
    let game = state
        .game_manager
        .create_new_game(
            request.room_id,
            request.user_id,
            request.mode,
            request.question_count,
            request.question_duration_secs,
            request.questions,
        )
        .await?;
    Ok(Json(game))
}

/// POST /start — acknowledges that the game was scheduled, not that it
/// completed; the tick loop runs detached.
async fn start_game(
    State(state): State<AppState>,
    Json(request): Json<StartGameRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .game_manager
        .start_new_game(request.room_id, request.user_id)
        .await?;
    Ok(StatusCode::ACCEPTED)
}

/// POST /answers
async fn submit_answer(
    State(state): State<AppState>,
    Json(request): Json<SubmitAnswerRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .game_manager
        .submit_answer(
            request.game_id,
            request.question_id,
            request.player_id,
            request.answer,
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /finish
async fn finish_game(
    State(state): State<AppState>,
    Json(request): Json<FinishGameRequest>,
) -> Result<Json<Room>, ApiError> {
    let room = state
        .game_manager
        .finish_game(request.user_id, request.room_id)
        .await?;
    Ok(Json(room))
}

/// Returns the router for game lifecycle.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_game))
        .route("/start", post(start_game))
        .route("/answers", post(submit_answer))
        .route("/finish", post(finish_game))
}
