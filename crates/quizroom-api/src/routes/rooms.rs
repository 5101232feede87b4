//! Routes for room membership.
//!
//! Authentication is out of scope; callers identify themselves with a
//! `user_id` in the request body.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use quizroom_session::domain::room::{Privacy, Room};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct CreateRoomRequest {
    user_id: Uuid,
    privacy: Privacy,
    password: Option<String>,
    max_players: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct JoinRoomRequest {
    user_id: Uuid,
    password: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LeaveRoomRequest {
    user_id: Uuid,
}

#[derive(Debug, Deserialize)]
struct KickPlayerRequest {
    user_id: Uuid,
    player_id: Uuid,
}

#[derive(Debug, Deserialize)]
struct QuickRoomRequest {
    user_id: Uuid,
}

/// POST /
async fn create_room(
    State(state): State<AppState>,
    Json(request): Json<CreateRoomRequest>,
) -> Result<Json<Room>, ApiError> {
    let room = state
        .room_manager
        .create_room(
            request.user_id,
            request.privacy,
            request.password,
            request.max_players,
        )
        .await?;
    Ok(Json(room))
}

/// GET /{room_id}
async fn get_room(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
) -> Result<Json<Room>, ApiError> {
    let room = state.room_manager.get_room(room_id).await?;
    Ok(Json(room))
}

/// POST /{room_id}/join
async fn join_room(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
    Json(request): Json<JoinRoomRequest>,
) -> Result<Json<Room>, ApiError> {
    let room = state
        .room_manager
        .join_room(room_id, request.user_id, request.password.as_deref())
        .await?;
    Ok(Json(room))
}

/// POST /{room_id}/leave
async fn leave_room(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
    Json(request): Json<LeaveRoomRequest>,
) -> Result<StatusCode, ApiError> {
    state.room_manager.leave_room(room_id, request.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /{room_id}/kick
async fn kick_player(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
    Json(request): Json<KickPlayerRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .room_manager
        .kick_player(request.user_id, room_id, request.player_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /quick
async fn quick_room(
    State(state): State<AppState>,
    Json(request): Json<QuickRoomRequest>,
) -> Result<Json<Room>, ApiError> {
    let room = state
        .room_manager
        .find_or_create_quick_room(request.user_id)
        .await?;
    Ok(Json(room))
}

/// Returns the router for room membership.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_room))
        .route("/quick", post(quick_room))
        .route("/{room_id}", get(get_room))
        .route("/{room_id}/join", post(join_room))
        .route("/{room_id}/leave", post(leave_room))
        .route("/{room_id}/kick", post(kick_player))
}
