//! Shared application state.

use std::sync::Arc;

use quizroom_session::application::game_manager::GameManager;
use quizroom_session::application::room_manager::RoomManager;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Room membership orchestration.
    pub room_manager: Arc<RoomManager>,
    /// Game lifecycle orchestration.
    pub game_manager: Arc<GameManager>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(room_manager: Arc<RoomManager>, game_manager: Arc<GameManager>) -> Self {
        Self {
            room_manager,
            game_manager,
        }
    }
}
