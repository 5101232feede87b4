//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use quizroom_core::clock::Clock;
use quizroom_core::retry::RetryPolicy;
use quizroom_session::application::connections::ConnectionService;
use quizroom_session::application::game_loop::GameCoreService;
use quizroom_session::application::game_manager::GameManager;
use quizroom_session::application::notification::Notifications;
use quizroom_session::application::room_manager::RoomManager;
use quizroom_session::domain::evaluation::ScoringConfig;
use quizroom_store::{BroadcastNotifier, MemoryStore};
use quizroom_test_support::{FixedClock, ZeroRandom};
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use quizroom_api::routes;
use quizroom_api::state::AppState;

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock::at(2026, 1, 15, 10, 0, 0))
}

/// Build the full app router over an in-memory store with a deterministic
/// clock and random source. Uses the same route structure as `main.rs`.
/// Returns the store so tests can seed and inspect state directly.
pub fn build_test_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let notifier = Arc::new(BroadcastNotifier::new());
    let clock = fixed_clock();
    let policy = RetryPolicy::immediate(3);
    let notifications = Notifications::new(notifier, policy);

    let core = Arc::new(GameCoreService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        notifications.clone(),
        clock.clone(),
        ScoringConfig::default(),
        policy,
    ));
    let room_manager = Arc::new(RoomManager::new(
        store.clone(),
        store.clone(),
        Arc::new(ConnectionService::new()),
        notifications.clone(),
        clock,
        Box::new(ZeroRandom),
        policy,
    ));
    let game_manager = Arc::new(GameManager::new(
        store.clone(),
        store.clone(),
        store.clone(),
        notifications,
        core,
        policy,
        CancellationToken::new(),
    ));
    let app_state = AppState::new(room_manager, game_manager);

    let app = Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/rooms", routes::rooms::router())
        .nest("/api/v1/games", routes::games::router())
        .with_state(app_state);

    (app, store)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = if body_bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
