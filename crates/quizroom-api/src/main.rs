//! Quizroom API server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use quizroom_core::clock::SystemClock;
use quizroom_core::random::SystemRandom;
use quizroom_core::retry::RetryPolicy;
use quizroom_session::application::connections::ConnectionService;
use quizroom_session::application::game_loop::GameCoreService;
use quizroom_session::application::game_manager::GameManager;
use quizroom_session::application::notification::Notifications;
use quizroom_session::application::room_manager::RoomManager;
use quizroom_session::domain::evaluation::ScoringConfig;
use quizroom_store::{BroadcastNotifier, MemoryStore};
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

mod error;
mod routes;
mod state;

use error::StartupError;

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Quizroom API server");

    // Read configuration from environment.
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .map_err(|e| StartupError::Config(format!("PORT must be a valid u16: {e}")))?;

    // Wire the single-process stack.
    let store = Arc::new(MemoryStore::new());
    let notifier = Arc::new(BroadcastNotifier::new());
    let clock = Arc::new(SystemClock);
    let policy = RetryPolicy::default();
    let notifications = Notifications::new(notifier.clone(), policy);
    let connections = Arc::new(ConnectionService::new());
    let shutdown = CancellationToken::new();

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
        connections,
        notifications.clone(),
        clock,
        Box::new(SystemRandom),
        policy,
    ));
    let game_manager = Arc::new(GameManager::new(
        store.clone(),
        store.clone(),
        store,
        notifications,
        core,
        policy,
        shutdown.clone(),
    ));
    let app_state = state::AppState::new(room_manager, game_manager);

    // Build router.
    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/rooms", routes::rooms::router())
        .nest("/api/v1/games", routes::games::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server.
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|e| StartupError::Config(format!("invalid HOST:PORT combination: {e}")))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received, cancelling running games");
            shutdown.cancel();
        })
        .await?;

    Ok(())
}
