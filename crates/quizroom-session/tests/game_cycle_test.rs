//! End-to-end session flow: room, players, game, full tick cycle.

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use quizroom_core::clock::Clock;
use quizroom_core::error::AppResult;
use quizroom_core::retry::RetryPolicy;
use quizroom_session::application::connections::ConnectionService;
use quizroom_session::application::game_loop::GameCoreService;
use quizroom_session::application::game_manager::GameManager;
use quizroom_session::application::notification::{Notifications, RoomNotification};
use quizroom_session::application::ports::GameStore;
use quizroom_session::application::room_manager::RoomManager;
use quizroom_session::domain::evaluation::ScoringConfig;
use quizroom_session::domain::game::{GameMode, GameStatus};
use quizroom_session::domain::question::{AnswerValue, Question};
use quizroom_session::domain::room::Privacy;
use quizroom_session::domain::score::Score;
use quizroom_store::MemoryStore;
use quizroom_test_support::{FixedClock, FlakyNotifier, RecordingNotifier, ZeroRandom};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

struct Stack {
    rooms: RoomManager,
    games: GameManager,
    store: Arc<MemoryStore>,
    notifier: Arc<RecordingNotifier>,
}

fn stack() -> Stack {
    let store = Arc::new(MemoryStore::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let clock: Arc<dyn Clock> = Arc::new(FixedClock::at(2026, 1, 15, 10, 0, 0));
    let notifications = Notifications::new(notifier.clone(), RetryPolicy::immediate(3));
    let policy = RetryPolicy::immediate(3);
    let core = Arc::new(GameCoreService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        notifications.clone(),
        clock.clone(),
        ScoringConfig::default(),
        policy,
    ));
    let rooms = RoomManager::new(
        store.clone(),
        store.clone(),
        Arc::new(ConnectionService::new()),
        notifications.clone(),
        clock,
        Box::new(ZeroRandom),
        policy,
    );
    let games = GameManager::new(
        store.clone(),
        store.clone(),
        store.clone(),
        notifications,
        core,
        policy,
        CancellationToken::new(),
    );
    Stack {
        rooms,
        games,
        store,
        notifier,
    }
}

fn timestamp_question(day_offset: i64) -> Question {
    let base = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
    Question {
        id: Uuid::new_v4(),
        correct_answer: AnswerValue::Timestamp(base + chrono::Duration::days(day_offset)),
        formulation: format!("What happened on day {day_offset}?"),
        image_ref: None,
        mode: GameMode::Default,
    }
}

async fn wait_until_finished(store: &MemoryStore, game_id: Uuid) -> AppResult<GameStatus> {
    for _ in 0..200 {
        if let Some(game) = store.get_game(game_id).await? {
            if game.status == GameStatus::Finished {
                return Ok(game.status);
            }
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    let game = store.get_game(game_id).await?;
    Ok(game.map_or(GameStatus::NotStarted, |g| g.status))
}

#[tokio::test]
async fn test_full_game_cycle_broadcasts_every_phase() {
    // Arrange: a room of four with two joined players.
    let stack = stack();
    let owner_id = Uuid::new_v4();
    let guest_id = Uuid::new_v4();
    let room = stack
        .rooms
        .create_room(owner_id, Privacy::Public, None, Some(4))
        .await
        .unwrap();
    stack.rooms.join_room(room.id, owner_id, None).await.unwrap();
    let joined = stack.rooms.join_room(room.id, guest_id, None).await.unwrap();
    let owner_player = joined.member_for_user(owner_id).unwrap().id;
    let guest_player = joined.member_for_user(guest_id).unwrap().id;

    // Three attached questions with zero duration.
    let questions = vec![
        timestamp_question(0),
        timestamp_question(5_000),
        timestamp_question(9_000),
    ];
    let game = stack
        .games
        .create_new_game(
            room.id,
            owner_id,
            GameMode::Default,
            3,
            0,
            Some(questions.clone()),
        )
        .await
        .unwrap();

    // Both players answer every question before the cycle runs.
    for question in &questions {
        stack
            .games
            .submit_answer(game.id, question.id, owner_player, question.correct_answer)
            .await
            .unwrap();
        stack
            .games
            .submit_answer(
                game.id,
                question.id,
                guest_player,
                AnswerValue::Timestamp(Utc.with_ymd_and_hms(2010, 1, 1, 0, 0, 0).unwrap()),
            )
            .await
            .unwrap();
    }

    // Act
    stack.games.start_new_game(room.id, owner_id).await.unwrap();
    let final_status = wait_until_finished(&stack.store, game.id).await.unwrap();

    // Assert
    assert_eq!(final_status, GameStatus::Finished);

    let sent = stack.notifier.sent();
    let asked = sent
        .iter()
        .filter(|(_, n)| matches!(n, RoomNotification::QuestionAsked { .. }))
        .count();
    let closed = sent
        .iter()
        .filter(|(_, n)| matches!(n, RoomNotification::QuestionClosed { .. }))
        .count();
    let leaderboards = sent
        .iter()
        .filter(|(_, n)| matches!(n, RoomNotification::LeaderboardUpdate { .. }))
        .count();
    assert_eq!(asked, 3);
    assert_eq!(closed, 3);
    // One delta and one cumulative snapshot per question.
    assert_eq!(leaderboards, 6);

    // The owner answered exactly and earns the maximum every round.
    let statistic = stack.store.saved_statistic(game.id).unwrap();
    assert_eq!(statistic.score(owner_player), Score(3 * 2222));
    assert!(statistic.score(guest_player) > Score(0));
    assert!(statistic.score(guest_player) < statistic.score(owner_player));
}

#[tokio::test]
async fn test_phases_stay_ordered_within_a_game() {
    // Arrange
    let stack = stack();
    let owner_id = Uuid::new_v4();
    let guest_id = Uuid::new_v4();
    let room = stack
        .rooms
        .create_room(owner_id, Privacy::Public, None, Some(4))
        .await
        .unwrap();
    stack.rooms.join_room(room.id, owner_id, None).await.unwrap();
    stack.rooms.join_room(room.id, guest_id, None).await.unwrap();
    let game = stack
        .games
        .create_new_game(
            room.id,
            owner_id,
            GameMode::Default,
            2,
            0,
            Some(vec![timestamp_question(0), timestamp_question(1_000)]),
        )
        .await
        .unwrap();

    // Act
    stack.games.start_new_game(room.id, owner_id).await.unwrap();
    wait_until_finished(&stack.store, game.id).await.unwrap();

    // Assert: per question, asked precedes closed precedes both
    // leaderboard broadcasts, with no interleaving across questions.
    let phases: Vec<&'static str> = stack
        .notifier
        .sent()
        .iter()
        .filter_map(|(_, n)| match n {
            RoomNotification::QuestionAsked { .. } => Some("asked"),
            RoomNotification::QuestionClosed { .. } => Some("closed"),
            RoomNotification::LeaderboardUpdate { .. } => Some("leaderboard"),
            _ => None,
        })
        .collect();
    assert_eq!(
        phases,
        vec![
            "asked",
            "closed",
            "leaderboard",
            "leaderboard",
            "asked",
            "closed",
            "leaderboard",
            "leaderboard",
        ]
    );
}

#[tokio::test]
async fn test_notification_delivery_survives_transient_transport_failures() {
    // Arrange
    let transport = Arc::new(FlakyNotifier::new(2));
    let notifications = Notifications::new(transport.clone(), RetryPolicy::immediate(3));
    let room_id = Uuid::new_v4();
    let notification = RoomNotification::PlayerLeft {
        player_id: Uuid::new_v4(),
        new_owner_id: Uuid::new_v4(),
    };

    // Act
    notifications.publish(room_id, &notification).await.unwrap();

    // Assert
    assert_eq!(transport.attempts(), 3);
    assert_eq!(transport.sent(), vec![(room_id, notification)]);
}
