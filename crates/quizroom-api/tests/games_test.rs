//! Integration tests for game lifecycle routes.

mod common;

use axum::Router;
use axum::http::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

/// Creates a room and joins both users, returning the room id.
async fn room_with_two_members(app: &Router, owner_id: Uuid, other_id: Uuid) -> String {
    let (_, room) = common::post_json(
        app.clone(),
        "/api/v1/rooms",
        &json!({ "user_id": owner_id, "privacy": "Public" }),
    )
    .await;
    let room_id = room["id"].as_str().unwrap().to_owned();
    common::post_json(
        app.clone(),
        &format!("/api/v1/rooms/{room_id}/join"),
        &json!({ "user_id": owner_id }),
    )
    .await;
    common::post_json(
        app.clone(),
        &format!("/api/v1/rooms/{room_id}/join"),
        &json!({ "user_id": other_id }),
    )
    .await;
    room_id
}

fn question_json() -> Value {
    json!({
        "id": Uuid::new_v4(),
        "correct_answer": { "kind": "timestamp", "value": "1969-07-20T20:17:00Z" },
        "formulation": "When did Apollo 11 land on the Moon?",
        "image_ref": null,
        "mode": "Default"
    })
}

#[tokio::test]
async fn test_create_game_by_non_owner_returns_403() {
    let (app, _store) = common::build_test_app();
    let owner_id = Uuid::new_v4();
    let room_id = room_with_two_members(&app, owner_id, Uuid::new_v4()).await;

    let (status, body) = common::post_json(
        app,
        "/api/v1/games",
        &json!({
            "room_id": room_id,
            "user_id": Uuid::new_v4(),
            "mode": "Default",
            "question_count": 3,
            "question_duration_secs": 30
        }),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "forbidden");
}

#[tokio::test]
async fn test_create_game_with_zero_questions_returns_400() {
    let (app, _store) = common::build_test_app();
    let owner_id = Uuid::new_v4();
    let room_id = room_with_two_members(&app, owner_id, Uuid::new_v4()).await;

    let (status, body) = common::post_json(
        app,
        "/api/v1/games",
        &json!({
            "room_id": room_id,
            "user_id": owner_id,
            "mode": "Default",
            "question_count": 0,
            "question_duration_secs": 30
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_create_and_start_game_is_accepted() {
    let (app, _store) = common::build_test_app();
    let owner_id = Uuid::new_v4();
    let room_id = room_with_two_members(&app, owner_id, Uuid::new_v4()).await;

    let (status, game) = common::post_json(
        app.clone(),
        "/api/v1/games",
        &json!({
            "room_id": room_id,
            "user_id": owner_id,
            "mode": "Default",
            "question_count": 1,
            "question_duration_secs": 0,
            "questions": [question_json()]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(game["status"], "NotStarted");
    assert_eq!(game["room_id"], room_id);

    let (status, _) = common::post_json(
        app,
        "/api/v1/games/start",
        &json!({ "room_id": room_id, "user_id": owner_id }),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);
}

#[tokio::test]
async fn test_start_with_one_member_returns_409() {
    let (app, _store) = common::build_test_app();
    let owner_id = Uuid::new_v4();

    let (_, room) = common::post_json(
        app.clone(),
        "/api/v1/rooms",
        &json!({ "user_id": owner_id, "privacy": "Public" }),
    )
    .await;
    let room_id = room["id"].as_str().unwrap();
    common::post_json(
        app.clone(),
        &format!("/api/v1/rooms/{room_id}/join"),
        &json!({ "user_id": owner_id }),
    )
    .await;
    common::post_json(
        app.clone(),
        "/api/v1/games",
        &json!({
            "room_id": room_id,
            "user_id": owner_id,
            "mode": "Default",
            "question_count": 1,
            "question_duration_secs": 30,
            "questions": [question_json()]
        }),
    )
    .await;

    let (status, body) = common::post_json(
        app,
        "/api/v1/games/start",
        &json!({ "room_id": room_id, "user_id": owner_id }),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "invalid_operation");
}

#[tokio::test]
async fn test_start_without_a_game_returns_404() {
    let (app, _store) = common::build_test_app();
    let owner_id = Uuid::new_v4();
    let room_id = room_with_two_members(&app, owner_id, Uuid::new_v4()).await;

    let (status, body) = common::post_json(
        app,
        "/api/v1/games/start",
        &json!({ "room_id": room_id, "user_id": owner_id }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_submit_answer_returns_204() {
    let (app, _store) = common::build_test_app();

    let (status, body) = common::post_json(
        app,
        "/api/v1/games/answers",
        &json!({
            "game_id": Uuid::new_v4(),
            "question_id": Uuid::new_v4(),
            "player_id": Uuid::new_v4(),
            "answer": { "kind": "boolean", "value": true }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn test_finish_game_returns_room_snapshot() {
    let (app, _store) = common::build_test_app();
    let owner_id = Uuid::new_v4();
    let room_id = room_with_two_members(&app, owner_id, Uuid::new_v4()).await;

    let (status, room) = common::post_json(
        app,
        "/api/v1/games/finish",
        &json!({ "room_id": room_id, "user_id": owner_id }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(room["id"], room_id);
    assert_eq!(room["players"].as_array().unwrap().len(), 2);
}
