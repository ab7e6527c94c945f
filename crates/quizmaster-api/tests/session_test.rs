//! Integration tests for the quiz session flow.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use serde_json::json;

/// `sample_bank` question `n` is answered correctly by option `n % 4`.
fn correct_option(question_number: u64) -> u64 {
    (question_number - 1) % 4
}

#[tokio::test]
async fn test_answering_all_five_correctly_scores_five() {
    let app = common::build_test_app();

    let (status, json) =
        common::post_json(app.router(), "/api/v1/session/start", &json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["question_count"], 5);

    let mut last = json;
    for _ in 0..5 {
        let number = last["question_number"].as_u64().unwrap();
        let (status, _) = common::post_json(
            app.router(),
            "/api/v1/session/select",
            &json!({ "option": correct_option(number) }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, json) =
            common::post_json(app.router(), "/api/v1/session/advance", &json!({})).await;
        assert_eq!(status, StatusCode::OK);
        last = json;
    }

    assert_eq!(last["status"], "completed");
    assert_eq!(last["score"], 5);
    assert_eq!(last["question"], serde_json::Value::Null);
    assert_eq!(last["completion"]["reason"], "all_answered");
    assert_eq!(last["completion"]["score"], 5);
    assert_eq!(last["completion"]["question_count"], 5);

    let (status, json) = common::get_json(app.router(), "/api/v1/session").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "completed");
    assert_eq!(app.state.runtime.countdown_session(), None);
}

#[tokio::test]
async fn test_out_of_range_option_returns_400_and_keeps_state() {
    let app = common::build_test_app();
    common::post_json(app.router(), "/api/v1/session/start", &json!({})).await;

    let (status, json) = common::post_json(
        app.router(),
        "/api/v1/session/select",
        &json!({ "option": 7 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "invalid_input");
    let (_, view) = common::get_json(app.router(), "/api/v1/session").await;
    assert_eq!(view["selected_option"], serde_json::Value::Null);
    assert_eq!(view["question_number"], 1);
}

#[tokio::test]
async fn test_advance_without_selection_returns_409() {
    let app = common::build_test_app();
    common::post_json(app.router(), "/api/v1/session/start", &json!({})).await;

    let (status, json) =
        common::post_json(app.router(), "/api/v1/session/advance", &json!({})).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "invalid_state");
}

#[tokio::test(start_paused = true)]
async fn test_countdown_times_out_session_and_raises_banner() {
    let app = common::build_test_app_with_tick(Duration::from_secs(1));

    let (status, json) = common::post_json(
        app.router(),
        "/api/v1/session/start",
        &json!({ "duration_seconds": 3 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["formatted_time"], "0:03");

    tokio::time::sleep(Duration::from_millis(3500)).await;

    let (_, view) = common::get_json(app.router(), "/api/v1/session").await;
    assert_eq!(view["status"], "completed");
    assert_eq!(view["seconds_remaining"], 0);
    assert_eq!(view["score"], 0);
    assert_eq!(view["question_number"], 1);
    assert_eq!(view["completion"]["reason"], "timed_out");

    let (_, shell) = common::get_json(app.router(), "/api/v1/shell").await;
    assert_eq!(shell["celebrating"], true);
    assert_eq!(
        shell["celebration"]["message"],
        "Quiz Completed! Your score: 0 out of 5"
    );
}

#[tokio::test(start_paused = true)]
async fn test_restart_replaces_previous_countdown() {
    let app = common::build_test_app_with_tick(Duration::from_secs(1));

    let (_, first) = common::post_json(
        app.router(),
        "/api/v1/session/start",
        &json!({ "duration_seconds": 10 }),
    )
    .await;
    tokio::time::sleep(Duration::from_millis(2500)).await;

    let (_, second) = common::post_json(
        app.router(),
        "/api/v1/session/start",
        &json!({ "duration_seconds": 10 }),
    )
    .await;
    tokio::time::sleep(Duration::from_millis(1500)).await;

    assert_ne!(first["session_id"], second["session_id"]);
    let (_, view) = common::get_json(app.router(), "/api/v1/session").await;
    assert_eq!(view["session_id"], second["session_id"]);
    assert_eq!(view["seconds_remaining"], 9);
}
