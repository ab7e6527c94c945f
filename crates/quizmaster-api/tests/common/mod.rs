//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use quizmaster_core::clock::Clock;
use quizmaster_quiz::application::content::StaticQuizContent;
use quizmaster_quiz::application::runtime::QuizRuntime;
use quizmaster_test_support::{
    FixedClock, InstantUploadIngestion, RecordingInvitationDispatch, sample_bank,
};
use tower::ServiceExt;

use quizmaster_api::routes;
use quizmaster_api::state::AppState;

/// Ticks far enough apart that no countdown fires during a test.
const QUIET_TICK: Duration = Duration::from_secs(3600);

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    ))
}

/// Handles to the doubles behind a test app.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub ingestion: Arc<InstantUploadIngestion>,
    pub invitations: Arc<RecordingInvitationDispatch>,
}

impl TestApp {
    /// A fresh clone of the router, ready for `oneshot`.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Build the full app with a five-question content bank, a three-question
/// upload bank and recording collaborators. Uses the same route structure as
/// `main.rs`.
pub fn build_test_app() -> TestApp {
    build_test_app_with_tick(QUIET_TICK)
}

/// Like [`build_test_app`], with a custom countdown tick interval.
pub fn build_test_app_with_tick(tick_interval: Duration) -> TestApp {
    let clock = fixed_clock();
    let runtime = QuizRuntime::new(clock.clone(), tick_interval);
    let ingestion = Arc::new(InstantUploadIngestion::new(sample_bank(3)));
    let invitations = Arc::new(RecordingInvitationDispatch::new());
    let state = AppState::new(
        clock.clone(),
        runtime.clone(),
        Arc::new(StaticQuizContent::new(sample_bank(5))),
        ingestion.clone(),
        invitations.clone(),
        300,
    );
    quizmaster_api::shell::spawn_completion_listener(&runtime, state.shell.clone(), clock);

    TestApp {
        router: routes::router().with_state(state.clone()),
        state,
        ingestion,
        invitations,
    }
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
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

    send(app, request).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Send a multipart POST with one file part named `field`.
pub async fn post_file(
    app: Router,
    uri: &str,
    field: &str,
    file_name: &str,
    contents: &[u8],
) -> (StatusCode, serde_json::Value) {
    const BOUNDARY: &str = "quizmaster-integration-boundary";

    let mut body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; \
         filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();

    send(app, request).await
}
