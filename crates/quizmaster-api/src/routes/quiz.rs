//! Quiz content retrieval.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use quizmaster_core::question::QuestionBank;
use serde::Serialize;
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::state::AppState;

/// Response body for GET /api/v1/quiz.
#[derive(Debug, Serialize)]
pub struct QuizResponse {
    /// Always `true`.
    pub success: bool,
    /// The questions, answer keys included.
    pub quiz: QuestionBank,
}

/// GET /api/v1/quiz
#[instrument(skip(state))]
async fn get_quiz(State(state): State<AppState>) -> Result<Json<QuizResponse>, ApiError> {
    let quiz = state.content.load_bank().await?;
    info!(question_count = quiz.len(), "serving quiz content");
    Ok(Json(QuizResponse {
        success: true,
        quiz,
    }))
}

/// Returns the router for quiz content.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/v1/quiz", get(get_quiz))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use quizmaster_test_support::{
        FailingQuizContent, InstantUploadIngestion, RecordingInvitationDispatch, sample_bank,
    };
    use tower::ServiceExt;

    use crate::routes::test_support::{app_state_with, json_body, test_app_state};

    fn get_request() -> Request<Body> {
        Request::builder()
            .uri("/api/v1/quiz")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_get_quiz_returns_questions_with_answer_keys() {
        // Arrange
        let app = router().with_state(test_app_state());

        // Act
        let response = app.oneshot(get_request()).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["success"], true);
        let quiz = json["quiz"].as_array().unwrap();
        assert_eq!(quiz.len(), 5);
        assert_eq!(quiz[0]["text"], "Sample question 1?");
        assert_eq!(quiz[0]["options"].as_array().unwrap().len(), 4);
        assert_eq!(quiz[1]["correct_option"], 1);
    }

    #[tokio::test]
    async fn test_get_quiz_returns_500_when_content_source_fails() {
        // Arrange
        let state = app_state_with(
            Arc::new(FailingQuizContent),
            Arc::new(InstantUploadIngestion::new(sample_bank(1))),
            Arc::new(RecordingInvitationDispatch::new()),
        );
        let app = router().with_state(state);

        // Act
        let response = app.oneshot(get_request()).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = json_body(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "infrastructure_error");
    }
}
