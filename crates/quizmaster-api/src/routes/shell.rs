//! Shell state and participant listing.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use quizmaster_core::clock::Clock;
use serde::Serialize;

use crate::shell::{ShellState, TaskStatus, with_shell};
use crate::state::AppState;

/// A player shown in the participant list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Participant {
    /// Display name.
    pub name: String,
    /// Email address, for invited players.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Response body for GET /api/v1/participants.
#[derive(Debug, Serialize)]
pub struct ParticipantsResponse {
    /// The local player first, then the invited friend once an invite was
    /// sent.
    pub participants: Vec<Participant>,
}

/// Response body for GET /api/v1/shell.
#[derive(Debug, Serialize)]
pub struct ShellResponse {
    /// Upload, invite and completion banner state.
    #[serde(flatten)]
    pub state: ShellState,
    /// Whether the completion banner is currently showing.
    pub celebrating: bool,
}

/// GET /api/v1/participants
async fn list_participants(State(state): State<AppState>) -> Json<ParticipantsResponse> {
    let invited = with_shell(&state.shell, |shell| {
        shell
            .invite
            .as_ref()
            .filter(|invite| invite.status == TaskStatus::Done)
            .map(|invite| invite.email.clone())
    });

    let mut participants = vec![Participant {
        name: "You".to_owned(),
        email: None,
    }];
    if let Some(email) = invited {
        participants.push(Participant {
            name: "Invited Friend".to_owned(),
            email: Some(email),
        });
    }

    Json(ParticipantsResponse { participants })
}

/// GET /api/v1/shell
async fn get_shell(State(state): State<AppState>) -> Json<ShellResponse> {
    let now = state.clock.now();
    let (shell, celebrating) =
        with_shell(&state.shell, |shell| (shell.clone(), shell.is_celebrating(now)));
    Json(ShellResponse {
        state: shell,
        celebrating,
    })
}

/// Returns the router for shell state.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/participants", get(list_participants))
        .route("/api/v1/shell", get(get_shell))
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use quizmaster_quiz::application::query_handlers::CompletionSummary;
    use quizmaster_quiz::domain::events::CompletionReason;
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::routes::test_support::{json_body, test_app_state};
    use crate::shell::InviteTask;

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_participants_lists_only_local_player_by_default() {
        // Arrange
        let app = router().with_state(test_app_state());

        // Act
        let response = app.oneshot(get("/api/v1/participants")).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["participants"], serde_json::json!([{ "name": "You" }]));
    }

    #[tokio::test]
    async fn test_participants_includes_friend_once_invite_sent() {
        // Arrange
        let state = test_app_state();
        let now = state.clock.now();
        with_shell(&state.shell, |shell| {
            shell.invite = Some(InviteTask {
                email: "friend@example.com".into(),
                status: TaskStatus::Done,
                updated_at: now,
            });
        });
        let app = router().with_state(state);

        // Act
        let response = app.oneshot(get("/api/v1/participants")).await.unwrap();

        // Assert
        let json = json_body(response).await;
        let participants = json["participants"].as_array().unwrap();
        assert_eq!(participants.len(), 2);
        assert_eq!(participants[1]["name"], "Invited Friend");
        assert_eq!(participants[1]["email"], "friend@example.com");
    }

    #[tokio::test]
    async fn test_shell_reports_active_celebration() {
        // Arrange
        let state = test_app_state();
        let now = state.clock.now();
        let summary = CompletionSummary {
            reason: CompletionReason::AllAnswered,
            score: 5,
            question_count: 5,
        };
        with_shell(&state.shell, |shell| {
            shell.celebrate(Uuid::new_v4(), summary, now);
        });
        let app = router().with_state(state);

        // Act
        let response = app.oneshot(get("/api/v1/shell")).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["celebrating"], true);
        assert_eq!(
            json["celebration"]["message"],
            "Quiz Completed! Your score: 5 out of 5"
        );
        assert_eq!(json["celebration"]["summary"]["reason"], "all_answered");
        assert_eq!(json["upload"], serde_json::Value::Null);
    }
}
