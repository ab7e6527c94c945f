//! Quizmaster API server entry point.

use std::sync::Arc;

use quizmaster_api::config::Config;
use quizmaster_api::error::AppError;
use quizmaster_api::routes;
use quizmaster_api::shell::spawn_completion_listener;
use quizmaster_api::state::AppState;
use quizmaster_core::clock::{Clock, SystemClock};
use quizmaster_core::content::QuizContentSource;
use quizmaster_ingest::application::ingestion::SimulatedUploadIngestion;
use quizmaster_invite::application::dispatch::SimulatedInvitationDispatch;
use quizmaster_quiz::application::content::{StaticQuizContent, YamlQuizContent};
use quizmaster_quiz::application::runtime::QuizRuntime;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Quizmaster API server");

    let config = Config::from_env()?;

    // Load the question bank up front so a broken bank fails startup.
    let content: Arc<dyn QuizContentSource> = match &config.question_bank_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "using YAML question bank");
            Arc::new(YamlQuizContent::new(path.clone()))
        }
        None => Arc::new(StaticQuizContent::general_knowledge()?),
    };
    let bank = content.load_bank().await?;
    tracing::info!(question_count = bank.len(), "question bank loaded");

    // Build application state.
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let runtime = QuizRuntime::new(clock.clone(), config.tick_interval);
    let app_state = AppState::new(
        clock.clone(),
        runtime.clone(),
        content,
        Arc::new(SimulatedUploadIngestion::new(config.upload_delay, bank)),
        Arc::new(SimulatedInvitationDispatch::new(config.invite_delay)),
        config.default_duration_seconds,
    );
    let listener_task = spawn_completion_listener(&runtime, app_state.shell.clone(), clock);

    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = routes::router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server.
    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    runtime.shutdown();
    listener_task.abort();
    tracing::info!("Quizmaster API server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
