pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/generate/interpretation",
            post(handlers::handle_interpretation),
        )
        .route("/api/v1/generate/poem", post(handlers::handle_poem))
        .route("/api/v1/generate/story", post(handlers::handle_story))
        .route("/api/v1/generate/stories", post(handlers::handle_stories))
        .route("/api/v1/generate/poetry", post(handlers::handle_poetry))
        .route("/api/v1/generate/context", post(handlers::handle_context))
        .route("/api/v1/generate/imagery", post(handlers::handle_imagery))
        .route("/api/v1/generate/verse", post(handlers::handle_verse))
        .route("/api/v1/chat", post(handlers::handle_chat))
        .with_state(state)
}
