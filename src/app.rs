use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/check-in", post(handlers::check_in))
        .route("/check-out", post(handlers::check_out))
        .route("/topics", post(handlers::save_topics))
        .route("/api/today", get(handlers::get_today))
        .route("/api/history", get(handlers::get_history))
        .route("/api/entries/:key", get(handlers::get_entry))
        .route("/api/action", post(handlers::action))
        .with_state(state)
}
