use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/count", get(handlers::get_count))
        .route("/api/remote", get(handlers::get_remote_count))
        .route("/api/reset", post(handlers::reset))
        .route("/api/info", get(handlers::get_info))
        .route("/api/display", get(handlers::get_display))
        .with_state(state)
}
