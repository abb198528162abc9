use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Worker Router Module
pub fn worker_routes() -> Router<AppState> {
    Router::new()
        .route("/worker/dashboard", get(handlers::worker_dashboard))
        .route("/worker/login", get(handlers::worker_login))
}
