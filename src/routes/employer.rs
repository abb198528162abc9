use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Employer Router Module
pub fn employer_routes() -> Router<AppState> {
    Router::new()
        .route("/employer/dashboard", get(handlers::employer_dashboard))
        .route("/employer/login", get(handlers::employer_login))
}
