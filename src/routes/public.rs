use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Public Router Module
///
/// Endpoints reachable without a session. The job board handlers only ever return
/// open postings.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Liveness probe for load balancers.
        .route("/health", get(|| async { "ok" }))
        // GET /jobs?search=...
        .route("/jobs", get(handlers::list_jobs))
        // GET /jobs/{id}
        .route("/jobs/{id}", get(handlers::get_job))
}
