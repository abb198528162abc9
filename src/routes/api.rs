use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// API Router Module
///
/// Nested under `/api`. The gate classifies all of it as public, so every handler
/// here takes `AuthUser` (401 for anonymous callers) and then applies
/// `access::ensure_owner` or `access::require_role`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // GET /api/me
        .route("/me", get(handlers::get_me))
        // GET/PUT /api/workers/{id}/profile
        // Owner or admin only; a foreign caller gets 403, never an empty profile.
        .route(
            "/workers/{id}/profile",
            get(handlers::get_worker_profile).put(handlers::update_worker_profile),
        )
        .route(
            "/workers/{id}/applications",
            get(handlers::get_worker_applications),
        )
        .route(
            "/workers/{id}/saved-jobs",
            get(handlers::get_worker_saved_jobs),
        )
        // GET /api/employers/{id}/postings
        .route(
            "/employers/{id}/postings",
            get(handlers::get_employer_postings),
        )
        // GET /api/admin/overview
        // Role-gated through the same decision engine as the pages.
        .route("/admin/overview", get(handlers::get_admin_overview))
}
