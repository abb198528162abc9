use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Admin Router Module
///
/// `/admin/login` is classified public by the route table; every other path under
/// `/admin` requires the admin role before the request reaches a handler.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // GET /admin
        // Landing page with portal-wide counters.
        .route("/admin", get(handlers::admin_home))
        .route("/admin/login", get(handlers::admin_login))
}
