use std::sync::Arc;

use axum::{
    Router,
    extract::{FromRef, Request, State},
    http::HeaderName,
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// The access core: route classification, decisions, ownership.
pub mod access;
// Request extractors built on the session resolver.
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod session;

// One router module per access tier.
pub mod routes;
use routes::{admin, api, employer, public, worker};

use access::{AccessDecision, RouteTable, decide};
use session::{SessionResolver, extract_credential};

// --- Public Re-exports ---

pub use config::AppConfig;
pub use error::AppError;
pub use models::{Identity, Role};
pub use repository::{PostgresRepository, RepositoryState};

/// ApiDoc
///
/// OpenAPI document for every handler and schema, served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_jobs, handlers::get_job, handlers::admin_login,
        handlers::employer_login, handlers::worker_login, handlers::admin_home,
        handlers::employer_dashboard, handlers::worker_dashboard, handlers::get_me,
        handlers::get_worker_profile, handlers::update_worker_profile,
        handlers::get_worker_applications, handlers::get_worker_saved_jobs,
        handlers::get_employer_postings, handlers::get_admin_overview
    ),
    components(
        schemas(
            models::Role, models::Identity, models::WorkerProfile, models::JobPosting,
            models::Application, models::SavedJob, models::UpdateWorkerProfileRequest,
            models::AdminOverview, models::EmployerDashboard, models::WorkerDashboard,
            models::LoginPage, error::ErrorBody,
        )
    ),
    tags(
        (name = "staffing-portal", description = "Staffing Portal API")
    )
)]
struct ApiDoc;

/// AppState
///
/// The single, immutable container shared by every request. Nothing in it is mutated
/// after startup; per-request state (the caller's identity) lives in request
/// extensions.
#[derive(Clone)]
pub struct AppState {
    /// Data access, backed by the one connection pool built at startup.
    pub repo: RepositoryState,
    pub config: AppConfig,
    /// Credential → identity.
    pub sessions: SessionResolver,
    /// Path → access rule.
    pub routes: Arc<RouteTable>,
}

impl AppState {
    /// Wires the session resolver to `repo` and installs the portal route table.
    pub fn new(config: AppConfig, repo: RepositoryState) -> Self {
        Self::with_routes(config, repo, RouteTable::default())
    }

    pub fn with_routes(config: AppConfig, repo: RepositoryState, routes: RouteTable) -> Self {
        let sessions = SessionResolver::new(&config, repo.clone());
        Self {
            repo,
            config,
            sessions,
            routes: Arc::new(routes),
        }
    }
}

// --- Axum FromRef Extractor Implementations ---

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

impl FromRef<AppState> for SessionResolver {
    fn from_ref(app_state: &AppState) -> SessionResolver {
        app_state.sessions.clone()
    }
}

impl FromRef<AppState> for Arc<RouteTable> {
    fn from_ref(app_state: &AppState) -> Arc<RouteTable> {
        app_state.routes.clone()
    }
}

/// access_gate
///
/// Runs in front of every route. The path is classified first; public paths pass
/// straight through without touching the session store. For protected paths the
/// credential is resolved and `access::decide` either admits the request, with the
/// resolved `Identity` placed in its extensions, or answers with a 303 redirect.
async fn access_gate(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let rule = state.routes.classify(&path);
    if rule.is_public() {
        return next.run(request).await;
    }

    let identity = state
        .sessions
        .resolve(extract_credential(request.headers()))
        .await;

    match decide(&identity, rule) {
        AccessDecision::Allow => {
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        AccessDecision::Redirect(target) => {
            tracing::debug!(
                path = %path,
                role = %identity.role,
                target = %target,
                "access gate redirect"
            );
            Redirect::to(&target).into_response()
        }
    }
}

/// create_router
///
/// Assembles the application's routing structure, the access gate and the
/// observability layers.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Header name constant for Request Correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public::public_routes())
        .merge(admin::admin_routes())
        .merge(employer::employer_routes())
        .merge(worker::worker_routes())
        .nest("/api", api::api_routes())
        .fallback(handlers::not_found)
        // The gate wraps every route above, including the fallback.
        .layer(middleware::from_fn_with_state(state.clone(), access_gate))
        .with_state(state);

    base_router
        .layer(
            ServiceBuilder::new()
                // Generates a UUID x-request-id for every incoming request.
                .layer(SetRequestIdLayer::new(
                    x_request_id.clone(),
                    MakeRequestUuid,
                ))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                // Echoes x-request-id back to the client.
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Builds the per-request span so every log line of one request carries its
/// `x-request-id`. Only the path is recorded; query strings stay out of the logs.
fn trace_span_logger(request: &Request) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
        req_id = %request_id,
    )
}
