use crate::{
    AppState,
    access::{ensure_owner, home_path, require_role},
    auth::AuthUser,
    error::{AppError, ErrorBody},
    models::{
        AdminOverview, Application, EmployerDashboard, Identity, JobPosting, LoginPage, Role,
        SavedJob, UpdateWorkerProfileRequest, WorkerDashboard, WorkerProfile,
    },
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use uuid::Uuid;

// --- Filter Structs ---

/// JobFilter
///
/// Query parameters for the public job board (GET /jobs).
#[derive(Deserialize, utoipa::IntoParams)]
pub struct JobFilter {
    /// Optional search over title, description and location.
    pub search: Option<String>,
}

// --- Public Handlers ---

/// list_jobs
///
/// [Public Route] Open postings, newest first.
#[utoipa::path(
    get,
    path = "/jobs",
    params(JobFilter),
    responses((status = 200, description = "Open postings", body = [JobPosting]))
)]
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(filter): Query<JobFilter>,
) -> Result<Json<Vec<JobPosting>>, AppError> {
    let jobs = state.repo.list_open_jobs(filter.search).await?;
    Ok(Json(jobs))
}

/// get_job
///
/// [Public Route] One open posting. Closed postings are indistinguishable from
/// missing ones.
#[utoipa::path(
    get,
    path = "/jobs/{id}",
    params(("id" = Uuid, Path, description = "Posting ID")),
    responses(
        (status = 200, description = "Found", body = JobPosting),
        (status = 404, description = "Not Found", body = ErrorBody)
    )
)]
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<JobPosting>, AppError> {
    state
        .repo
        .get_open_job(id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

fn login_page(portal: Role) -> Json<LoginPage> {
    Json(LoginPage {
        portal,
        login_path: format!("/{portal}/login"),
        home_path: home_path(portal).to_string(),
    })
}

/// admin_login
///
/// [Public Route] Landing for the admin sign-in; the gate sends anonymous admin-area
/// requests here.
#[utoipa::path(
    get,
    path = "/admin/login",
    responses((status = 200, description = "Login landing", body = LoginPage))
)]
pub async fn admin_login() -> Json<LoginPage> {
    login_page(Role::Admin)
}

/// employer_login
#[utoipa::path(
    get,
    path = "/employer/login",
    responses((status = 200, description = "Login landing", body = LoginPage))
)]
pub async fn employer_login() -> Json<LoginPage> {
    login_page(Role::Employer)
}

/// worker_login
#[utoipa::path(
    get,
    path = "/worker/login",
    responses((status = 200, description = "Login landing", body = LoginPage))
)]
pub async fn worker_login() -> Json<LoginPage> {
    login_page(Role::Worker)
}

// --- Portal Pages (behind the access gate) ---

/// admin_home
///
/// [Admin Area] The gate has already admitted only admins; the role is checked again
/// here so the page stays safe if it is ever mounted outside the gate.
#[utoipa::path(
    get,
    path = "/admin",
    responses(
        (status = 200, description = "Overview", body = AdminOverview),
        (status = 303, description = "Redirect to login or own area")
    )
)]
pub async fn admin_home(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<AdminOverview>, AppError> {
    require_role(&identity, Role::Admin)?;
    Ok(Json(state.repo.get_overview().await?))
}

/// employer_dashboard
///
/// [Employer Area] The caller's own postings, open and closed.
#[utoipa::path(
    get,
    path = "/employer/dashboard",
    responses(
        (status = 200, description = "Dashboard", body = EmployerDashboard),
        (status = 303, description = "Redirect to login or own area")
    )
)]
pub async fn employer_dashboard(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<EmployerDashboard>, AppError> {
    require_role(&identity, Role::Employer)?;
    let postings = state
        .repo
        .get_employer_postings(identity.subject_id)
        .await?;
    Ok(Json(EmployerDashboard {
        employer: identity,
        postings,
    }))
}

/// worker_dashboard
///
/// [Worker Area] The caller's applications and saved jobs.
#[utoipa::path(
    get,
    path = "/worker/dashboard",
    responses(
        (status = 200, description = "Dashboard", body = WorkerDashboard),
        (status = 303, description = "Redirect to login or own area")
    )
)]
pub async fn worker_dashboard(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<WorkerDashboard>, AppError> {
    require_role(&identity, Role::Worker)?;
    let applications = state.repo.get_applications(identity.subject_id).await?;
    let saved_jobs = state.repo.get_saved_jobs(identity.subject_id).await?;
    Ok(Json(WorkerDashboard {
        worker: identity,
        applications,
        saved_jobs,
    }))
}

// --- API Handlers ---

/// get_me
///
/// [Authenticated Route] The resolved identity of the caller.
#[utoipa::path(
    get,
    path = "/api/me",
    responses(
        (status = 200, description = "Caller", body = Identity),
        (status = 401, description = "Not authenticated", body = ErrorBody)
    )
)]
pub async fn get_me(AuthUser(identity): AuthUser) -> Json<Identity> {
    Json(identity)
}

/// get_worker_profile
///
/// [Owner or Admin] Reads a worker profile.
#[utoipa::path(
    get,
    path = "/api/workers/{id}/profile",
    params(("id" = Uuid, Path, description = "Worker ID")),
    responses(
        (status = 200, description = "Profile", body = WorkerProfile),
        (status = 403, description = "Not Owner", body = ErrorBody),
        (status = 404, description = "Not Found", body = ErrorBody)
    )
)]
pub async fn get_worker_profile(
    AuthUser(caller): AuthUser,
    State(state): State<AppState>,
    Path(worker_id): Path<Uuid>,
) -> Result<Json<WorkerProfile>, AppError> {
    ensure_owner(&caller, worker_id)?;
    state
        .repo
        .get_worker_profile(worker_id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

/// update_worker_profile
///
/// [Owner or Admin] Partial update of a worker profile. Ownership is checked before
/// the payload is validated so a foreign caller learns nothing about the limits.
#[utoipa::path(
    put,
    path = "/api/workers/{id}/profile",
    params(("id" = Uuid, Path, description = "Worker ID")),
    request_body = UpdateWorkerProfileRequest,
    responses(
        (status = 200, description = "Updated", body = WorkerProfile),
        (status = 400, description = "Invalid payload", body = ErrorBody),
        (status = 403, description = "Not Owner", body = ErrorBody),
        (status = 404, description = "Not Found", body = ErrorBody)
    )
)]
pub async fn update_worker_profile(
    AuthUser(caller): AuthUser,
    State(state): State<AppState>,
    Path(worker_id): Path<Uuid>,
    Json(payload): Json<UpdateWorkerProfileRequest>,
) -> Result<Json<WorkerProfile>, AppError> {
    ensure_owner(&caller, worker_id)?;
    payload.validate().map_err(AppError::BadRequest)?;
    state
        .repo
        .update_worker_profile(worker_id, payload)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

/// get_worker_applications
///
/// [Owner or Admin]
#[utoipa::path(
    get,
    path = "/api/workers/{id}/applications",
    params(("id" = Uuid, Path, description = "Worker ID")),
    responses(
        (status = 200, description = "Applications", body = [Application]),
        (status = 403, description = "Not Owner", body = ErrorBody)
    )
)]
pub async fn get_worker_applications(
    AuthUser(caller): AuthUser,
    State(state): State<AppState>,
    Path(worker_id): Path<Uuid>,
) -> Result<Json<Vec<Application>>, AppError> {
    ensure_owner(&caller, worker_id)?;
    Ok(Json(state.repo.get_applications(worker_id).await?))
}

/// get_worker_saved_jobs
///
/// [Owner or Admin]
#[utoipa::path(
    get,
    path = "/api/workers/{id}/saved-jobs",
    params(("id" = Uuid, Path, description = "Worker ID")),
    responses(
        (status = 200, description = "Saved jobs", body = [SavedJob]),
        (status = 403, description = "Not Owner", body = ErrorBody)
    )
)]
pub async fn get_worker_saved_jobs(
    AuthUser(caller): AuthUser,
    State(state): State<AppState>,
    Path(worker_id): Path<Uuid>,
) -> Result<Json<Vec<SavedJob>>, AppError> {
    ensure_owner(&caller, worker_id)?;
    Ok(Json(state.repo.get_saved_jobs(worker_id).await?))
}

/// get_employer_postings
///
/// [Owner or Admin] All postings of one employer, including closed ones.
#[utoipa::path(
    get,
    path = "/api/employers/{id}/postings",
    params(("id" = Uuid, Path, description = "Employer ID")),
    responses(
        (status = 200, description = "Postings", body = [JobPosting]),
        (status = 403, description = "Not Owner", body = ErrorBody)
    )
)]
pub async fn get_employer_postings(
    AuthUser(caller): AuthUser,
    State(state): State<AppState>,
    Path(employer_id): Path<Uuid>,
) -> Result<Json<Vec<JobPosting>>, AppError> {
    ensure_owner(&caller, employer_id)?;
    Ok(Json(state.repo.get_employer_postings(employer_id).await?))
}

/// get_admin_overview
///
/// [Admin Route] Same counters as the admin landing page, for API clients.
#[utoipa::path(
    get,
    path = "/api/admin/overview",
    responses(
        (status = 200, description = "Overview", body = AdminOverview),
        (status = 401, description = "Not authenticated", body = ErrorBody),
        (status = 403, description = "Not an admin", body = ErrorBody)
    )
)]
pub async fn get_admin_overview(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<AdminOverview>, AppError> {
    require_role(&identity, Role::Admin)?;
    Ok(Json(state.repo.get_overview().await?))
}

/// not_found
///
/// Fallback for unrouted paths. Registered before the access gate layer so a path
/// under a protected area with no handler still redirects anonymous callers first.
pub async fn not_found() -> AppError {
    AppError::NotFound
}
