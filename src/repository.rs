use crate::models::{
    AdminOverview, Application, JobPosting, SavedJob, UpdateWorkerProfileRequest, User,
    WorkerProfile,
};
use async_trait::async_trait;
use sqlx::{PgPool, query_builder::QueryBuilder};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// RepoError
///
/// Failure of the data-access layer. Callers decide whether it is fatal: the session
/// resolver degrades it to an anonymous caller, handlers turn it into a 500.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("database error: {0}")]
    Database(sqlx::Error),

    // Connectivity failures, as opposed to a query that ran and failed.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            unavailable @ (sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)) => RepoError::Unavailable(unavailable.to_string()),
            other => RepoError::Database(other),
        }
    }
}

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository Trait
///
/// Abstract contract for all persistence used by the portal. Handlers and the session
/// resolver only ever see `Arc<dyn Repository>`, so tests substitute an in-memory mock.
///
/// Ownership is **not** enforced here: every method takes the owner id it is asked
/// for and the access layer decides beforehand whether the caller may ask.
#[async_trait]
pub trait Repository: Send + Sync {
    // --- Accounts ---
    // Used by the session resolver to refresh role claims.
    async fn get_user(&self, id: Uuid) -> RepoResult<Option<User>>;
    async fn get_overview(&self) -> RepoResult<AdminOverview>;

    // --- Job board ---
    // Public listing. Must only return open postings.
    async fn list_open_jobs(&self, search: Option<String>) -> RepoResult<Vec<JobPosting>>;
    async fn get_open_job(&self, id: Uuid) -> RepoResult<Option<JobPosting>>;
    async fn get_employer_postings(&self, employer_id: Uuid) -> RepoResult<Vec<JobPosting>>;

    // --- Worker resources ---
    async fn get_worker_profile(&self, worker_id: Uuid) -> RepoResult<Option<WorkerProfile>>;
    // Partial update; returns None if the worker has no profile row.
    async fn update_worker_profile(
        &self,
        worker_id: Uuid,
        req: UpdateWorkerProfileRequest,
    ) -> RepoResult<Option<WorkerProfile>>;
    async fn get_applications(&self, worker_id: Uuid) -> RepoResult<Vec<Application>>;
    async fn get_saved_jobs(&self, worker_id: Uuid) -> RepoResult<Vec<SavedJob>>;
}

/// RepositoryState
///
/// The concrete type used to share the persistence layer across the application state.
pub type RepositoryState = Arc<dyn Repository>;

/// PostgresRepository
///
/// `Repository` backed by PostgreSQL through the single pool built at startup.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const JOB_COLUMNS: &str =
    "id, employer_id, title, description, location, is_open, created_at";

#[async_trait]
impl Repository for PostgresRepository {
    async fn get_user(&self, id: Uuid) -> RepoResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, display_name, role FROM profiles WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// get_overview
    ///
    /// All admin counters in a single round trip.
    async fn get_overview(&self) -> RepoResult<AdminOverview> {
        let row: (i64, i64, i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM profiles),
                (SELECT COUNT(*) FROM profiles WHERE lower(role) = 'worker'),
                (SELECT COUNT(*) FROM profiles WHERE lower(role) = 'employer'),
                (SELECT COUNT(*) FROM job_postings WHERE is_open = true),
                (SELECT COUNT(*) FROM applications)
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(AdminOverview {
            total_users: row.0,
            total_workers: row.1,
            total_employers: row.2,
            open_postings: row.3,
            total_applications: row.4,
        })
    }

    /// list_open_jobs
    ///
    /// Uses QueryBuilder so the optional search term is always bound, never spliced.
    async fn list_open_jobs(&self, search: Option<String>) -> RepoResult<Vec<JobPosting>> {
        let mut builder: QueryBuilder<sqlx::Postgres> = QueryBuilder::new("SELECT ");
        builder.push(JOB_COLUMNS);
        builder.push(" FROM job_postings WHERE is_open = true");

        if let Some(s) = search.filter(|s| !s.trim().is_empty()) {
            let pattern = format!("%{}%", s.trim());
            builder.push(" AND (title ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR description ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR location ILIKE ");
            builder.push_bind(pattern);
            builder.push(")");
        }

        builder.push(" ORDER BY created_at DESC");

        let jobs = builder
            .build_query_as::<JobPosting>()
            .fetch_all(&self.pool)
            .await?;
        Ok(jobs)
    }

    async fn get_open_job(&self, id: Uuid) -> RepoResult<Option<JobPosting>> {
        let job = sqlx::query_as::<_, JobPosting>(&format!(
            "SELECT {JOB_COLUMNS} FROM job_postings WHERE id = $1 AND is_open = true"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(job)
    }

    async fn get_employer_postings(&self, employer_id: Uuid) -> RepoResult<Vec<JobPosting>> {
        let jobs = sqlx::query_as::<_, JobPosting>(&format!(
            "SELECT {JOB_COLUMNS} FROM job_postings WHERE employer_id = $1 ORDER BY created_at DESC"
        ))
        .bind(employer_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(jobs)
    }

    async fn get_worker_profile(&self, worker_id: Uuid) -> RepoResult<Option<WorkerProfile>> {
        let profile = sqlx::query_as::<_, WorkerProfile>(
            r#"SELECT worker_id, headline, skills, phone, location, updated_at
               FROM worker_profiles WHERE worker_id = $1"#,
        )
        .bind(worker_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(profile)
    }

    /// update_worker_profile
    ///
    /// COALESCE keeps the stored value for every field the request leaves out.
    async fn update_worker_profile(
        &self,
        worker_id: Uuid,
        req: UpdateWorkerProfileRequest,
    ) -> RepoResult<Option<WorkerProfile>> {
        let profile = sqlx::query_as::<_, WorkerProfile>(
            r#"
            UPDATE worker_profiles
            SET headline = COALESCE($2, headline),
                skills = COALESCE($3, skills),
                phone = COALESCE($4, phone),
                location = COALESCE($5, location),
                updated_at = NOW()
            WHERE worker_id = $1
            RETURNING worker_id, headline, skills, phone, location, updated_at
            "#,
        )
        .bind(worker_id)
        .bind(req.headline)
        .bind(req.skills)
        .bind(req.phone)
        .bind(req.location)
        .fetch_optional(&self.pool)
        .await?;
        Ok(profile)
    }

    async fn get_applications(&self, worker_id: Uuid) -> RepoResult<Vec<Application>> {
        let applications = sqlx::query_as::<_, Application>(
            r#"
            SELECT a.id, a.worker_id, a.job_id, j.title AS job_title, a.status, a.created_at
            FROM applications a
            JOIN job_postings j ON a.job_id = j.id
            WHERE a.worker_id = $1
            ORDER BY a.created_at DESC
            "#,
        )
        .bind(worker_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(applications)
    }

    async fn get_saved_jobs(&self, worker_id: Uuid) -> RepoResult<Vec<SavedJob>> {
        let saved = sqlx::query_as::<_, SavedJob>(
            r#"
            SELECT s.worker_id, s.job_id, j.title AS job_title, s.saved_at
            FROM saved_jobs s
            JOIN job_postings j ON s.job_id = j.id
            WHERE s.worker_id = $1
            ORDER BY s.saved_at DESC
            "#,
        )
        .bind(worker_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(saved)
    }
}
