#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use staffing_portal::{
    AppState,
    config::AppConfig,
    models::{
        AdminOverview, Application, Identity, JobPosting, Role, SavedJob,
        UpdateWorkerProfileRequest, User, WorkerProfile,
    },
    repository::{RepoError, RepoResult, Repository},
    session::issue_token,
};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};
use uuid::Uuid;

// --- Fixed Test Identities ---

pub const WORKER_A: Uuid = Uuid::from_u128(0xA1);
pub const WORKER_B: Uuid = Uuid::from_u128(0xB2);
pub const EMPLOYER_ID: Uuid = Uuid::from_u128(0xE3);
pub const ADMIN_ID: Uuid = Uuid::from_u128(0xAD);
pub const ODDBALL_ID: Uuid = Uuid::from_u128(0x0DD);

pub fn user(id: Uuid, role: &str) -> User {
    User {
        id,
        email: format!("{role}-{}@example.com", id.simple()),
        display_name: format!("Test {role}"),
        role: role.to_string(),
    }
}

pub fn identity(id: Uuid, role: Role) -> Identity {
    Identity {
        subject_id: id,
        display_name: format!("Test {role}"),
        email: format!("{role}@example.com"),
        role,
    }
}

pub fn token_for(user: &User) -> String {
    issue_token(&AppConfig::default().jwt_secret, user, Duration::from_secs(3600))
        .expect("token must encode")
}

// --- Mock Repository ---

/// MockRepo
///
/// In-memory `Repository`. Knobs make the user lookup fail or stall so the session
/// resolver's degradation paths can be driven.
#[derive(Default)]
pub struct MockRepo {
    pub users: HashMap<Uuid, User>,
    pub profiles: Mutex<HashMap<Uuid, WorkerProfile>>,
    pub postings: Vec<JobPosting>,
    pub applications: Vec<Application>,
    pub saved_jobs: Vec<SavedJob>,
    pub overview: AdminOverview,
    pub fail_lookups: bool,
    pub lookup_delay: Option<Duration>,
}

impl MockRepo {
    /// A repo with one user per role plus one whose stored role is not a known tier.
    pub fn seeded() -> Self {
        let mut repo = MockRepo::default();
        for u in [
            user(WORKER_A, "worker"),
            user(WORKER_B, "worker"),
            user(EMPLOYER_ID, "employer"),
            user(ADMIN_ID, "admin"),
            user(ODDBALL_ID, "superuser"),
        ] {
            repo.users.insert(u.id, u);
        }

        {
            let mut profiles = repo.profiles.lock().expect("profiles lock");
            for worker in [WORKER_A, WORKER_B] {
                profiles.insert(
                    worker,
                    WorkerProfile {
                        worker_id: worker,
                        headline: "Forklift operator".to_string(),
                        skills: vec!["forklift".to_string()],
                        phone: None,
                        location: Some("Dublin".to_string()),
                        updated_at: Utc::now(),
                    },
                );
            }
        }

        let open = JobPosting {
            id: Uuid::from_u128(0x10B),
            employer_id: EMPLOYER_ID,
            title: "Warehouse associate".to_string(),
            description: "Night shift".to_string(),
            location: "Dublin".to_string(),
            is_open: true,
            created_at: Utc::now(),
        };
        let closed = JobPosting {
            id: Uuid::from_u128(0x10C),
            title: "Archived role".to_string(),
            is_open: false,
            ..open.clone()
        };
        repo.applications.push(Application {
            id: Uuid::from_u128(0xAB1),
            worker_id: WORKER_A,
            job_id: open.id,
            job_title: open.title.clone(),
            status: "submitted".to_string(),
            created_at: Utc::now(),
        });
        repo.saved_jobs.push(SavedJob {
            worker_id: WORKER_A,
            job_id: open.id,
            job_title: open.title.clone(),
            saved_at: Utc::now(),
        });
        repo.postings = vec![open, closed];
        repo.overview = AdminOverview {
            total_users: 5,
            total_workers: 2,
            total_employers: 1,
            open_postings: 1,
            total_applications: 1,
        };
        repo
    }
}

#[async_trait]
impl Repository for MockRepo {
    async fn get_user(&self, id: Uuid) -> RepoResult<Option<User>> {
        if let Some(delay) = self.lookup_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_lookups {
            return Err(RepoError::Unavailable("connection refused".to_string()));
        }
        Ok(self.users.get(&id).cloned())
    }

    async fn get_overview(&self) -> RepoResult<AdminOverview> {
        Ok(self.overview.clone())
    }

    async fn list_open_jobs(&self, search: Option<String>) -> RepoResult<Vec<JobPosting>> {
        let needle = search.map(|s| s.to_lowercase());
        Ok(self
            .postings
            .iter()
            .filter(|p| p.is_open)
            .filter(|p| match &needle {
                Some(n) => p.title.to_lowercase().contains(n),
                None => true,
            })
            .cloned()
            .collect())
    }

    async fn get_open_job(&self, id: Uuid) -> RepoResult<Option<JobPosting>> {
        Ok(self
            .postings
            .iter()
            .find(|p| p.id == id && p.is_open)
            .cloned())
    }

    async fn get_employer_postings(&self, employer_id: Uuid) -> RepoResult<Vec<JobPosting>> {
        Ok(self
            .postings
            .iter()
            .filter(|p| p.employer_id == employer_id)
            .cloned()
            .collect())
    }

    async fn get_worker_profile(&self, worker_id: Uuid) -> RepoResult<Option<WorkerProfile>> {
        Ok(self
            .profiles
            .lock()
            .expect("profiles lock")
            .get(&worker_id)
            .cloned())
    }

    async fn update_worker_profile(
        &self,
        worker_id: Uuid,
        req: UpdateWorkerProfileRequest,
    ) -> RepoResult<Option<WorkerProfile>> {
        let mut profiles = self.profiles.lock().expect("profiles lock");
        let Some(profile) = profiles.get_mut(&worker_id) else {
            return Ok(None);
        };
        if let Some(headline) = req.headline {
            profile.headline = headline;
        }
        if let Some(skills) = req.skills {
            profile.skills = skills;
        }
        if req.phone.is_some() {
            profile.phone = req.phone;
        }
        if req.location.is_some() {
            profile.location = req.location;
        }
        profile.updated_at = Utc::now();
        Ok(Some(profile.clone()))
    }

    async fn get_applications(&self, worker_id: Uuid) -> RepoResult<Vec<Application>> {
        Ok(self
            .applications
            .iter()
            .filter(|a| a.worker_id == worker_id)
            .cloned()
            .collect())
    }

    async fn get_saved_jobs(&self, worker_id: Uuid) -> RepoResult<Vec<SavedJob>> {
        Ok(self
            .saved_jobs
            .iter()
            .filter(|s| s.worker_id == worker_id)
            .cloned()
            .collect())
    }
}

// --- State Helpers ---

pub fn app_state(repo: MockRepo) -> AppState {
    AppState::new(AppConfig::default(), Arc::new(repo))
}

pub fn app_state_with(config: AppConfig, repo: MockRepo) -> AppState {
    AppState::new(config, Arc::new(repo))
}
