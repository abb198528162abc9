use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Identity & Roles ---

/// Role
///
/// The RBAC tier of a request's caller. `Anonymous` is only ever produced by the session
/// resolver for requests without a usable credential; stored role values that are not
/// one of the known tiers parse to `Unrecognized`, which is authenticated but carries
/// no entitlement anywhere.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, ToSchema, Default,
)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Role {
    #[default]
    Anonymous,
    Worker,
    Employer,
    Admin,
    Unrecognized,
}

impl Role {
    /// parse
    ///
    /// Maps a stored or claimed role string onto a tier. Matching ignores case and
    /// surrounding whitespace. Anything else, including "anonymous", is `Unrecognized`:
    /// a credential can never claim its way down to the anonymous tier or up into one
    /// it does not name exactly.
    pub fn parse(value: &str) -> Role {
        match value.trim().to_ascii_lowercase().as_str() {
            "worker" => Role::Worker,
            "employer" => Role::Employer,
            "admin" => Role::Admin,
            _ => Role::Unrecognized,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Anonymous => "anonymous",
            Role::Worker => "worker",
            Role::Employer => "employer",
            Role::Admin => "admin",
            Role::Unrecognized => "unrecognized",
        }
    }

    /// True for the three tiers that own a portal area.
    pub fn is_known(&self) -> bool {
        matches!(self, Role::Worker | Role::Employer | Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity
///
/// The resolved caller of one request. Built fresh by the session resolver for every
/// request and never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct Identity {
    pub subject_id: Uuid,
    pub display_name: String,
    pub email: String,
    pub role: Role,
}

impl Identity {
    pub fn anonymous() -> Self {
        Self {
            subject_id: Uuid::nil(),
            display_name: String::new(),
            email: String::new(),
            role: Role::Anonymous,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.role == Role::Anonymous
    }

    pub fn from_user(user: &User) -> Self {
        Self {
            subject_id: user.id,
            display_name: user.display_name.clone(),
            email: user.email.clone(),
            role: Role::parse(&user.role),
        }
    }
}

impl Default for Identity {
    fn default() -> Self {
        Self::anonymous()
    }
}

// --- Core Application Schemas (Mapped to Database) ---

/// User
///
/// The canonical account record stored in the `profiles` table. The role is kept as
/// raw text so that an unexpected value surfaces as `Role::Unrecognized` rather than
/// a decode failure.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub role: String,
}

/// WorkerProfile
///
/// A worker's public-facing profile from the `worker_profiles` table.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct WorkerProfile {
    pub worker_id: Uuid,
    pub headline: String,
    pub skills: Vec<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// JobPosting
///
/// A job advertised by an employer. Only `is_open` postings appear on the public board.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct JobPosting {
    pub id: Uuid,
    // FK to profiles.id (the employer).
    pub employer_id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub is_open: bool,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

/// Application
///
/// A worker's application to a posting, joined with the posting title.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Application {
    pub id: Uuid,
    pub worker_id: Uuid,
    pub job_id: Uuid,
    pub job_title: String,
    // "submitted" | "reviewing" | "rejected" | "hired"
    pub status: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

/// SavedJob
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct SavedJob {
    pub worker_id: Uuid,
    pub job_id: Uuid,
    pub job_title: String,
    #[ts(type = "string")]
    pub saved_at: DateTime<Utc>,
}

// --- Request Payloads (Input Schemas) ---

/// UpdateWorkerProfileRequest
///
/// Partial update payload for PUT /api/workers/{id}/profile. Every field is optional;
/// only provided fields are written.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdateWorkerProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

pub const MAX_HEADLINE_LEN: usize = 120;
pub const MAX_SKILLS: usize = 50;
pub const MAX_SKILL_LEN: usize = 40;
pub const MAX_PHONE_LEN: usize = 32;
pub const MAX_LOCATION_LEN: usize = 120;

impl UpdateWorkerProfileRequest {
    /// validate
    ///
    /// Boundary validation for the profile form. Returns a human-readable reason for
    /// the first violated limit.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(headline) = &self.headline {
            if headline.chars().count() > MAX_HEADLINE_LEN {
                return Err(format!("headline exceeds {MAX_HEADLINE_LEN} characters"));
            }
        }
        if let Some(skills) = &self.skills {
            if skills.len() > MAX_SKILLS {
                return Err(format!("at most {MAX_SKILLS} skills are allowed"));
            }
            if skills.iter().any(|s| s.trim().is_empty()) {
                return Err("skills must not be blank".to_string());
            }
            if skills.iter().any(|s| s.chars().count() > MAX_SKILL_LEN) {
                return Err(format!("a skill exceeds {MAX_SKILL_LEN} characters"));
            }
        }
        if let Some(phone) = &self.phone {
            if phone.chars().count() > MAX_PHONE_LEN {
                return Err(format!("phone exceeds {MAX_PHONE_LEN} characters"));
            }
        }
        if let Some(location) = &self.location {
            if location.chars().count() > MAX_LOCATION_LEN {
                return Err(format!("location exceeds {MAX_LOCATION_LEN} characters"));
            }
        }
        Ok(())
    }
}

// --- Dashboard & Page Schemas (Output) ---

/// AdminOverview
///
/// Counters for the admin landing page (GET /admin, GET /api/admin/overview).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default, PartialEq, Eq)]
#[ts(export)]
pub struct AdminOverview {
    pub total_users: i64,
    pub total_workers: i64,
    pub total_employers: i64,
    pub open_postings: i64,
    pub total_applications: i64,
}

/// EmployerDashboard
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct EmployerDashboard {
    pub employer: Identity,
    pub postings: Vec<JobPosting>,
}

/// WorkerDashboard
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct WorkerDashboard {
    pub worker: Identity,
    pub applications: Vec<Application>,
    pub saved_jobs: Vec<SavedJob>,
}

/// LoginPage
///
/// Payload served on the public login landings of each portal area. The credential
/// itself is issued by the external identity provider.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, PartialEq, Eq)]
#[ts(export)]
pub struct LoginPage {
    pub portal: Role,
    pub login_path: String,
    // Where a successful login lands.
    pub home_path: String,
}
