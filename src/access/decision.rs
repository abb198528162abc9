use serde::Serialize;

use super::classifier::{Requirement, RouteRule};
use crate::{
    error::AppError,
    models::{Identity, Role},
};

/// AccessDecision
///
/// Outcome of the gate for one request: continue, or short-circuit with a redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AccessDecision {
    Allow,
    Redirect(String),
}

/// home_path
///
/// Landing page of each role's own area. Roles without an area land on the public
/// home page.
pub fn home_path(role: Role) -> &'static str {
    match role {
        Role::Admin => "/admin",
        Role::Employer => "/employer/dashboard",
        Role::Worker => "/worker/dashboard",
        Role::Anonymous | Role::Unrecognized => "/",
    }
}

/// decide
///
/// The access decision engine. Total over every (identity, rule) pair and free of I/O:
///
/// 1. public rule: allow
/// 2. anonymous caller: redirect to the rule's login page
/// 3. caller holds the required role: allow
/// 4. otherwise: redirect to the caller's own home
pub fn decide(identity: &Identity, rule: &RouteRule) -> AccessDecision {
    let required = match rule.requirement {
        Requirement::Public => return AccessDecision::Allow,
        Requirement::Role(role) => role,
    };

    if identity.is_anonymous() {
        let target = rule.login_redirect_path.as_deref().unwrap_or("/");
        return AccessDecision::Redirect(target.to_string());
    }

    if identity.role == required {
        AccessDecision::Allow
    } else {
        AccessDecision::Redirect(home_path(identity.role).to_string())
    }
}

/// require_role
///
/// `decide` for API handlers, which answer with a status code instead of a redirect:
/// an anonymous caller gets 401, an authenticated caller with the wrong role 403.
pub fn require_role(identity: &Identity, role: Role) -> Result<(), AppError> {
    let rule = RouteRule {
        path_prefix: "/api".to_string(),
        requirement: Requirement::Role(role),
        login_redirect_path: None,
    };

    match decide(identity, &rule) {
        AccessDecision::Allow => Ok(()),
        AccessDecision::Redirect(_) if identity.is_anonymous() => Err(AppError::Unauthorized),
        AccessDecision::Redirect(_) => Err(AppError::Forbidden),
    }
}
