use std::collections::HashSet;

use crate::{error::AppError, models::Role};

/// Requirement
///
/// What a route demands of its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Public,
    Role(Role),
}

/// RouteRule
///
/// One row of the route table. `login_redirect_path` is where an anonymous caller is
/// sent when the rule is protected; public rules leave it empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRule {
    pub path_prefix: String,
    pub requirement: Requirement,
    pub login_redirect_path: Option<String>,
}

impl RouteRule {
    pub fn public(path_prefix: impl Into<String>) -> Self {
        Self {
            path_prefix: path_prefix.into(),
            requirement: Requirement::Public,
            login_redirect_path: None,
        }
    }

    pub fn protected(
        path_prefix: impl Into<String>,
        role: Role,
        login_redirect_path: impl Into<String>,
    ) -> Self {
        Self {
            path_prefix: path_prefix.into(),
            requirement: Requirement::Role(role),
            login_redirect_path: Some(login_redirect_path.into()),
        }
    }

    /// matches
    ///
    /// Segment-aware prefix test on an already normalized path: `/admin` covers
    /// `/admin` and `/admin/...` but not `/administrator`.
    pub fn matches(&self, path: &str) -> bool {
        if self.path_prefix == "/" {
            return path.starts_with('/');
        }
        match path.strip_prefix(self.path_prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    pub fn is_public(&self) -> bool {
        self.requirement == Requirement::Public
    }
}

/// RouteTable
///
/// Ordered rule table. Rules are kept sorted longest prefix first, so the first rule
/// that matches is also the longest matching prefix. Paths that match nothing fall
/// through to a public rule.
#[derive(Debug, Clone)]
pub struct RouteTable {
    rules: Vec<RouteRule>,
    fallback: RouteRule,
}

impl RouteTable {
    /// new
    ///
    /// Builds a table from caller-supplied rules, rejecting any table the classifier
    /// could not evaluate safely.
    pub fn new(rules: Vec<RouteRule>) -> Result<Self, AppError> {
        let mut seen = HashSet::new();
        for rule in &rules {
            let prefix = rule.path_prefix.as_str();
            if !prefix.starts_with('/') {
                return Err(AppError::RouteTable(format!(
                    "prefix {prefix:?} must be an absolute path"
                )));
            }
            if prefix.len() > 1 && normalize_path(prefix) != prefix {
                return Err(AppError::RouteTable(format!(
                    "prefix {prefix:?} is not in normalized form"
                )));
            }
            if !seen.insert(prefix) {
                return Err(AppError::RouteTable(format!("duplicate prefix {prefix:?}")));
            }
            if let Requirement::Role(role) = rule.requirement {
                if !role.is_known() {
                    return Err(AppError::RouteTable(format!(
                        "prefix {prefix:?} requires the {role} role, which owns no area"
                    )));
                }
                match rule.login_redirect_path.as_deref() {
                    Some(login) if login.starts_with('/') => {}
                    _ => {
                        return Err(AppError::RouteTable(format!(
                            "protected prefix {prefix:?} has no login redirect"
                        )));
                    }
                }
            }
        }

        Ok(Self::sorted(rules))
    }

    fn sorted(mut rules: Vec<RouteRule>) -> Self {
        rules.sort_by(|a, b| b.path_prefix.len().cmp(&a.path_prefix.len()));
        Self {
            rules,
            fallback: RouteRule::public("/"),
        }
    }

    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }

    /// classify
    ///
    /// Pure lookup of the rule governing `path`. The path is normalized first, so
    /// `//admin/`, `/admin/./x` and `/worker/../admin` are all classified as `/admin`.
    pub fn classify(&self, path: &str) -> &RouteRule {
        let normalized = normalize_path(path);
        self.rules
            .iter()
            .find(|rule| rule.matches(&normalized))
            .unwrap_or(&self.fallback)
    }
}

impl Default for RouteTable {
    /// The portal table: one protected area per role, each with a public login page.
    fn default() -> Self {
        Self::sorted(vec![
            RouteRule::protected("/admin", Role::Admin, "/admin/login"),
            RouteRule::public("/admin/login"),
            RouteRule::protected("/employer", Role::Employer, "/employer/login"),
            RouteRule::public("/employer/login"),
            RouteRule::protected("/worker", Role::Worker, "/worker/login"),
            RouteRule::public("/worker/login"),
        ])
    }
}

/// normalize_path
///
/// Drops the query string and fragment, collapses empty and `.` segments, resolves
/// `..` (never above the root) and removes any trailing slash.
pub fn normalize_path(raw: &str) -> String {
    let path = raw.split(['?', '#']).next().unwrap_or_default();

    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", segments.join("/"))
    }
}
