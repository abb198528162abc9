mod common;

use common::{ADMIN_ID, EMPLOYER_ID, WORKER_A, identity};
use staffing_portal::{
    AppError,
    access::{AccessDecision, RouteRule, RouteTable, decide, home_path, require_role},
    models::{Identity, Role},
};
use uuid::Uuid;

fn caller(role: Role) -> Identity {
    match role {
        Role::Anonymous => Identity::anonymous(),
        Role::Worker => identity(WORKER_A, role),
        Role::Employer => identity(EMPLOYER_ID, role),
        Role::Admin => identity(ADMIN_ID, role),
        Role::Unrecognized => identity(Uuid::from_u128(0x0DD), role),
    }
}

fn rule_for(requirement: Option<Role>) -> RouteRule {
    match requirement {
        None => RouteRule::public("/"),
        Some(Role::Admin) => RouteRule::protected("/admin", Role::Admin, "/admin/login"),
        Some(Role::Employer) => {
            RouteRule::protected("/employer", Role::Employer, "/employer/login")
        }
        Some(Role::Worker) => RouteRule::protected("/worker", Role::Worker, "/worker/login"),
        Some(other) => panic!("no area for {other}"),
    }
}

fn redirect(target: &str) -> AccessDecision {
    AccessDecision::Redirect(target.to_string())
}

// --- Full Role × Requirement Matrix ---

#[test]
fn test_decision_matrix() {
    use Role::*;

    // (caller, requirement, expected)
    let cases = [
        (Anonymous, None, AccessDecision::Allow),
        (Anonymous, Some(Worker), redirect("/worker/login")),
        (Anonymous, Some(Employer), redirect("/employer/login")),
        (Anonymous, Some(Admin), redirect("/admin/login")),
        (Worker, None, AccessDecision::Allow),
        (Worker, Some(Worker), AccessDecision::Allow),
        (Worker, Some(Employer), redirect("/worker/dashboard")),
        (Worker, Some(Admin), redirect("/worker/dashboard")),
        (Employer, None, AccessDecision::Allow),
        (Employer, Some(Worker), redirect("/employer/dashboard")),
        (Employer, Some(Employer), AccessDecision::Allow),
        (Employer, Some(Admin), redirect("/employer/dashboard")),
        (Admin, None, AccessDecision::Allow),
        (Admin, Some(Worker), redirect("/admin")),
        (Admin, Some(Employer), redirect("/admin")),
        (Admin, Some(Admin), AccessDecision::Allow),
    ];

    for (role, requirement, expected) in cases {
        let identity = caller(role);
        let rule = rule_for(requirement);
        let first = decide(&identity, &rule);
        let second = decide(&identity, &rule);

        assert_eq!(first, expected, "{role} on {requirement:?}");
        assert_eq!(first, second, "decide must be repeatable for {role} on {requirement:?}");
    }
}

#[test]
fn test_public_rule_allows_everyone() {
    let rule = RouteRule::public("/jobs");
    for role in [
        Role::Anonymous,
        Role::Worker,
        Role::Employer,
        Role::Admin,
        Role::Unrecognized,
    ] {
        assert_eq!(decide(&caller(role), &rule), AccessDecision::Allow);
    }
}

#[test]
fn test_named_properties() {
    let admin_rule = rule_for(Some(Role::Admin));
    let employer_rule = rule_for(Some(Role::Employer));

    assert_eq!(
        decide(&Identity::anonymous(), &admin_rule),
        redirect("/admin/login")
    );
    assert_eq!(
        decide(&caller(Role::Worker), &admin_rule),
        redirect("/worker/dashboard")
    );
    assert_eq!(
        decide(&caller(Role::Employer), &employer_rule),
        AccessDecision::Allow
    );
}

// --- Edge Cases ---

#[test]
fn test_unrecognized_role_lands_on_public_home() {
    let oddball = caller(Role::Unrecognized);
    for requirement in [Role::Worker, Role::Employer, Role::Admin] {
        assert_eq!(
            decide(&oddball, &rule_for(Some(requirement))),
            redirect("/"),
            "unrecognized role must never be admitted to the {requirement} area"
        );
    }
}

#[test]
fn test_protected_rule_without_login_path_falls_back_to_home() {
    let rule = RouteRule {
        path_prefix: "/reports".to_string(),
        requirement: staffing_portal::access::Requirement::Role(Role::Admin),
        login_redirect_path: None,
    };
    assert_eq!(decide(&Identity::anonymous(), &rule), redirect("/"));
}

#[test]
fn test_home_paths() {
    assert_eq!(home_path(Role::Admin), "/admin");
    assert_eq!(home_path(Role::Employer), "/employer/dashboard");
    assert_eq!(home_path(Role::Worker), "/worker/dashboard");
    assert_eq!(home_path(Role::Unrecognized), "/");
    assert_eq!(home_path(Role::Anonymous), "/");
}

#[test]
fn test_home_paths_are_admitted_for_their_own_role() {
    // A wrong-role redirect must never land the caller on another refusal.
    let table = RouteTable::default();
    for role in [Role::Worker, Role::Employer, Role::Admin] {
        let home = home_path(role);
        let rule = table.classify(home);
        assert_eq!(decide(&caller(role), rule), AccessDecision::Allow, "{home}");
    }
}

// --- API Role Requirement ---

#[test]
fn test_require_role_status_mapping() {
    assert!(require_role(&caller(Role::Admin), Role::Admin).is_ok());

    let anonymous = require_role(&Identity::anonymous(), Role::Admin);
    assert!(matches!(anonymous, Err(AppError::Unauthorized)));

    let worker = require_role(&caller(Role::Worker), Role::Admin);
    assert!(matches!(worker, Err(AppError::Forbidden)));

    let oddball = require_role(&caller(Role::Unrecognized), Role::Worker);
    assert!(matches!(oddball, Err(AppError::Forbidden)));
}
