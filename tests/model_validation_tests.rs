use staffing_portal::models::{
    Identity, MAX_HEADLINE_LEN, MAX_SKILLS, Role, UpdateWorkerProfileRequest, User,
};
use uuid::Uuid;

// --- Role Parsing ---

#[test]
fn test_role_parse_known_tiers() {
    assert_eq!(Role::parse("worker"), Role::Worker);
    assert_eq!(Role::parse("EMPLOYER"), Role::Employer);
    assert_eq!(Role::parse(" Admin "), Role::Admin);
}

#[test]
fn test_role_parse_never_escalates() {
    for raw in ["", "root", "superadmin", "admin ", "anonymous", "admins", "ad min"] {
        let role = Role::parse(raw);
        // "admin " trims to a real tier; everything else is unrecognized.
        if raw.trim() == "admin" {
            assert_eq!(role, Role::Admin);
        } else {
            assert_eq!(role, Role::Unrecognized, "{raw:?}");
        }
    }
}

#[test]
fn test_role_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Role::Employer).unwrap(), "\"employer\"");
    assert_eq!(Role::Worker.to_string(), "worker");
}

#[test]
fn test_identity_from_user() {
    let user = User {
        id: Uuid::from_u128(7),
        email: "w@example.com".to_string(),
        display_name: "Wendy".to_string(),
        role: "worker".to_string(),
    };
    let identity = Identity::from_user(&user);
    assert_eq!(identity.subject_id, user.id);
    assert_eq!(identity.role, Role::Worker);
    assert!(!identity.is_anonymous());
    assert!(Identity::anonymous().is_anonymous());
}

// --- Profile Form Validation ---

#[test]
fn test_empty_update_is_valid() {
    assert!(UpdateWorkerProfileRequest::default().validate().is_ok());
}

#[test]
fn test_profile_limits() {
    let too_long = UpdateWorkerProfileRequest {
        headline: Some("h".repeat(MAX_HEADLINE_LEN + 1)),
        ..Default::default()
    };
    assert!(too_long.validate().is_err());

    let at_limit = UpdateWorkerProfileRequest {
        headline: Some("h".repeat(MAX_HEADLINE_LEN)),
        ..Default::default()
    };
    assert!(at_limit.validate().is_ok());

    let too_many = UpdateWorkerProfileRequest {
        skills: Some(vec!["rust".to_string(); MAX_SKILLS + 1]),
        ..Default::default()
    };
    assert!(too_many.validate().is_err());

    let blank = UpdateWorkerProfileRequest {
        skills: Some(vec!["forklift".to_string(), " ".to_string()]),
        ..Default::default()
    };
    assert!(blank.validate().is_err());
}

#[test]
fn test_partial_update_omits_absent_fields() {
    let req = UpdateWorkerProfileRequest {
        phone: Some("+353 1 000 0000".to_string()),
        ..Default::default()
    };
    let json = serde_json::to_value(&req).unwrap();
    assert_eq!(json, serde_json::json!({ "phone": "+353 1 000 0000" }));
}
