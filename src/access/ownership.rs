use uuid::Uuid;

use crate::{
    error::AppError,
    models::{Identity, Role},
};

/// OwnershipClaim
///
/// The pair compared by a per-resource check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnershipClaim {
    pub resource_owner_id: Uuid,
    pub caller_id: Uuid,
}

impl OwnershipClaim {
    pub fn new(caller: &Identity, resource_owner_id: Uuid) -> Self {
        Self {
            resource_owner_id,
            caller_id: caller.subject_id,
        }
    }

    pub fn is_self(&self) -> bool {
        self.caller_id == self.resource_owner_id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnershipDecision {
    Allow,
    Deny,
}

/// authorize
///
/// Admins may touch any resource; everyone else only their own. Anonymous callers are
/// always denied, whatever the owner id.
pub fn authorize(caller: &Identity, resource_owner_id: Uuid) -> OwnershipDecision {
    if caller.is_anonymous() {
        return OwnershipDecision::Deny;
    }
    if caller.role == Role::Admin {
        return OwnershipDecision::Allow;
    }

    if OwnershipClaim::new(caller, resource_owner_id).is_self() {
        OwnershipDecision::Allow
    } else {
        OwnershipDecision::Deny
    }
}

/// ensure_owner
///
/// `authorize` as a `Result`, so handlers can `?` it. A denial is `Forbidden`, never an
/// empty payload.
pub fn ensure_owner(caller: &Identity, resource_owner_id: Uuid) -> Result<(), AppError> {
    match authorize(caller, resource_owner_id) {
        OwnershipDecision::Allow => Ok(()),
        OwnershipDecision::Deny => {
            tracing::info!(
                caller = %caller.subject_id,
                role = %caller.role,
                owner = %resource_owner_id,
                "ownership check denied"
            );
            Err(AppError::Forbidden)
        }
    }
}
