/// Access Control
///
/// The single implementation of the portal's authorization rules. Every entry point
/// goes through here: the gate middleware (classify + decide), API handlers that need a
/// role (`require_role`) and per-resource handlers (`ensure_owner`).

/// Path → rule lookup.
pub mod classifier;

/// Identity × rule → allow / redirect.
pub mod decision;

/// Caller × resource owner → allow / deny.
pub mod ownership;

pub use classifier::{Requirement, RouteRule, RouteTable, normalize_path};
pub use decision::{AccessDecision, decide, home_path, require_role};
pub use ownership::{OwnershipClaim, OwnershipDecision, authorize, ensure_owner};
