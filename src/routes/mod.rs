/// Router Module Index
///
/// One module per access tier. The tiers here only group routes for readability:
/// what a caller may reach is decided by the access gate layered over the whole router
/// and by the checks inside each API handler, never by which module a route lives in.

/// Routes open to everyone: health, job board, login landings.
pub mod public;

/// Pages of the admin area (`/admin/...`), gated to the admin role.
pub mod admin;

/// Pages of the employer area (`/employer/...`), gated to the employer role.
pub mod employer;

/// Pages of the worker area (`/worker/...`), gated to the worker role.
pub mod worker;

/// JSON API (`/api/...`). Public to the gate; each handler authenticates the caller
/// and checks role or ownership itself.
pub mod api;
