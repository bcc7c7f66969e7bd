//! `printdesk-auth` — pure authorization boundary for the dashboard.
//!
//! Token claims decoding, permission resolution and the route access policy
//! live here. The crate is intentionally decoupled from HTTP and rendering;
//! only the guard touches the shared store.

pub mod claims;
pub mod guard;
pub mod permissions;
pub mod policy;

pub use claims::{InvalidTokenError, TokenClaims, decode};
pub use guard::{AccessDecision, decide};
pub use permissions::{ADMIN_CATEGORY_ID, PermissionSet, resolve};
pub use policy::{can_access, default_route, routes};
