//! Navigation guard: the access decision every navigation passes through.

use printdesk_core::store::{SessionStore, keys};
use printdesk_core::view::LOGIN_ROUTE;

use crate::{claims, permissions, policy};

/// Outcome of a guarded navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// Render the requested section.
    Allow,
    /// Replace the current navigation entry with this route. Always a
    /// replace, never a push, and never an error page.
    Redirect(&'static str),
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allow)
    }
}

/// Decide whether the requested section may render for the current session.
///
/// An absent token denies unconditionally. A token that fails to decode is
/// treated as no session at all, never as an error the user sees. A valid
/// session without the required capability is sent to its own workspace.
pub fn decide(store: &dyn SessionStore, route: &str) -> AccessDecision {
    let Some(token) = store.get(keys::TOKEN) else {
        return AccessDecision::Redirect(LOGIN_ROUTE);
    };

    let claims = match claims::decode(&token) {
        Ok(claims) => claims,
        Err(err) => {
            tracing::debug!(error = %err, "session token rejected, treating as signed out");
            return AccessDecision::Redirect(LOGIN_ROUTE);
        }
    };

    let perms = permissions::resolve(&claims);
    if policy::can_access(route, &perms) {
        AccessDecision::Allow
    } else {
        AccessDecision::Redirect(policy::default_route(&perms))
    }
}
