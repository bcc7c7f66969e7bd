//! Seams toward the view-rendering layer.
//!
//! Navigation and user notices are owned by the embedding application; the
//! session core only needs these two narrow contracts.

/// Route key of the login screen.
pub const LOGIN_ROUTE: &str = "login";

/// Navigation contract.
///
/// The session core only ever *replaces* the current entry. It never pushes,
/// so ending a session does not leave dead entries in the history stack.
pub trait Navigator: Send + Sync {
    /// Route key of the currently displayed view.
    fn current_route(&self) -> String;

    /// Replace the current navigation entry with `route`.
    fn replace(&self, route: &str);
}

/// User-facing, non-fatal notices (toast, banner, dialog; the view decides).
pub trait UserNotices: Send + Sync {
    fn notify(&self, message: &str);
}
