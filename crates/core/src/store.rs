//! Shared session store abstraction.
//!
//! The token and the activity timestamp live in one key-value store that is
//! visible to every concurrently open view of the application. Writes are
//! last-write-wins with no locking; mutations are fanned out to subscribers
//! so a logout in one view is observed promptly in all others.
//!
//! Subscribers receive every mutation, including their own. Handlers must be
//! idempotent: observing "token removed" twice converges to the same
//! logged-out state.

use tokio::sync::broadcast;

/// Fixed key names in the shared store.
pub mod keys {
    /// Opaque session token issued by the backend at login.
    pub const TOKEN: &str = "token";

    /// Last qualifying user interaction, integer epoch milliseconds as a string.
    pub const LAST_ACTIVITY_AT: &str = "lastActivityAt";

    /// Cached display name of the signed-in user.
    pub const USER_NAME: &str = "userName";

    /// Cached login validity flag.
    pub const VALID: &str = "valid";
}

/// Every key cleared together on logout or detected expiry.
pub const SESSION_KEYS: [&str; 4] = [
    keys::TOKEN,
    keys::VALID,
    keys::USER_NAME,
    keys::LAST_ACTIVITY_AT,
];

/// A single observed mutation of the shared store.
///
/// `new_value == None` means the key was removed. A transition of
/// [`keys::TOKEN`] from present to absent is authoritative: subscribers must
/// treat it as an immediate logout regardless of their own timer phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreChange {
    pub key: String,
    pub new_value: Option<String>,
}

/// Client-side key-value persistence shared across all open views.
///
/// Modeled as a trait so tests can substitute an in-memory fake instead of
/// touching real shared storage. Implementations must be safe to share
/// across tasks; readers and writers race and the model tolerates it.
pub trait SessionStore: Send + Sync {
    /// Current value for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Set `key` to `value`, notifying subscribers.
    fn set(&self, key: &str, value: &str);

    /// Remove `key`, notifying subscribers if it was present.
    fn remove(&self, key: &str);

    /// Subscribe to subsequent mutations of the store.
    fn changes(&self) -> broadcast::Receiver<StoreChange>;
}

/// Seed the store for a freshly authenticated session.
///
/// Mirrors what the login screen persists: the token plus the cached
/// display fields. The activity timestamp is left to the monitor's
/// bootstrap so an anonymous view never writes one by accident.
pub fn begin_session(store: &dyn SessionStore, token: &str, user_name: &str) {
    store.set(keys::VALID, "true");
    store.set(keys::TOKEN, token);
    store.set(keys::USER_NAME, user_name);
}

/// Remove the token and every session-derived field.
///
/// Idempotent: concurrent views clearing the same session converge to the
/// same logged-out state.
pub fn clear_session(store: &dyn SessionStore) {
    for key in SESSION_KEYS {
        store.remove(key);
    }
}
