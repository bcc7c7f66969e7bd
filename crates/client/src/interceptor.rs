//! Classification and handling of backend-reported failures.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Deserialize;

use printdesk_core::store::{SessionStore, clear_session};
use printdesk_core::view::{LOGIN_ROUTE, Navigator, UserNotices};

/// Structured error payload the backend attaches to failed requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiErrorBody {
    #[serde(rename = "Status", default)]
    pub status: bool,

    #[serde(rename = "Error", default)]
    pub error: Option<String>,

    #[serde(rename = "Code", default)]
    pub code: Option<String>,
}

/// A failed backend request as seen by the interceptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiFailure {
    /// HTTP status, when a response arrived at all.
    pub status: Option<u16>,
    pub body: Option<ApiErrorBody>,
}

/// Error codes the backend uses for an unusable session token.
const SESSION_ERROR_CODES: [&str; 3] = ["TOKEN_EXPIRED", "INVALID_TOKEN", "NO_TOKEN"];

/// Notice shown once before the forced redirect.
pub const SESSION_EXPIRED_NOTICE: &str = "Your session has expired. Please log in again.";

const FALLBACK_NOTICE: &str = "An error occurred";

/// Whether this failure means the session token is no longer usable.
pub fn is_session_invalid(failure: &ApiFailure) -> bool {
    if failure.status == Some(401) {
        return true;
    }

    failure
        .body
        .as_ref()
        .and_then(|body| body.code.as_deref())
        .is_some_and(|code| SESSION_ERROR_CODES.iter().any(|c| *c == code))
}

/// Turns session-invalidating backend failures into a forced logout.
///
/// One instance is shared by all requests of a view. Session-invalidating
/// failures purge the shared session state, surface one notice and land on
/// the login route; concurrent failures collapse into a single logout.
/// Everything else becomes a non-fatal notice and leaves the session alone.
pub struct AuthFailureInterceptor {
    store: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    notices: Arc<dyn UserNotices>,
    logged_out: AtomicBool,
}

impl AuthFailureInterceptor {
    pub fn new(
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
        notices: Arc<dyn UserNotices>,
    ) -> Self {
        Self {
            store,
            navigator,
            notices,
            logged_out: AtomicBool::new(false),
        }
    }

    /// Handle one failed backend request.
    pub fn handle(&self, failure: &ApiFailure) {
        if is_session_invalid(failure) {
            self.force_logout();
            return;
        }

        let message = failure
            .body
            .as_ref()
            .and_then(|body| body.error.clone())
            .unwrap_or_else(|| FALLBACK_NOTICE.to_string());
        self.notices.notify(&message);
    }

    /// Re-arm the interceptor after a successful login.
    pub fn reset(&self) {
        self.logged_out.store(false, Ordering::SeqCst);
    }

    fn force_logout(&self) {
        if self.logged_out.swap(true, Ordering::SeqCst) {
            return;
        }

        tracing::info!("backend rejected the session token, forcing logout");
        clear_session(&*self.store);
        self.notices.notify(SESSION_EXPIRED_NOTICE);
        if self.navigator.current_route() != LOGIN_ROUTE {
            self.navigator.replace(LOGIN_ROUTE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use printdesk_core::fakes::{RecordingNavigator, RecordingNotices};
    use printdesk_core::store::{SESSION_KEYS, keys};
    use printdesk_core::{InMemorySessionStore, begin_session};

    fn failure_with_code(code: &str) -> ApiFailure {
        ApiFailure {
            status: Some(400),
            body: Some(ApiErrorBody {
                status: false,
                error: None,
                code: Some(code.to_string()),
            }),
        }
    }

    fn setup() -> (
        AuthFailureInterceptor,
        Arc<InMemorySessionStore>,
        Arc<RecordingNavigator>,
        Arc<RecordingNotices>,
    ) {
        let store = Arc::new(InMemorySessionStore::new());
        begin_session(&*store, "tok", "alice");
        let navigator = Arc::new(RecordingNavigator::starting_at("orders"));
        let notices = Arc::new(RecordingNotices::new());
        let interceptor =
            AuthFailureInterceptor::new(store.clone(), navigator.clone(), notices.clone());
        (interceptor, store, navigator, notices)
    }

    #[test]
    fn classifies_401_and_token_error_codes_as_session_invalid() {
        assert!(is_session_invalid(&ApiFailure {
            status: Some(401),
            body: None,
        }));
        assert!(is_session_invalid(&failure_with_code("TOKEN_EXPIRED")));
        assert!(is_session_invalid(&failure_with_code("INVALID_TOKEN")));
        assert!(is_session_invalid(&failure_with_code("NO_TOKEN")));

        assert!(!is_session_invalid(&failure_with_code("QUERY_ERROR")));
        assert!(!is_session_invalid(&ApiFailure {
            status: Some(500),
            body: None,
        }));
        assert!(!is_session_invalid(&ApiFailure::default()));
    }

    #[test]
    fn session_invalid_failure_purges_notifies_and_redirects() {
        let (interceptor, store, navigator, notices) = setup();

        interceptor.handle(&failure_with_code("TOKEN_EXPIRED"));

        for key in SESSION_KEYS {
            assert_eq!(store.get(key), None, "key {key} should be cleared");
        }
        assert_eq!(notices.messages(), vec![SESSION_EXPIRED_NOTICE.to_string()]);
        assert_eq!(navigator.replacements(), vec![LOGIN_ROUTE.to_string()]);
    }

    #[test]
    fn repeated_failures_log_out_exactly_once() {
        let (interceptor, _store, navigator, notices) = setup();

        interceptor.handle(&failure_with_code("TOKEN_EXPIRED"));
        interceptor.handle(&ApiFailure {
            status: Some(401),
            body: None,
        });
        interceptor.handle(&failure_with_code("NO_TOKEN"));

        assert_eq!(notices.messages().len(), 1);
        assert_eq!(navigator.replacements().len(), 1);
    }

    #[test]
    fn reset_re_arms_the_logout_after_a_new_login() {
        let (interceptor, store, navigator, notices) = setup();

        interceptor.handle(&failure_with_code("TOKEN_EXPIRED"));
        begin_session(&*store, "tok-2", "alice");
        interceptor.reset();
        interceptor.handle(&failure_with_code("TOKEN_EXPIRED"));

        assert_eq!(notices.messages().len(), 2);
        assert_eq!(store.get(keys::TOKEN), None);
    }

    #[test]
    fn generic_failures_surface_the_server_message_and_keep_the_session() {
        let (interceptor, store, navigator, notices) = setup();

        interceptor.handle(&ApiFailure {
            status: Some(500),
            body: Some(ApiErrorBody {
                status: false,
                error: Some("Query Error".to_string()),
                code: None,
            }),
        });

        assert_eq!(notices.messages(), vec!["Query Error".to_string()]);
        assert!(navigator.replacements().is_empty());
        assert_eq!(store.get(keys::TOKEN).as_deref(), Some("tok"));
    }

    #[test]
    fn generic_failures_without_a_message_use_the_fallback() {
        let (interceptor, _store, _navigator, notices) = setup();

        interceptor.handle(&ApiFailure {
            status: Some(500),
            body: None,
        });

        assert_eq!(notices.messages(), vec![FALLBACK_NOTICE.to_string()]);
    }

    #[test]
    fn failure_while_already_on_login_does_not_navigate_again() {
        let store = Arc::new(InMemorySessionStore::new());
        begin_session(&*store, "tok", "alice");
        let navigator = Arc::new(RecordingNavigator::starting_at(LOGIN_ROUTE));
        let notices = Arc::new(RecordingNotices::new());
        let interceptor =
            AuthFailureInterceptor::new(store.clone(), navigator.clone(), notices.clone());

        interceptor.handle(&ApiFailure {
            status: Some(401),
            body: None,
        });

        assert!(navigator.replacements().is_empty());
        assert_eq!(notices.messages().len(), 1);
    }

    #[test]
    fn error_body_deserializes_the_backend_wire_shape() {
        let body: ApiErrorBody = serde_json::from_str(
            r#"{ "Status": false, "Error": "jwt expired", "Code": "TOKEN_EXPIRED" }"#,
        )
        .unwrap();

        assert!(!body.status);
        assert_eq!(body.error.as_deref(), Some("jwt expired"));
        assert_eq!(body.code.as_deref(), Some("TOKEN_EXPIRED"));

        let minimal: ApiErrorBody = serde_json::from_str(r#"{ "Status": true }"#).unwrap();
        assert_eq!(minimal.error, None);
        assert_eq!(minimal.code, None);
    }
}
