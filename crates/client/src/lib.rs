//! `printdesk-client` — backend failure handling for the dashboard views.
//!
//! Classifies failed backend requests and turns session-invalidating ones
//! into a single forced logout. Request plumbing itself (base URL, bearer
//! header injection) belongs to the embedding HTTP layer.

pub mod interceptor;

pub use interceptor::{
    ApiErrorBody, ApiFailure, AuthFailureInterceptor, SESSION_EXPIRED_NOTICE, is_session_invalid,
};
