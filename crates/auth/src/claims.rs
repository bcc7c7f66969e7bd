//! Session token claims model and local decoding.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims embedded in the session token issued at login.
///
/// Role flags are numeric on the wire; `1` means granted, anything else
/// (including an absent field) means not granted. Unknown fields such as the
/// user id or display name are ignored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Role category; `1` identifies an administrator.
    #[serde(rename = "categoryId")]
    pub category_id: i64,

    #[serde(default)]
    pub sales: i64,

    #[serde(default)]
    pub accounting: i64,

    #[serde(default)]
    pub production: i64,

    #[serde(default)]
    pub artist: i64,

    #[serde(default)]
    pub operator: i64,

    #[serde(default)]
    pub active: i64,

    /// Expiry, seconds since the Unix epoch, set by the issuing backend.
    pub exp: i64,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidTokenError {
    #[error("token is structurally malformed")]
    Malformed,

    #[error("token has expired")]
    Expired,
}

/// Decode a session token into its claims.
///
/// Decoding is local and synchronous. The signature is *not* verified: the
/// client never holds the signing key and the backend re-checks every
/// request. The embedded expiry is enforced with zero leeway.
///
/// Callers must treat any error as "no session"; a failed decode is never
/// an authenticated state.
pub fn decode(token: &str) -> Result<TokenClaims, InvalidTokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.leeway = 0;

    jsonwebtoken::decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .map_err(|err| match err.kind() {
            ErrorKind::ExpiredSignature => InvalidTokenError::Expired,
            _ => InvalidTokenError::Malformed,
        })
}
