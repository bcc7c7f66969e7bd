//! Capability resolution from decoded claims.

use serde::{Deserialize, Serialize};

use crate::claims::TokenClaims;

/// Role category identifying an administrator.
pub const ADMIN_CATEGORY_ID: i64 = 1;

/// Resolved, read-only capability view of [`TokenClaims`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSet {
    pub is_admin: bool,
    pub is_sales: bool,
    pub is_accounting: bool,
    pub is_production: bool,
    pub is_artist: bool,
    pub is_operator: bool,
    pub is_active: bool,
    pub category_id: i64,
}

/// Derive the capability set for a set of decoded claims.
///
/// - No IO
/// - No panics
/// - Total over valid claims
///
/// Flag values other than exactly `1` are treated as not granted.
pub fn resolve(claims: &TokenClaims) -> PermissionSet {
    PermissionSet {
        is_admin: claims.category_id == ADMIN_CATEGORY_ID,
        is_sales: claims.sales == 1,
        is_accounting: claims.accounting == 1,
        is_production: claims.production == 1,
        is_artist: claims.artist == 1,
        is_operator: claims.operator == 1,
        is_active: claims.active == 1,
        category_id: claims.category_id,
    }
}
