//! Route access policy for the protected dashboard sections.
//!
//! The policy is one declarative table. The guard and any menu/visibility
//! logic must read this table and nothing else, so a new route cannot be
//! open in one place and closed in another. Unknown route keys deny.

use printdesk_core::LOGIN_ROUTE;

use crate::permissions::{ADMIN_CATEGORY_ID, PermissionSet};

/// Workspace route keys used as redirect targets.
pub mod routes {
    /// Administrator landing section.
    pub const ADMIN_HOME: &str = "dashboard";
    pub const SALES_HOME: &str = "dashsales";
    pub const ACCOUNTING_HOME: &str = "payment";
    pub const PRODUCTION_HOME: &str = "prod";
    pub const ARTIST_HOME: &str = "artistlog";
    pub const OPERATOR_HOME: &str = "printlog";
}

/// One policy row: the route keys it covers and the predicate that admits
/// a non-admin, active account.
struct RouteRule {
    keys: &'static [&'static str],
    allowed: fn(&PermissionSet) -> bool,
}

const RULES: &[RouteRule] = &[
    RouteRule {
        keys: &["dashsales", "quotes", "orders", "sales-report"],
        allowed: |p| p.is_sales,
    },
    RouteRule {
        keys: &["soa", "client"],
        allowed: |p| p.is_sales || p.is_accounting || p.is_production,
    },
    RouteRule {
        keys: &["prod"],
        allowed: |p| p.is_production,
    },
    RouteRule {
        keys: &["wiplog"],
        allowed: |p| p.is_production || p.is_operator,
    },
    RouteRule {
        keys: &["billing"],
        allowed: |p| p.is_production || p.is_accounting,
    },
    RouteRule {
        keys: &["payment", "receive-payment", "payment-inquiry", "invoice-inquiry"],
        allowed: |p| p.is_accounting,
    },
    RouteRule {
        keys: &["artistlog"],
        allowed: |p| p.is_artist,
    },
    RouteRule {
        keys: &["printlog"],
        allowed: |p| p.is_operator,
    },
    RouteRule {
        keys: &[
            "material",
            "employee",
            "category",
            "profile",
            "check-order-total",
            "material-usage-report",
        ],
        allowed: |p| p.category_id == ADMIN_CATEGORY_ID || p.is_production,
    },
];

/// Every route key the policy knows about.
///
/// Menu/visibility code should enumerate this instead of keeping its own
/// route list.
pub fn known_routes() -> impl Iterator<Item = &'static str> {
    RULES.iter().flat_map(|rule| rule.keys.iter().copied())
}

/// Whether `route` may render for `perms`.
///
/// Administrators bypass the table entirely; a deactivated account is
/// denied every protected route regardless of role; unknown keys deny.
pub fn can_access(route: &str, perms: &PermissionSet) -> bool {
    if perms.is_admin {
        return true;
    }
    if !perms.is_active {
        return false;
    }

    RULES
        .iter()
        .find(|rule| rule.keys.iter().any(|key| *key == route))
        .is_some_and(|rule| (rule.allowed)(perms))
}

/// Where a denied navigation lands.
///
/// First matching role in fixed priority order: admin, sales, accounting,
/// production, artist, operator. The order is deliberate so a multi-role
/// user always lands on the same workspace. With no role at all the only
/// place left is the login screen.
pub fn default_route(perms: &PermissionSet) -> &'static str {
    if perms.is_admin {
        routes::ADMIN_HOME
    } else if perms.is_sales {
        routes::SALES_HOME
    } else if perms.is_accounting {
        routes::ACCOUNTING_HOME
    } else if perms.is_production {
        routes::PRODUCTION_HOME
    } else if perms.is_artist {
        routes::ARTIST_HOME
    } else if perms.is_operator {
        routes::OPERATOR_HOME
    } else {
        LOGIN_ROUTE
    }
}
