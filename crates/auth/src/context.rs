use serde::{Deserialize, Serialize};

use crate::{Brand, PermissionLevel};

/// Resolved identity and authorization scope for a single request.
///
/// Immutable once built, never cached across requests. An `AuthContext` is
/// only ever constructed from a path that confirmed the identity: either the
/// gateway-verified trusted headers or a successful upstream verification.
/// Raw client-supplied claims must never reach this constructor.
///
/// # Brand scoping
///
/// `brands` may be empty, which this layer reads as "no tenant restriction
/// applied here". Callers that require an explicit grant (typically write
/// paths) must intersect against their own allow-list instead of treating
/// empty as all-access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Opaque external identity, non-empty.
    pub user_id: String,
    /// Non-empty; kept for audit logging.
    pub email: String,
    pub display_name: Option<String>,
    pub permission_level: PermissionLevel,
    /// Deduplicated, first-seen order.
    pub brands: Vec<Brand>,
}

impl AuthContext {
    /// True iff the context grants access to `brand`.
    ///
    /// An empty brand list means unrestricted at this layer.
    pub fn allows_brand(&self, brand: Brand) -> bool {
        self.brands.is_empty() || self.brands.contains(&brand)
    }

    /// True iff the context explicitly holds `brand` (empty list is not a
    /// grant). Used by callers that require an explicit tenant grant.
    pub fn holds_brand(&self, brand: Brand) -> bool {
        self.brands.contains(&brand)
    }

    pub fn can_write(&self) -> bool {
        self.permission_level.can_write()
    }
}
