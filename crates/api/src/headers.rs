//! Trusted identity headers set by the gateway tier.
//!
//! These headers are the fast path's sole channel of trust. The gateway is
//! the only component allowed to set them, and it strips them from every
//! inbound request first, so an external client can never smuggle them in.
//! `x-clout-request-id` is deliberately not in the strip set: it is a
//! tracing id propagated from the outer edge, not a trust signal.

use axum::http::{HeaderMap, HeaderValue};

use clout_identity::VerifiedIdentity;

pub const USER_ID: &str = "x-clout-user-id";
pub const USER_EMAIL: &str = "x-clout-user-email";
pub const USER_NAME: &str = "x-clout-user-name";
pub const BRANDS: &str = "x-clout-brands";
pub const PERMISSION_LEVEL: &str = "x-clout-app-permission-level";
pub const REQUEST_ID: &str = clout_identity::client::REQUEST_ID_HEADER;

/// Internal marker carrying the gateway shared secret, when configured.
/// Presence of identity headers alone is not proof the gateway ran.
pub const GATEWAY_MARKER: &str = "x-clout-gateway";

const TRUSTED: [&str; 6] = [USER_ID, USER_EMAIL, USER_NAME, BRANDS, PERMISSION_LEVEL, GATEWAY_MARKER];

/// Removes every trusted header from an inbound request.
pub fn strip_trusted(headers: &mut HeaderMap) {
    for name in TRUSTED {
        headers.remove(name);
    }
}

/// Non-empty header value as a str, if present and valid.
pub fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
}

/// Injects the verified identity onto a forwarded request.
///
/// Values that are not valid header text (a display name with exotic
/// characters, say) are skipped rather than truncated; a missing optional
/// header never breaks the fast path, and a missing required one simply
/// routes the handler through the fallback verification.
pub fn inject_identity(headers: &mut HeaderMap, identity: &VerifiedIdentity, secret: Option<&str>) {
    set(headers, USER_ID, &identity.user_id);
    set(headers, USER_EMAIL, &identity.email);
    if let Some(name) = &identity.full_name {
        set(headers, USER_NAME, name);
    }
    set(headers, PERMISSION_LEVEL, identity.permission_level.as_str());
    let brands = identity
        .brands
        .iter()
        .map(|b| b.as_str())
        .collect::<Vec<_>>()
        .join(",");
    set(headers, BRANDS, &brands);
    if let Some(secret) = secret {
        set(headers, GATEWAY_MARKER, secret);
    }
}

fn set(headers: &mut HeaderMap, name: &'static str, value: &str) {
    match HeaderValue::from_str(value) {
        Ok(v) => {
            headers.insert(name, v);
        }
        Err(_) => {
            tracing::warn!(header = name, "dropping non-encodable trusted header value");
        }
    }
}
