//! Edge gateway middleware.
//!
//! Gates every page request before it reaches application code: verify the
//! cookie credential upstream (with a bounded retry for transport failures
//! only), inject trusted identity headers on success, redirect to sign-in on
//! any failure. The gateway protects human navigation, so it never answers a
//! browser with a raw 401/5xx.

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, Uri};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use clout_auth::AuthMode;
use clout_identity::{IdentityClient, VerifyOutcome, verify_with_retry};

use crate::{headers, token};

/// Path prefixes that bypass gateway authentication: API routes run their
/// own resolver, static assets are public, and the sign-in callback and
/// logout must be reachable without a session.
pub const BYPASS_PREFIXES: [&str; 5] =
    ["/api/", "/assets/", "/auth/callback", "/auth/logout", "/health"];

#[derive(Clone)]
pub struct GatewayState {
    pub verifier: Arc<IdentityClient>,
    pub sign_in_url: String,
    pub mode: AuthMode,
    pub gateway_secret: Option<String>,
}

pub fn is_bypass(path: &str) -> bool {
    BYPASS_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix) || path == prefix.trim_end_matches('/'))
}

pub async fn gateway_middleware(
    State(state): State<GatewayState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    // External clients must never be able to smuggle trusted headers in,
    // whatever path they hit.
    headers::strip_trusted(req.headers_mut());

    let path = req.uri().path();
    if is_bypass(path) || state.mode == AuthMode::Bypassed {
        return next.run(req).await;
    }

    // Browser navigations carry no Authorization header; cookies only.
    // The generic session cookie is deliberately excluded here.
    let jar = CookieJar::from_headers(req.headers());
    let Some(token) = token::cookie_token(&jar, false) else {
        return sign_in_redirect(&state, req.uri(), None);
    };

    let request_id = headers::header_str(req.headers(), headers::REQUEST_ID).map(str::to_string);
    let outcome = verify_with_retry(|| state.verifier.verify(&token, request_id.as_deref())).await;

    match outcome {
        Ok(VerifyOutcome::Allowed(identity)) => {
            tracing::debug!(user_id = %identity.user_id, path, "gateway verified page request");
            headers::inject_identity(
                req.headers_mut(),
                &identity,
                state.gateway_secret.as_deref(),
            );
            next.run(req).await
        }
        // Expired or invalid session: ordinary sign-in flow, no marker.
        Ok(VerifyOutcome::InvalidToken) => sign_in_redirect(&state, req.uri(), None),
        Ok(VerifyOutcome::Denied { reason }) => {
            tracing::info!(?reason, path, "gateway denied page request");
            sign_in_redirect(&state, req.uri(), Some("auth_failed"))
        }
        Ok(VerifyOutcome::Unavailable { status }) => {
            tracing::warn!(status, path, "identity verifier unusable during page request");
            sign_in_redirect(&state, req.uri(), Some("auth_failed"))
        }
        Ok(VerifyOutcome::BadPayload) => {
            tracing::error!(path, "identity verifier payload malformed during page request");
            sign_in_redirect(&state, req.uri(), Some("auth_failed"))
        }
        Err(e) => {
            tracing::error!(error = %e, path, "identity verify attempts exhausted");
            sign_in_redirect(&state, req.uri(), Some("unauthorized"))
        }
    }
}

/// Redirect to the identity provider's sign-in page, carrying the original
/// URL as the post-login return target and an optional error marker.
fn sign_in_redirect(state: &GatewayState, original: &Uri, error: Option<&str>) -> Response {
    let mut url = format!(
        "{}?redirect_url={}",
        state.sign_in_url,
        urlencoding::encode(&original.to_string())
    );
    if let Some(error) = error {
        url.push_str("&error=");
        url.push_str(error);
    }
    Redirect::temporary(&url).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bypass_prefixes() {
        assert!(is_bypass("/api/whoami"));
        assert!(is_bypass("/assets/app.css"));
        assert!(is_bypass("/auth/callback"));
        assert!(is_bypass("/auth/logout"));
        assert!(is_bypass("/health"));
        assert!(!is_bypass("/"));
        assert!(!is_bypass("/campaigns/overview"));
        assert!(!is_bypass("/auth-ish"));
    }
}
