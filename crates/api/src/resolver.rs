//! Per-request authorization context resolver.
//!
//! Two paths, both terminating in a context or a fully formed rejection:
//!
//! - **Fast path**: the gateway already verified this request and injected
//!   trusted headers; build the context with zero network calls.
//! - **Fallback path**: headers absent (direct API invocation, internal
//!   calls, header-propagation gaps). Extract a credential and verify it
//!   upstream, exactly once — the gateway tier already owns the retry
//!   budget, and a second one here would make API tail latency unpredictable.
//!
//! Correctness never depends on the gateway having run.

use std::sync::Arc;

use axum::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::{HeaderMap, request::Parts};
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;

use clout_auth::{AuthContext, AuthMode, AuthRejection, Brand, PermissionLevel};
use clout_identity::{IdentityClient, VerifyError, VerifyOutcome};

use crate::{errors, headers, token};

/// Access level a handler declares for the current operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

#[derive(Clone)]
pub struct Resolver {
    verifier: Arc<IdentityClient>,
    mode: AuthMode,
    /// Shared secret proving the trusted headers were set by our gateway.
    /// When unset, deployment topology is assumed to strip them at the edge.
    gateway_secret: Option<String>,
}

impl Resolver {
    pub fn new(verifier: Arc<IdentityClient>, mode: AuthMode, gateway_secret: Option<String>) -> Self {
        Self { verifier, mode, gateway_secret }
    }

    /// Resolves the request's authorization context.
    ///
    /// The fast path is always checked before any network call; a request
    /// carrying valid trusted headers never causes upstream load.
    pub async fn resolve(
        &self,
        headers: &HeaderMap,
        jar: &CookieJar,
        access: Access,
    ) -> Result<AuthContext, AuthRejection> {
        if self.mode == AuthMode::Bypassed {
            return Ok(Self::bypass_context());
        }

        if let Some(context) = self.trusted_header_context(headers) {
            return gate(context, access);
        }

        let Some(token) = token::extract_token(headers, jar, true) else {
            return Err(AuthRejection::NotAuthenticated);
        };

        let request_id = headers::header_str(headers, headers::REQUEST_ID);
        match self.verifier.verify(&token, request_id).await {
            Err(VerifyError::Transport(_)) => Err(AuthRejection::VerifyFetchFailed),
            Ok(VerifyOutcome::InvalidToken) => Err(AuthRejection::InvalidOrExpiredToken),
            Ok(VerifyOutcome::Denied { reason }) => Err(AuthRejection::Unauthorized { reason }),
            Ok(VerifyOutcome::Unavailable { status }) => {
                Err(AuthRejection::VerifyUnavailable { status })
            }
            Ok(VerifyOutcome::BadPayload) => Err(AuthRejection::BadVerifyPayload),
            Ok(VerifyOutcome::Allowed(identity)) => {
                let context = AuthContext {
                    user_id: identity.user_id,
                    email: identity.email,
                    display_name: identity.full_name,
                    permission_level: identity.permission_level,
                    brands: identity.brands,
                };
                gate(context, access)
            }
        }
    }

    /// Fast path: both identity headers present (and the gateway marker
    /// valid, when a secret is configured).
    fn trusted_header_context(&self, headers: &HeaderMap) -> Option<AuthContext> {
        if let Some(secret) = &self.gateway_secret {
            if headers::header_str(headers, headers::GATEWAY_MARKER) != Some(secret.as_str()) {
                return None;
            }
        }

        let user_id = headers::header_str(headers, headers::USER_ID)?;
        let email = headers::header_str(headers, headers::USER_EMAIL)?;

        Some(AuthContext {
            user_id: user_id.to_string(),
            email: email.to_string(),
            display_name: headers::header_str(headers, headers::USER_NAME).map(str::to_string),
            permission_level: PermissionLevel::parse(
                headers::header_str(headers, headers::PERMISSION_LEVEL).unwrap_or(""),
            ),
            brands: Brand::parse_list(
                headers::header_str(headers, headers::BRANDS).unwrap_or(""),
            ),
        })
    }

    /// The single audited short-circuit for `AuthMode::Bypassed`.
    fn bypass_context() -> AuthContext {
        AuthContext {
            user_id: "dev".to_string(),
            email: "dev@localhost".to_string(),
            display_name: Some("Development".to_string()),
            permission_level: PermissionLevel::Admin,
            brands: Brand::ALL.to_vec(),
        }
    }
}

fn gate(context: AuthContext, access: Access) -> Result<AuthContext, AuthRejection> {
    if access == Access::Write && !context.can_write() {
        return Err(AuthRejection::Forbidden);
    }
    Ok(context)
}

/// Extractor resolving a read-access context.
pub struct RequireRead(pub AuthContext);

/// Extractor resolving a context for a mutating operation; rejects with
/// 403 unless the permission level is write-capable.
pub struct RequireWrite(pub AuthContext);

async fn extract(parts: &mut Parts, resolver: &Resolver, access: Access) -> Result<AuthContext, Response> {
    let jar = CookieJar::from_headers(&parts.headers);
    resolver
        .resolve(&parts.headers, &jar, access)
        .await
        .map_err(|rejection| errors::rejection_response(&rejection))
}

#[async_trait]
impl<S> FromRequestParts<S> for RequireRead
where
    Resolver: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let resolver = Resolver::from_ref(state);
        extract(parts, &resolver, Access::Read).await.map(RequireRead)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequireWrite
where
    Resolver: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let resolver = Resolver::from_ref(state);
        extract(parts, &resolver, Access::Write).await.map(RequireWrite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use clout_identity::IdentityConfig;

    /// Verifier pointed at a dead port: any attempted call surfaces as
    /// `VerifyFetchFailed`, so a successful resolve proves the fast path
    /// made no network call.
    fn resolver(mode: AuthMode, secret: Option<&str>) -> Resolver {
        let client = IdentityClient::new(IdentityConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            app_slug: "clout-campaigns".to_string(),
        })
        .expect("client");
        Resolver::new(Arc::new(client), mode, secret.map(str::to_string))
    }

    fn trusted_headers(level: &str, brands: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(headers::USER_ID, HeaderValue::from_static("u1"));
        h.insert(headers::USER_EMAIL, HeaderValue::from_static("a@x.com"));
        h.insert(headers::PERMISSION_LEVEL, HeaderValue::from_str(level).unwrap());
        h.insert(headers::BRANDS, HeaderValue::from_str(brands).unwrap());
        h
    }

    #[tokio::test]
    async fn fast_path_is_network_free() {
        let r = resolver(AuthMode::Enforced, None);
        let ctx = r
            .resolve(&trusted_headers("edit", "TL,zz"), &CookieJar::new(), Access::Write)
            .await
            .expect("fast path should resolve without upstream");

        assert_eq!(ctx.user_id, "u1");
        assert_eq!(ctx.email, "a@x.com");
        assert_eq!(ctx.permission_level, PermissionLevel::Edit);
        assert_eq!(ctx.brands, vec![Brand::Tl]);
    }

    #[tokio::test]
    async fn fast_path_write_gate_rejects_view() {
        let r = resolver(AuthMode::Enforced, None);
        let err = r
            .resolve(&trusted_headers("view", "TL"), &CookieJar::new(), Access::Write)
            .await
            .unwrap_err();
        assert_eq!(err, AuthRejection::Forbidden);

        // Same headers are fine for a read.
        let ctx = r
            .resolve(&trusted_headers("view", "TL"), &CookieJar::new(), Access::Read)
            .await
            .unwrap();
        assert_eq!(ctx.permission_level, PermissionLevel::View);
    }

    #[tokio::test]
    async fn no_credential_rejects_without_network_call() {
        let r = resolver(AuthMode::Enforced, None);
        let err = r
            .resolve(&HeaderMap::new(), &CookieJar::new(), Access::Read)
            .await
            .unwrap_err();
        // A dead verifier port would have produced VerifyFetchFailed.
        assert_eq!(err, AuthRejection::NotAuthenticated);
    }

    #[tokio::test]
    async fn gateway_secret_guards_the_fast_path() {
        let r = resolver(AuthMode::Enforced, Some("s3cret"));

        // Headers without the marker fall through to the fallback path,
        // which hits the dead verifier.
        let err = r
            .resolve(&trusted_headers("admin", "TL"), &CookieJar::new(), Access::Read)
            .await
            .unwrap_err();
        assert_eq!(err, AuthRejection::NotAuthenticated);

        let mut with_marker = trusted_headers("admin", "TL");
        with_marker.insert(headers::GATEWAY_MARKER, HeaderValue::from_static("s3cret"));
        let ctx = r
            .resolve(&with_marker, &CookieJar::new(), Access::Read)
            .await
            .unwrap();
        assert_eq!(ctx.permission_level, PermissionLevel::Admin);

        let mut wrong = trusted_headers("admin", "TL");
        wrong.insert(headers::GATEWAY_MARKER, HeaderValue::from_static("nope"));
        let err = r
            .resolve(&wrong, &CookieJar::new(), Access::Read)
            .await
            .unwrap_err();
        assert_eq!(err, AuthRejection::NotAuthenticated);
    }

    #[tokio::test]
    async fn bypassed_mode_yields_fixed_dev_context() {
        let r = resolver(AuthMode::Bypassed, None);
        let ctx = r
            .resolve(&HeaderMap::new(), &CookieJar::new(), Access::Write)
            .await
            .unwrap();
        assert_eq!(ctx.user_id, "dev");
        assert_eq!(ctx.permission_level, PermissionLevel::Admin);
        assert_eq!(ctx.brands, Brand::ALL.to_vec());
    }
}
