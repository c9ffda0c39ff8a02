use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use clout_auth::{Brand, PermissionLevel};

/// Per-attempt timeout for the verification call.
pub const VERIFY_TIMEOUT: Duration = Duration::from_secs(5);

/// Tracing header propagated to the identity service (never generated here).
pub const REQUEST_ID_HEADER: &str = "x-clout-request-id";

/// Configuration for the identity verification client.
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// Base URL of the identity service (e.g. `https://id.example.com`).
    pub base_url: String,
    /// Application slug sent with every verification request.
    pub app_slug: String,
}

/// Identity claims confirmed by a successful upstream verification.
///
/// Permission level and brands are already normalized through the strict
/// `clout-auth` parsers; no loosely-typed upstream strings escape this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub user_id: String,
    pub email: String,
    pub full_name: Option<String>,
    pub permission_level: PermissionLevel,
    pub brands: Vec<Brand>,
}

/// Definitive answer from the identity service.
///
/// All of these are terminal for the credential at hand; none may be
/// retried. Transient failures are [`VerifyError::Transport`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyOutcome {
    Allowed(VerifiedIdentity),
    /// Upstream 401: the token itself is invalid or expired.
    InvalidToken,
    /// Upstream 403, or a 2xx body with `allowed=false`.
    Denied { reason: Option<String> },
    /// Any other non-2xx status: the verifier answered but unusably.
    Unavailable { status: u16 },
    /// 2xx body failing schema validation (missing user id or email).
    BadPayload,
}

/// Transient verification failure (timeout or transport error).
///
/// Never a judgment on the credential; the caller decides whether to retry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VerifyError {
    #[error("identity verify transport failure: {0}")]
    Transport(String),
}

#[derive(Serialize)]
struct VerifyRequest<'a> {
    app: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerifyResponse {
    allowed: bool,
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    user: Option<VerifyUser>,
    #[serde(default)]
    app_permission_level: Option<String>,
    #[serde(default)]
    brands: Option<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerifyUser {
    #[serde(default)]
    id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    full_name: Option<String>,
}

/// Client for `POST {base_url}/api/auth/verify`.
///
/// Performs exactly one attempt per [`IdentityClient::verify`] call; retry
/// policy belongs to the caller (see [`crate::retry`]).
pub struct IdentityClient {
    http: reqwest::Client,
    verify_url: String,
    app_slug: String,
}

impl IdentityClient {
    pub fn new(config: IdentityConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(VERIFY_TIMEOUT).build()?;
        Ok(Self {
            http,
            verify_url: format!("{}/api/auth/verify", config.base_url.trim_end_matches('/')),
            app_slug: config.app_slug,
        })
    }

    /// Verifies `token` against the identity service, one attempt.
    ///
    /// `request_id` is propagated for tracing when present.
    pub async fn verify(
        &self,
        token: &str,
        request_id: Option<&str>,
    ) -> Result<VerifyOutcome, VerifyError> {
        let mut req = self
            .http
            .post(&self.verify_url)
            .bearer_auth(token)
            .json(&VerifyRequest { app: &self.app_slug });

        if let Some(id) = request_id {
            req = req.header(REQUEST_ID_HEADER, id);
        }

        let resp = req.send().await.map_err(|e| {
            tracing::warn!(error = %e, "identity verify transport failure");
            VerifyError::Transport(e.to_string())
        })?;

        let status = resp.status();
        match status.as_u16() {
            401 => Ok(VerifyOutcome::InvalidToken),
            403 => {
                let reason = resp
                    .json::<VerifyResponse>()
                    .await
                    .ok()
                    .and_then(|body| body.reason);
                Ok(VerifyOutcome::Denied { reason })
            }
            s if status.is_success() => {
                let Ok(body) = resp.json::<VerifyResponse>().await else {
                    tracing::error!(status = s, "identity verify payload undecodable");
                    return Ok(VerifyOutcome::BadPayload);
                };
                Ok(Self::map_success(body))
            }
            s => {
                tracing::warn!(status = s, "identity verifier unavailable");
                Ok(VerifyOutcome::Unavailable { status: s })
            }
        }
    }

    fn map_success(body: VerifyResponse) -> VerifyOutcome {
        if !body.allowed {
            return VerifyOutcome::Denied { reason: body.reason };
        }

        let Some(user) = body.user else {
            return VerifyOutcome::BadPayload;
        };
        if user.id.is_empty() || user.email.is_empty() {
            return VerifyOutcome::BadPayload;
        }

        VerifyOutcome::Allowed(VerifiedIdentity {
            user_id: user.id,
            email: user.email,
            full_name: user.full_name,
            permission_level: PermissionLevel::parse(
                body.app_permission_level.as_deref().unwrap_or(""),
            ),
            brands: Brand::parse_slice(body.brands.as_deref().unwrap_or(&[])),
        })
    }
}
