use thiserror::Error;

/// Terminal authorization rejection.
///
/// A handler either gets a fully valid [`crate::AuthContext`] or one of
/// these; no partial state leaks into business logic. Each variant carries
/// its HTTP mapping so transport layers render rejections uniformly.
///
/// The 503 variants are deliberately distinct from the 401/403 ones:
/// they mean the trust service itself is failing, which operators alert on
/// separately from ordinary denials.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthRejection {
    /// No credential was presented at all.
    #[error("not authenticated")]
    NotAuthenticated,

    /// The upstream verifier rejected the credential (401).
    #[error("invalid or expired token")]
    InvalidOrExpiredToken,

    /// Valid credential, but the identity has no permission for this app.
    #[error("unauthorized: {}", reason.as_deref().unwrap_or("no_app_permission"))]
    Unauthorized { reason: Option<String> },

    /// Valid identity attempted a write without a write-capable level, or
    /// addressed a brand outside its grant.
    #[error("forbidden")]
    Forbidden,

    /// The verification call failed at the transport level (timeout,
    /// connection error) after all allowed attempts.
    #[error("identity verification fetch failed")]
    VerifyFetchFailed,

    /// The verifier answered with an unexpected status.
    #[error("identity verifier unavailable (upstream status {status})")]
    VerifyUnavailable { status: u16 },

    /// The verifier answered 2xx but the payload failed schema validation.
    /// Treated as a server-side trust failure, not a caller error.
    #[error("identity verifier returned a malformed payload")]
    BadVerifyPayload,
}

impl AuthRejection {
    pub fn status(&self) -> u16 {
        match self {
            AuthRejection::NotAuthenticated | AuthRejection::InvalidOrExpiredToken => 401,
            AuthRejection::Unauthorized { .. } | AuthRejection::Forbidden => 403,
            AuthRejection::VerifyFetchFailed
            | AuthRejection::VerifyUnavailable { .. }
            | AuthRejection::BadVerifyPayload => 503,
        }
    }

    /// Machine-readable `error` field of the JSON body.
    pub fn error_code(&self) -> String {
        match self {
            AuthRejection::NotAuthenticated => "not_authenticated".to_string(),
            AuthRejection::InvalidOrExpiredToken
            | AuthRejection::VerifyFetchFailed
            | AuthRejection::BadVerifyPayload => "auth_failed".to_string(),
            AuthRejection::Unauthorized { .. } => "unauthorized".to_string(),
            AuthRejection::Forbidden => "forbidden".to_string(),
            AuthRejection::VerifyUnavailable { status } => format!("auth_failed:{status}"),
        }
    }

    /// `reason` field of the JSON body, distinguishing trust-service
    /// failures from authorization denials for operability.
    pub fn reason(&self) -> Option<&str> {
        match self {
            AuthRejection::NotAuthenticated | AuthRejection::Forbidden => None,
            AuthRejection::InvalidOrExpiredToken => Some("invalid_or_expired_token"),
            AuthRejection::Unauthorized { reason } => {
                Some(reason.as_deref().unwrap_or("no_app_permission"))
            }
            AuthRejection::VerifyFetchFailed => Some("verify_fetch_failed"),
            AuthRejection::VerifyUnavailable { .. } => Some("verify_unavailable"),
            AuthRejection::BadVerifyPayload => Some("verify_bad_payload"),
        }
    }
}
