//! Process configuration, read once at startup.

use clout_auth::AuthMode;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind: String,
    /// Base URL of the identity service.
    pub identity_base_url: String,
    /// Application slug declared on every verification call.
    pub app_slug: String,
    /// Identity provider sign-in page used for gateway redirects.
    pub sign_in_url: String,
    pub auth_mode: AuthMode,
    /// Shared secret stamped by the gateway and required by the resolver
    /// fast path when set.
    pub gateway_secret: Option<String>,
    /// Controls the `Secure` attribute on non-host-scoped cookies.
    pub production: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let identity_base_url = std::env::var("CLOUT_IDENTITY_BASE_URL").unwrap_or_else(|_| {
            tracing::warn!("CLOUT_IDENTITY_BASE_URL not set; using local dev default");
            "http://127.0.0.1:8300".to_string()
        });

        let sign_in_url = std::env::var("CLOUT_SIGN_IN_URL")
            .unwrap_or_else(|_| format!("{identity_base_url}/sign-in"));

        let auth_mode = AuthMode::parse(
            &std::env::var("CLOUT_AUTH_MODE").unwrap_or_else(|_| "enforced".to_string()),
        );
        if auth_mode == AuthMode::Bypassed {
            tracing::warn!("auth mode BYPASSED - DO NOT USE IN PRODUCTION");
        }

        let gateway_secret = std::env::var("CLOUT_GATEWAY_SECRET").ok().filter(|s| !s.is_empty());
        if gateway_secret.is_none() {
            tracing::warn!(
                "CLOUT_GATEWAY_SECRET not set; resolver fast path trusts header presence alone"
            );
        }

        Self {
            bind: std::env::var("CLOUT_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            identity_base_url,
            app_slug: std::env::var("CLOUT_APP_SLUG")
                .unwrap_or_else(|_| "clout-campaigns".to_string()),
            sign_in_url,
            auth_mode,
            gateway_secret,
            production: std::env::var("CLOUT_PRODUCTION")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }
}
