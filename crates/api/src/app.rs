//! Application wiring (router + shared state).

use std::sync::Arc;

use axum::Router;
use axum::extract::FromRef;

use clout_identity::{IdentityClient, IdentityConfig};

use crate::config::AppConfig;
use crate::gateway::{self, GatewayState};
use crate::resolver::Resolver;
use crate::routes::{self, campaigns::CampaignStore};

#[derive(Clone)]
pub struct AppState {
    pub resolver: Resolver,
    pub campaigns: CampaignStore,
    pub sign_in_url: String,
    pub production: bool,
}

impl FromRef<AppState> for Resolver {
    fn from_ref(state: &AppState) -> Self {
        state.resolver.clone()
    }
}

/// Builds the full router (public entrypoint used by `main.rs` and the
/// black-box tests). Gateway middleware wraps everything; API routes are on
/// its bypass list and authenticate through the resolver instead.
pub fn build_app(config: AppConfig) -> anyhow::Result<Router> {
    let verifier = Arc::new(IdentityClient::new(IdentityConfig {
        base_url: config.identity_base_url.clone(),
        app_slug: config.app_slug.clone(),
    })?);

    let state = AppState {
        resolver: Resolver::new(
            verifier.clone(),
            config.auth_mode,
            config.gateway_secret.clone(),
        ),
        campaigns: CampaignStore::with_samples(),
        sign_in_url: config.sign_in_url.clone(),
        production: config.production,
    };

    let gateway_state = GatewayState {
        verifier,
        sign_in_url: config.sign_in_url,
        mode: config.auth_mode,
        gateway_secret: config.gateway_secret,
    };

    Ok(routes::router()
        .with_state(state)
        .layer(axum::middleware::from_fn_with_state(
            gateway_state,
            gateway::gateway_middleware,
        )))
}
