//! Thin campaign consumer demonstrating how business handlers consume the
//! resolver's decision: brand filtering on reads, write gating plus an
//! explicit brand grant on mutations. Real campaign persistence lives
//! elsewhere and is out of scope here.

use std::sync::{Arc, RwLock};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use clout_auth::Brand;

use crate::app::AppState;
use crate::errors::json_error;
use crate::resolver::{RequireRead, RequireWrite};

#[derive(Debug, Clone, Serialize)]
pub struct Campaign {
    pub id: u64,
    pub name: String,
    pub brand: Brand,
}

/// In-memory sample store; enough to exercise the authorization boundary.
#[derive(Clone, Default)]
pub struct CampaignStore {
    inner: Arc<RwLock<Vec<Campaign>>>,
}

impl CampaignStore {
    pub fn with_samples() -> Self {
        let store = Self::default();
        {
            let mut campaigns = store.inner.write().expect("campaign store poisoned");
            campaigns.push(Campaign { id: 1, name: "Spring push".into(), brand: Brand::Tl });
            campaigns.push(Campaign { id: 2, name: "Loyalty relaunch".into(), brand: Brand::Be });
            campaigns.push(Campaign { id: 3, name: "Awareness wave".into(), brand: Brand::Am });
        }
        store
    }
}

#[derive(Deserialize)]
pub struct NewCampaign {
    pub name: String,
    pub brand: String,
}

/// Reads treat an empty brand scope as unrestricted (the resolver's
/// documented default reading).
pub async fn list(
    RequireRead(ctx): RequireRead,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let campaigns = state.campaigns.inner.read().expect("campaign store poisoned");
    let visible: Vec<Campaign> = campaigns
        .iter()
        .filter(|c| ctx.allows_brand(c.brand))
        .cloned()
        .collect();
    Json(visible)
}

/// Writes require an explicit brand grant: an empty scope is not a license
/// to mutate every tenant.
pub async fn create(
    RequireWrite(ctx): RequireWrite,
    State(state): State<AppState>,
    Json(body): Json<NewCampaign>,
) -> axum::response::Response {
    let Some(brand) = Brand::parse(&body.brand) else {
        return json_error(StatusCode::BAD_REQUEST, "invalid_brand", "brand must be one of: TL, BE, AM");
    };

    if !ctx.holds_brand(brand) {
        return json_error(StatusCode::FORBIDDEN, "forbidden", "brand not in granted scope");
    }

    let mut campaigns = state.campaigns.inner.write().expect("campaign store poisoned");
    let id = campaigns.iter().map(|c| c.id).max().unwrap_or(0) + 1;
    let campaign = Campaign { id, name: body.name, brand };
    campaigns.push(campaign.clone());

    (StatusCode::CREATED, Json(campaign)).into_response()
}
