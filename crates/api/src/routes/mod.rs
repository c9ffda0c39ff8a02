use axum::{Router, routing::get};

use crate::app::AppState;

pub mod campaigns;
pub mod pages;
pub mod session;
pub mod system;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home))
        .route("/health", get(system::health))
        .route("/api/whoami", get(system::whoami))
        .route(
            "/api/campaigns",
            get(campaigns::list).post(campaigns::create),
        )
        .route("/auth/callback", get(session::callback))
        .route("/auth/logout", get(session::logout))
}
