//! Page handlers. These sit behind the gateway middleware, so their
//! resolver calls ride the fast path on gateway-injected headers.

use axum::response::{Html, IntoResponse};

use crate::resolver::RequireRead;

pub async fn home(RequireRead(ctx): RequireRead) -> impl IntoResponse {
    let brands = ctx
        .brands
        .iter()
        .map(|b| b.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    Html(format!(
        "<h1>Clout campaigns</h1><p>Signed in as {} ({})</p>",
        ctx.email,
        if brands.is_empty() { "all brands".to_string() } else { brands },
    ))
}
