use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::resolver::RequireRead;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(RequireRead(ctx): RequireRead) -> impl IntoResponse {
    Json(serde_json::json!({
        "user_id": ctx.user_id,
        "email": ctx.email,
        "display_name": ctx.display_name,
        "permission_level": ctx.permission_level.as_str(),
        "brands": ctx.brands.iter().map(|b| b.as_str()).collect::<Vec<_>>(),
        "can_write": ctx.can_write(),
    }))
}
