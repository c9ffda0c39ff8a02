//! Consistent JSON error responses.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use clout_auth::AuthRejection;

pub fn json_error(
    status: StatusCode,
    code: &str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Renders a fully formed rejection: status from the taxonomy, body
/// `{"error": ..., "reason": ...}` with `reason` omitted when absent.
/// Handlers return this as-is; an auth failure is never masked into a 200.
pub fn rejection_response(rejection: &AuthRejection) -> axum::response::Response {
    let status =
        StatusCode::from_u16(rejection.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let body = match rejection.reason() {
        Some(reason) => json!({ "error": rejection.error_code(), "reason": reason }),
        None => json!({ "error": rejection.error_code() }),
    };

    (status, axum::Json(body)).into_response()
}
