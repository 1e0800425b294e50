use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

/// Fallback for unknown routes.
pub async fn not_found_handler() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Endpoint not found" })),
    )
}
