//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
};
use serde_json::json;

use crate::api::dto::format_timestamp;
use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::request_info::{host_from_headers, request_scheme};

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /` and `POST /shorturls`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/some/long/path",
///   "validity": 30,          // optional, minutes; number or numeric string
///   "shortcode": "my-link"   // optional
/// }
/// ```
///
/// # Response
///
/// **201 Created**
///
/// ```json
/// {
///   "shortlink": "http://localhost:8080/my-link",
///   "expiry": "2025-01-01T12:30:00.000Z"
/// }
/// ```
///
/// # Errors
///
/// - 400 `invalid_url`, `invalid_validity`, `invalid_code_format`, `invalid_request`
/// - 409 `code_conflict`
/// - 500 `code_generation_exhausted`, `internal_error`
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        AppError::invalid_request(
            "Request body must be a JSON object",
            json!({ "reason": rejection.body_text() }),
        )
    })?;

    let validity = payload.validity_minutes();

    let link = state
        .link_service
        .create_short_link(payload.url, validity, payload.shortcode)
        .await?;

    let shortlink = short_link_url(&state, &headers, &link.short_code);

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            shortlink,
            expiry: format_timestamp(link.expires_at),
        }),
    ))
}

/// Builds the public URL for a code.
///
/// Uses the configured base URL when present, otherwise the scheme and
/// `Host` of the incoming request (`localhost` if the header is missing).
fn short_link_url(state: &AppState, headers: &HeaderMap, code: &str) -> String {
    if let Some(base_url) = &state.base_url {
        return format!("{}/{}", base_url, code);
    }

    let scheme = request_scheme(headers, state.behind_proxy);
    let host = host_from_headers(headers).unwrap_or_else(|| "localhost".to_string());

    format!("{}://{}/{}", scheme, host, code)
}
