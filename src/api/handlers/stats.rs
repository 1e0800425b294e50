//! Handler for link statistics endpoint.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the click statistics of a short link.
///
/// # Endpoint
///
/// `GET /stats/{code}`, `GET /shorturls/{code}`, `GET /shorturls/stats/{code}`
///
/// Expired links still report their statistics.
///
/// # Response
///
/// ```json
/// {
///   "originalUrl": "https://example.com",
///   "createdAt": "2025-01-01T12:00:00.000Z",
///   "expiry": "2025-01-01T12:30:00.000Z",
///   "totalClicks": 1,
///   "clicks": [
///     { "timestamp": "2025-01-01T12:01:00.000Z", "referrer": "direct", "location": "CA, US" }
///   ]
/// }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn stats_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<StatsResponse>, AppError> {
    let link = state.stats_service.get_stats(&code).await?;

    Ok(Json(StatsResponse::from(link)))
}
