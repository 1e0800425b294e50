//! API route configuration.

use crate::api::handlers::{
    health_handler, not_found_handler, redirect_handler, shorten_handler, stats_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All public routes.
///
/// # Endpoints
///
/// - `POST /`                        - Create a short link
/// - `POST /shorturls`               - Create a short link
/// - `GET  /health`                  - Health check
/// - `GET  /stats/{code}`            - Statistics for a link
/// - `GET  /shorturls/{code}`        - Statistics for a link
/// - `GET  /shorturls/stats/{code}`  - Statistics for a link
/// - `GET  /stats`                   - Always 404, like unknown routes
/// - `GET  /{code}`                  - Redirect to the original URL
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(shorten_handler))
        .route("/shorturls", post(shorten_handler))
        .route("/health", get(health_handler))
        .route("/stats/{code}", get(stats_handler))
        .route("/shorturls/{code}", get(stats_handler))
        .route("/shorturls/stats/{code}", get(stats_handler))
        // Reserved segment with no code; never a stored link.
        .route("/stats", get(not_found_handler))
        .route("/{code}", get(redirect_handler))
}
