//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /`, `POST /shorturls`     - Create a short link
//! - `GET  /{code}`                  - Redirect (302)
//! - `GET  /stats/{code}` and aliases - Click statistics
//! - `GET  /health`                  - Health check: storage, cache
//! - anything else, including a wrong method on a known path
//!                                     - 404 `{"error": "Endpoint not found"}`
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::not_found_handler;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Routes, fallback and tracing, without path normalization.
pub fn router(state: AppState) -> Router {
    api::routes::public_routes()
        .fallback(not_found_handler)
        .method_not_allowed_fallback(not_found_handler)
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
///
/// The returned service expects `ConnectInfo<SocketAddr>` for the redirect
/// route; serve it with `into_make_service_with_connect_info`.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
