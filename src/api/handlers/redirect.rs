//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use std::net::SocketAddr;
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::request_info::{client_ip, referrer};

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Resolve the client IP (forwarding headers only when behind a proxy)
/// 2. Look up the link (cache, then storage) and check expiry
/// 3. Record the click with referrer and location
/// 4. Return 302 Found
///
/// # Errors
///
/// - 404 if the short code doesn't exist
/// - 410 if the link has expired (no click is recorded)
/// - 500 if the click cannot be stored
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<impl IntoResponse, AppError> {
    let ip = client_ip(&headers, addr, state.behind_proxy);

    let original_url = state
        .link_service
        .resolve_and_record_click(&code, &ip, referrer(&headers))
        .await?;

    debug!(code = %code, "Redirecting");

    Ok((StatusCode::FOUND, [(header::LOCATION, original_url)]))
}
