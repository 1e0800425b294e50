//! Request metadata extraction from HTTP headers.

use axum::http::{HeaderMap, header};
use std::net::SocketAddr;

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_REAL_IP: &str = "x-real-ip";
const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Returns the `Host` header value, port included.
///
/// Returns `None` if the header is missing, blank, or not valid UTF-8.
pub fn host_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map(str::to_string)
}

/// Determines the client IP for click recording.
///
/// When `behind_proxy` is set, the first `X-Forwarded-For` entry wins, then
/// `X-Real-IP`; otherwise (or when neither header is usable) the socket peer
/// address is used. Only enable `behind_proxy` behind a trusted reverse proxy,
/// since clients can set these headers freely.
pub fn client_ip(headers: &HeaderMap, peer: SocketAddr, behind_proxy: bool) -> String {
    if behind_proxy {
        let forwarded = headers
            .get(X_FORWARDED_FOR)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|ip| !ip.is_empty());

        if let Some(ip) = forwarded {
            return ip.to_string();
        }

        let real_ip = headers
            .get(X_REAL_IP)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|ip| !ip.is_empty());

        if let Some(ip) = real_ip {
            return ip.to_string();
        }
    }

    peer.ip().to_string()
}

/// Returns the `Referer` header, if present and valid UTF-8.
pub fn referrer(headers: &HeaderMap) -> Option<&str> {
    headers.get(header::REFERER).and_then(|v| v.to_str().ok())
}

/// Scheme used when composing externally visible links.
///
/// Honors `X-Forwarded-Proto: https` only behind a proxy.
pub fn request_scheme(headers: &HeaderMap, behind_proxy: bool) -> &'static str {
    let forwarded_https = behind_proxy
        && headers
            .get(X_FORWARDED_PROTO)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("https"));

    if forwarded_https { "https" } else { "http" }
}
