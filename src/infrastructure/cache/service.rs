//! Cache service trait and error types.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors that can occur during cache operations.
#[derive(Debug)]
pub enum CacheError {
    ConnectionError(String),
    OperationError(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Cache connection error: {}", e),
            Self::OperationError(e) => write!(f, "Cache operation error: {}", e),
        }
    }
}

impl std::error::Error for CacheError {}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// The immutable part of a short link needed to resolve a redirect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedLink {
    pub original_url: String,
    pub expires_at: DateTime<Utc>,
}

/// Trait for caching short link lookups.
///
/// Short links never change after creation, so a cached entry can only be
/// stale by being absent. Expiry is decided by the caller from
/// `expires_at`, never from cache TTL.
///
/// Implementations must be thread-safe and handle errors gracefully without
/// disrupting the application (cache failures should degrade to store lookups).
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the cached link for a short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(link))` on cache hit
    /// - `Ok(None)` on cache miss or error (fail-open behavior)
    ///
    /// # Errors
    ///
    /// Should not return errors in production implementations. Errors are logged
    /// and treated as cache misses.
    async fn get_link(&self, short_code: &str) -> CacheResult<Option<CachedLink>>;

    /// Stores a link under its short code with the backend's configured TTL.
    ///
    /// # Errors
    ///
    /// Should not propagate errors to callers. Implementations should log errors
    /// and return `Ok(())` to avoid disrupting the request flow.
    async fn set_link(&self, short_code: &str, link: &CachedLink) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    ///
    /// Used by health check endpoints to report cache status.
    async fn health_check(&self) -> bool;

    /// Backend name for logs and health output.
    fn name(&self) -> &'static str;
}
