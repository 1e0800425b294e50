//! Redis link cache.

use super::service::{CacheError, CacheResult, CacheService, CachedLink};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, error, info, warn};

/// Caches redirect targets as JSON strings under `link:<code>`.
///
/// Redis errors are logged and reported as misses, so a flaky cache only
/// costs a database round trip.
pub struct RedisCache {
    conn: ConnectionManager,
    ttl_seconds: u64,
    key_prefix: String,
}

impl RedisCache {
    /// Opens a managed connection and PINGs it once.
    ///
    /// Every entry is written with `ttl_seconds` (`CACHE_TTL_SECONDS`).
    pub async fn connect(redis_url: &str, ttl_seconds: u64) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut probe = manager.clone();
        probe
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self {
            conn: manager,
            ttl_seconds: ttl_seconds.max(1),
            key_prefix: "link:".to_string(),
        })
    }

    fn key_for(&self, short_code: &str) -> String {
        format!("{}{}", self.key_prefix, short_code)
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_link(&self, short_code: &str) -> CacheResult<Option<CachedLink>> {
        let key = self.key_for(short_code);
        let mut conn = self.conn.clone();

        match conn.get::<_, Option<String>>(&key).await {
            Ok(Some(raw)) => match serde_json::from_str::<CachedLink>(&raw) {
                Ok(link) => {
                    debug!(short_code, "Link cache hit");
                    Ok(Some(link))
                }
                Err(e) => {
                    warn!("Discarding malformed cache entry for {}: {}", short_code, e);
                    Ok(None)
                }
            },
            Ok(None) => {
                debug!(short_code, "Link cache miss");
                Ok(None)
            }
            Err(e) => {
                error!(short_code, error = %e, "Redis GET failed");
                Ok(None)
            }
        }
    }

    async fn set_link(&self, short_code: &str, link: &CachedLink) -> CacheResult<()> {
        let key = self.key_for(short_code);
        let mut conn = self.conn.clone();
        let ttl_seconds = self.ttl_seconds;

        let payload = serde_json::to_string(link)
            .map_err(|e| CacheError::OperationError(format!("Serialization failed: {}", e)))?;

        match conn.set_ex::<_, _, ()>(&key, payload, ttl_seconds).await {
            Ok(()) => {
                debug!(short_code, ttl_seconds, "Link cached");
                Ok(())
            }
            Err(e) => {
                warn!(short_code, error = %e, "Redis SET failed");
                Ok(())
            }
        }
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.conn.clone();
        conn.ping::<()>().await.is_ok()
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}
