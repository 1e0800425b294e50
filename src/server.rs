//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, migrations, cache and geolocation setup, and
//! the Axum server lifecycle.

use crate::config::{Config, StorageBackend};
use crate::domain::clock::SystemClock;
use crate::domain::repositories::{LinkRepository, StatsRepository};
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::geoip::build_geo_locator;
use crate::infrastructure::persistence::{InMemoryStore, PgLinkRepository, PgStatsRepository};
use crate::routes::app_router;
use crate::state::{AppState, PublicSettings};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Opens the PostgreSQL pool with the configured limits.
///
/// # Errors
///
/// Returns an error if no database URL is configured or the connection fails.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL is not configured")?;

    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(database_url)
        .await
        .context("Failed to connect to database")
}

/// Applies the embedded SQL migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to migrate")
}

/// Connects to Redis when configured, falling back to [`NullCache`].
pub async fn build_cache(config: &Config) -> Arc<dyn CacheService> {
    if let Some(redis_url) = &config.redis_url {
        match RedisCache::connect(redis_url, config.cache_ttl_seconds).await {
            Ok(redis) => {
                tracing::info!("Cache enabled (Redis)");
                Arc::new(redis)
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
                Arc::new(NullCache::new())
            }
        }
    } else {
        tracing::info!("Cache disabled (NullCache)");
        Arc::new(NullCache::new())
    }
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Storage (PostgreSQL pool + migrations, or the in-memory store)
/// - Redis cache (or NullCache fallback)
/// - Geolocation (MaxMind or disabled)
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let (link_repository, stats_repository, pool): (
        Arc<dyn LinkRepository>,
        Arc<dyn StatsRepository>,
        Option<PgPool>,
    ) = match config.storage_backend {
        StorageBackend::Postgres => {
            let pool = connect_pool(&config).await?;
            tracing::info!("Connected to database");

            run_migrations(&pool).await?;
            tracing::info!("Migrations applied");

            let pool_arc = Arc::new(pool.clone());
            let links: Arc<dyn LinkRepository> = Arc::new(PgLinkRepository::new(pool_arc.clone()));
            let stats: Arc<dyn StatsRepository> = Arc::new(PgStatsRepository::new(pool_arc));
            (links, stats, Some(pool))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; links are lost on restart");
            let store = Arc::new(InMemoryStore::new());
            let links: Arc<dyn LinkRepository> = store.clone();
            let stats: Arc<dyn StatsRepository> = store;
            (links, stats, None)
        }
    };

    let cache = build_cache(&config).await;
    let geo_locator = build_geo_locator(config.geoip_db_path.as_deref());

    let state = AppState::new(
        link_repository,
        stats_repository,
        cache,
        geo_locator,
        Arc::new(SystemClock),
        PublicSettings {
            base_url: config.base_url.clone(),
            behind_proxy: config.behind_proxy,
            default_validity_minutes: config.default_validity_minutes,
        },
    );

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    if let Some(pool) = pool {
        pool.close().await;
        tracing::info!("Database pool closed");
    }

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
