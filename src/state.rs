//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{LinkService, StatsService};
use crate::domain::clock::Clock;
use crate::domain::geo::GeoLocator;
use crate::domain::repositories::{LinkRepository, StatsRepository};
use crate::infrastructure::cache::CacheService;
use crate::utils::validity::DEFAULT_VALIDITY_MINUTES;

/// Link service over whichever storage backend was configured.
pub type DynLinkService = LinkService<dyn LinkRepository, dyn StatsRepository>;

/// Stats service over whichever storage backend was configured.
pub type DynStatsService = StatsService<dyn StatsRepository>;

/// Settings the HTTP layer needs beyond the services themselves.
#[derive(Debug, Clone)]
pub struct PublicSettings {
    /// Prefix for returned short links; derived from the request when `None`.
    pub base_url: Option<String>,
    /// Trust `X-Forwarded-*` headers for client IP and scheme.
    pub behind_proxy: bool,
    /// Validity applied when a create request omits one.
    pub default_validity_minutes: f64,
}

impl Default for PublicSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            behind_proxy: false,
            default_validity_minutes: DEFAULT_VALIDITY_MINUTES,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<DynLinkService>,
    pub stats_service: Arc<DynStatsService>,
    pub link_repository: Arc<dyn LinkRepository>,
    pub cache: Arc<dyn CacheService>,
    pub base_url: Option<String>,
    pub behind_proxy: bool,
}

impl AppState {
    /// Wires the services from their collaborators.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        stats_repository: Arc<dyn StatsRepository>,
        cache: Arc<dyn CacheService>,
        geo_locator: Arc<dyn GeoLocator>,
        clock: Arc<dyn Clock>,
        settings: PublicSettings,
    ) -> Self {
        let link_service = Arc::new(LinkService::new(
            link_repository.clone(),
            stats_repository.clone(),
            cache.clone(),
            geo_locator,
            clock,
            settings.default_validity_minutes,
        ));
        let stats_service = Arc::new(StatsService::new(stats_repository));

        Self {
            link_service,
            stats_service,
            link_repository,
            cache,
            base_url: settings
                .base_url
                .map(|url| url.trim_end_matches('/').to_string()),
            behind_proxy: settings.behind_proxy,
        }
    }
}
