//! Link creation and redirect resolution service.

use std::sync::Arc;

use crate::domain::clock::Clock;
use crate::domain::entities::{NewClick, NewShortLink, ShortLink};
use crate::domain::geo::GeoLocator;
use crate::domain::repositories::{LinkRepository, StatsRepository};
use crate::error::AppError;
use crate::infrastructure::cache::{CacheService, CachedLink};
use crate::utils::code_generator::{generate_code, validate_custom_code};
use crate::utils::url_validator::validate_url;
use crate::utils::validity::expiry_from;
use serde_json::json;
use tracing::{debug, info, warn};

/// Attempts made to allocate a generated code before giving up.
pub const MAX_GENERATION_ATTEMPTS: usize = 5;

/// Service for creating short links and resolving them into redirects.
///
/// Every collaborator is injected: storage through the repository traits,
/// plus the link cache, the geolocator and the clock. The service holds no
/// mutable state of its own and is shared behind an `Arc`.
pub struct LinkService<L: LinkRepository + ?Sized, S: StatsRepository + ?Sized> {
    link_repository: Arc<L>,
    stats_repository: Arc<S>,
    cache: Arc<dyn CacheService>,
    geo_locator: Arc<dyn GeoLocator>,
    clock: Arc<dyn Clock>,
    default_validity_minutes: f64,
}

impl<L: LinkRepository + ?Sized, S: StatsRepository + ?Sized> LinkService<L, S> {
    /// Creates a new link service.
    pub fn new(
        link_repository: Arc<L>,
        stats_repository: Arc<S>,
        cache: Arc<dyn CacheService>,
        geo_locator: Arc<dyn GeoLocator>,
        clock: Arc<dyn Clock>,
        default_validity_minutes: f64,
    ) -> Self {
        Self {
            link_repository,
            stats_repository,
            cache,
            geo_locator,
            clock,
            default_validity_minutes,
        }
    }

    /// Creates a short link.
    ///
    /// Inputs are checked in order (URL, validity, custom code) and nothing is
    /// written unless all of them pass. An empty custom code counts as absent.
    ///
    /// # Code Generation
    ///
    /// Without a custom code, a random 12-character code is generated. An
    /// existing code or a uniqueness violation on insert is a collision;
    /// after [`MAX_GENERATION_ATTEMPTS`] collisions the request fails.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] - URL missing, malformed, or not http(s)
    /// - [`AppError::InvalidValidity`] - validity not a number, not positive, or too large
    /// - [`AppError::InvalidCodeFormat`] - custom code has the wrong shape
    /// - [`AppError::CodeConflict`] - custom code is reserved or taken
    /// - [`AppError::CodeGenerationExhausted`] - too many generated collisions
    /// - [`AppError::Internal`] - storage failure
    pub async fn create_short_link(
        &self,
        original_url: Option<String>,
        validity_minutes: Option<f64>,
        custom_code: Option<String>,
    ) -> Result<ShortLink, AppError> {
        let original_url = original_url.unwrap_or_default();
        validate_url(&original_url).map_err(|e| {
            AppError::invalid_url(
                "The URL you have entered is not valid",
                json!({ "reason": e.to_string() }),
            )
        })?;

        let created_at = self.clock.now();
        let expires_at = expiry_from(
            created_at,
            validity_minutes.unwrap_or(self.default_validity_minutes),
        )?;

        let link = match custom_code.filter(|c| !c.is_empty()) {
            Some(code) => {
                self.create_with_custom_code(code, original_url, created_at, expires_at)
                    .await?
            }
            None => {
                self.create_with_generated_code(original_url, created_at, expires_at)
                    .await?
            }
        };

        metrics::counter!("shortlinks_created_total").increment(1);
        info!(
            short_code = %link.short_code,
            expires_at = %link.expires_at,
            "Short link created"
        );

        Ok(link)
    }

    /// Resolves a short code to its target URL and records the visit.
    ///
    /// Expired links are rejected without recording anything. Geolocation
    /// failures only degrade the click's location; a failure to append the
    /// click fails the redirect.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] - no link has this code
    /// - [`AppError::Expired`] - the link's validity has elapsed
    /// - [`AppError::Internal`] - storage failure
    pub async fn resolve_and_record_click(
        &self,
        short_code: &str,
        client_ip: &str,
        referrer: Option<&str>,
    ) -> Result<String, AppError> {
        let link = self.lookup(short_code).await?;

        let now = self.clock.now();
        if now > link.expires_at {
            metrics::counter!("shortlinks_expired_hits_total").increment(1);
            debug!(short_code, "Expired link requested");
            return Err(AppError::expired(
                "This short link has expired",
                json!({
                    "code": short_code,
                    "expired_at": link.expires_at.to_rfc3339(),
                }),
            ));
        }

        let geo = self.geo_locator.lookup(client_ip).await;
        let click = NewClick::new(now, referrer, client_ip.to_string(), geo);

        self.stats_repository
            .record_click(short_code, click)
            .await?;

        metrics::counter!("shortlinks_redirects_total").increment(1);

        Ok(link.original_url)
    }

    /// Finds the redirect data for a code, consulting the cache first.
    async fn lookup(&self, short_code: &str) -> Result<CachedLink, AppError> {
        match self.cache.get_link(short_code).await {
            Ok(Some(cached)) => return Ok(cached),
            Ok(None) => {}
            Err(e) => warn!("Cache lookup failed for {}: {}", short_code, e),
        }

        let link = self
            .link_repository
            .find_by_code(short_code)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Short link not found", json!({ "code": short_code }))
            })?;

        let cached = CachedLink {
            original_url: link.original_url,
            expires_at: link.expires_at,
        };

        if let Err(e) = self.cache.set_link(short_code, &cached).await {
            warn!("Cache write failed for {}: {}", short_code, e);
        }

        Ok(cached)
    }

    async fn create_with_custom_code(
        &self,
        code: String,
        original_url: String,
        created_at: chrono::DateTime<chrono::Utc>,
        expires_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<ShortLink, AppError> {
        validate_custom_code(&code)?;

        if self.link_repository.code_exists(&code).await? {
            return Err(AppError::conflict(
                "Shortcode already in use",
                json!({ "code": code }),
            ));
        }

        self.link_repository
            .create(NewShortLink {
                short_code: code,
                original_url,
                created_at,
                expires_at,
            })
            .await
    }

    /// Generates a code and inserts the link, retrying on collision.
    async fn create_with_generated_code(
        &self,
        original_url: String,
        created_at: chrono::DateTime<chrono::Utc>,
        expires_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<ShortLink, AppError> {
        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let code = generate_code()?;

            if self.link_repository.code_exists(&code).await? {
                record_collision(&code, attempt);
                continue;
            }

            let new_link = NewShortLink {
                short_code: code.clone(),
                original_url: original_url.clone(),
                created_at,
                expires_at,
            };

            match self.link_repository.create(new_link).await {
                Ok(link) => return Ok(link),
                Err(AppError::CodeConflict { .. }) => record_collision(&code, attempt),
                Err(e) => return Err(e),
            }
        }

        Err(AppError::exhausted(
            "Failed to generate a unique shortcode",
            json!({ "attempts": MAX_GENERATION_ATTEMPTS }),
        ))
    }
}

fn record_collision(code: &str, attempt: usize) {
    metrics::counter!("shortlinks_code_collisions_total").increment(1);
    warn!(code, attempt, "Generated shortcode collided with an existing one");
}
