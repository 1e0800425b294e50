//! IP geolocation contract.

use async_trait::async_trait;

/// Approximate location of a client IP.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoInfo {
    /// ISO 3166-1 alpha-2 country code (e.g. "US").
    pub country: Option<String>,
    /// Subdivision code within the country (e.g. "CA").
    pub region: Option<String>,
}

/// Resolves IP addresses to locations.
///
/// Lookups never fail the caller: anything that goes wrong (unparsable IP,
/// private address, missing database entry) is reported as `None`.
///
/// # Implementations
///
/// - [`crate::infrastructure::geoip::MaxMindGeoLocator`] - GeoLite2 database
/// - [`crate::infrastructure::geoip::NullGeoLocator`] - always `None`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GeoLocator: Send + Sync {
    async fn lookup(&self, ip: &str) -> Option<GeoInfo>;

    /// Provider name for logs.
    fn name(&self) -> &'static str;
}
