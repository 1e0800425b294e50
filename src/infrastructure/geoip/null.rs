use async_trait::async_trait;

use crate::domain::geo::{GeoInfo, GeoLocator};

/// Geolocator used when no database is configured; every lookup is empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullGeoLocator;

#[async_trait]
impl GeoLocator for NullGeoLocator {
    async fn lookup(&self, _ip: &str) -> Option<GeoInfo> {
        None
    }

    fn name(&self) -> &'static str {
        "disabled"
    }
}
