//! MaxMind GeoLite2 City database lookups.

use std::net::IpAddr;
use std::sync::Arc;

use async_trait::async_trait;
use maxminddb::Reader;
use tracing::trace;

use crate::domain::geo::{GeoInfo, GeoLocator};

/// Geolocator reading a local `GeoLite2-City.mmdb` file.
pub struct MaxMindGeoLocator {
    reader: Arc<Reader<Vec<u8>>>,
}

impl MaxMindGeoLocator {
    /// Loads the database at `path` into memory.
    pub fn open(path: &str) -> Result<Self, maxminddb::MaxMindDbError> {
        let reader = Reader::open_readfile(path)?;
        Ok(Self {
            reader: Arc::new(reader),
        })
    }
}

#[async_trait]
impl GeoLocator for MaxMindGeoLocator {
    async fn lookup(&self, ip: &str) -> Option<GeoInfo> {
        let ip_addr: IpAddr = ip.parse().ok()?;

        let result = self.reader.lookup(ip_addr).ok()?;
        let city: maxminddb::geoip2::City = result.decode().ok()??;

        let country = city.country.iso_code.map(String::from);
        let region = city
            .subdivisions
            .first()
            .and_then(|s| s.iso_code)
            .map(String::from);

        trace!(
            "MaxMind lookup for {}: country={:?}, region={:?}",
            ip, country, region
        );

        Some(GeoInfo { country, region })
    }

    fn name(&self) -> &'static str {
        "MaxMind"
    }
}
