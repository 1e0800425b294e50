//! IP geolocation providers.
//!
//! [`build_geo_locator`] picks the implementation at startup:
//! 1. `GEOIP_DB_PATH` set and the file loads: [`MaxMindGeoLocator`]
//! 2. otherwise: [`NullGeoLocator`] (every click is located as `Unknown`)

mod maxmind;
mod null;

pub use maxmind::MaxMindGeoLocator;
pub use null::NullGeoLocator;

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::geo::GeoLocator;

/// Chooses the geolocator for the configured database path.
///
/// A path that cannot be loaded is logged and falls back to the null
/// geolocator rather than failing startup.
pub fn build_geo_locator(db_path: Option<&str>) -> Arc<dyn GeoLocator> {
    let locator: Arc<dyn GeoLocator> = match db_path {
        Some(path) => match MaxMindGeoLocator::open(path) {
            Ok(locator) => {
                info!("GeoIP: Using MaxMind database at {}", path);
                Arc::new(locator)
            }
            Err(e) => {
                warn!(
                    "GeoIP: Failed to load MaxMind database at {}: {}, locations will be Unknown",
                    path, e
                );
                Arc::new(NullGeoLocator)
            }
        },
        None => {
            debug!("GeoIP: No database configured");
            Arc::new(NullGeoLocator)
        }
    };

    info!("GeoIP: Initialized with {} provider", locator.name());
    locator
}
