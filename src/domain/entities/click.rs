//! Click entity representing a single recorded redirect.

use chrono::{DateTime, Utc};

use crate::domain::geo::GeoInfo;

/// Referrer stored when the request carried no `Referer` header.
pub const DIRECT_REFERRER: &str = "direct";

/// Country / region stored when geolocation yields nothing.
pub const UNKNOWN_LOCATION: &str = "Unknown";

/// A visit recorded when a short link is resolved.
///
/// Owned by its [`super::ShortLink`]; clicks have no identity of their own.
#[derive(Debug, Clone, PartialEq)]
pub struct Click {
    pub timestamp: DateTime<Utc>,
    pub referrer_url: String,
    pub source_ip: String,
    pub country: String,
    pub region: String,
}

impl Click {
    /// Presentation label combining region and country, e.g. `"CA, US"`.
    pub fn location_label(&self) -> String {
        format!("{}, {}", self.region, self.country)
    }
}

/// Input data for appending a click to a short link.
///
/// Construction applies the `"direct"` / `"Unknown"` fallbacks, so every
/// persisted click has all fields populated.
#[derive(Debug, Clone, PartialEq)]
pub struct NewClick {
    pub timestamp: DateTime<Utc>,
    pub referrer_url: String,
    pub source_ip: String,
    pub country: String,
    pub region: String,
}

impl NewClick {
    pub fn new(
        timestamp: DateTime<Utc>,
        referrer: Option<&str>,
        source_ip: String,
        geo: Option<GeoInfo>,
    ) -> Self {
        let geo = geo.unwrap_or_default();

        Self {
            timestamp,
            referrer_url: non_empty_or(referrer, DIRECT_REFERRER),
            source_ip,
            country: non_empty_or(geo.country.as_deref(), UNKNOWN_LOCATION),
            region: non_empty_or(geo.region.as_deref(), UNKNOWN_LOCATION),
        }
    }
}

impl From<NewClick> for Click {
    fn from(new_click: NewClick) -> Self {
        Self {
            timestamp: new_click.timestamp,
            referrer_url: new_click.referrer_url,
            source_ip: new_click.source_ip,
            country: new_click.country,
            region: new_click.region,
        }
    }
}

fn non_empty_or(value: Option<&str>, fallback: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}
