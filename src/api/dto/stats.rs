//! DTOs for link statistics endpoint.

use serde::Serialize;

use super::format_timestamp;
use crate::domain::entities::{Click, ShortLink};

/// Statistics for a single short link.
///
/// Source IPs are stored but never exposed here.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub original_url: String,
    pub created_at: String,
    pub expiry: String,
    pub total_clicks: usize,
    pub clicks: Vec<ClickView>,
}

/// One recorded visit.
#[derive(Debug, Serialize)]
pub struct ClickView {
    pub timestamp: String,
    pub referrer: String,
    /// `"<region>, <country>"`
    pub location: String,
}

impl From<&Click> for ClickView {
    fn from(click: &Click) -> Self {
        Self {
            timestamp: format_timestamp(click.timestamp),
            referrer: click.referrer_url.clone(),
            location: click.location_label(),
        }
    }
}

impl From<ShortLink> for StatsResponse {
    fn from(link: ShortLink) -> Self {
        Self {
            total_clicks: link.total_clicks(),
            clicks: link.clicks.iter().map(ClickView::from).collect(),
            original_url: link.original_url,
            created_at: format_timestamp(link.created_at),
            expiry: format_timestamp(link.expires_at),
        }
    }
}
