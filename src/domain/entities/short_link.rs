//! Short link entity representing a code → URL mapping with a fixed lifetime.

use chrono::{DateTime, Utc};

use super::click::Click;

/// A shortened URL with its validity window and recorded visits.
///
/// Everything except `clicks` is immutable after creation. `clicks` only grows,
/// in the order redirects were recorded.
#[derive(Debug, Clone)]
pub struct ShortLink {
    pub short_code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub clicks: Vec<Click>,
}

impl ShortLink {
    /// Creates a ShortLink instance with no clicks.
    pub fn new(
        short_code: String,
        original_url: String,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            short_code,
            original_url,
            created_at,
            expires_at,
            clicks: Vec::new(),
        }
    }

    /// Attaches previously recorded clicks.
    pub fn with_clicks(mut self, clicks: Vec<Click>) -> Self {
        self.clicks = clicks;
        self
    }

    /// Returns true once `now` is strictly past the expiry instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    pub fn total_clicks(&self) -> usize {
        self.clicks.len()
    }
}

/// Input data for creating a new short link.
#[derive(Debug, Clone, PartialEq)]
pub struct NewShortLink {
    pub short_code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl From<NewShortLink> for ShortLink {
    fn from(new_link: NewShortLink) -> Self {
        ShortLink::new(
            new_link.short_code,
            new_link.original_url,
            new_link.created_at,
            new_link.expires_at,
        )
    }
}
