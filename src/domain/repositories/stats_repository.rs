//! Repository trait for click recording and statistics.

use crate::domain::entities::{Click, NewClick, ShortLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the click log of each short link.
///
/// Appends must be atomic at the store level: two redirects of the same link
/// recorded concurrently both end up in the log.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgStatsRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryStore`] - process-local implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Appends a click to the link's log.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn record_click(&self, short_code: &str, new_click: NewClick) -> Result<Click, AppError>;

    /// Loads a link together with all of its clicks in recorded order.
    ///
    /// Expired links are returned like any other.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(ShortLink))` if the link exists
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn get_stats_by_code(&self, short_code: &str) -> Result<Option<ShortLink>, AppError>;
}
