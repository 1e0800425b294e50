//! Repository trait for short link storage.

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for creating and looking up short links.
///
/// The short-code uniqueness guarantee lives here: [`LinkRepository::create`]
/// is an atomic insert-if-absent. Existence checks made beforehand are only
/// an optimization and may race with concurrent inserts.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryStore`] - process-local implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new short link unless its code is already taken.
    ///
    /// The returned link has no clicks.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::CodeConflict`] if the short code already exists;
    /// the existing record is left untouched.
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError>;

    /// Finds a link by its short code (case-sensitive), without its clicks.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError>;

    /// Returns whether a link with this code exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn code_exists(&self, code: &str) -> Result<bool, AppError>;

    /// Verifies the backing store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store cannot be queried.
    async fn health_check(&self) -> Result<(), AppError>;
}
