//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use serde_json::json;

#[derive(sqlx::FromRow)]
pub(super) struct ShortLinkRow {
    pub short_code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl From<ShortLinkRow> for ShortLink {
    fn from(row: ShortLinkRow) -> Self {
        ShortLink::new(row.short_code, row.original_url, row.created_at, row.expires_at)
    }
}

/// PostgreSQL repository for short link storage.
///
/// Code uniqueness is enforced by the `short_links_short_code_key` constraint;
/// inserts use `ON CONFLICT DO NOTHING` so a taken code never overwrites the
/// existing row.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let row = sqlx::query_as::<_, ShortLinkRow>(
            r#"
            INSERT INTO short_links (short_code, original_url, created_at, expires_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (short_code) DO NOTHING
            RETURNING short_code, original_url, created_at, expires_at
            "#,
        )
        .bind(&new_link.short_code)
        .bind(&new_link.original_url)
        .bind(new_link.created_at)
        .bind(new_link.expires_at)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(ShortLink::from).ok_or_else(|| {
            AppError::conflict(
                "Shortcode already in use",
                json!({ "code": new_link.short_code }),
            )
        })
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError> {
        let row = sqlx::query_as::<_, ShortLinkRow>(
            r#"
            SELECT short_code, original_url, created_at, expires_at
            FROM short_links
            WHERE short_code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(ShortLink::from))
    }

    async fn code_exists(&self, code: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM short_links WHERE short_code = $1)",
        )
        .bind(code)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
