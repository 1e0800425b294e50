//! PostgreSQL implementation of statistics repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use super::pg_link_repository::ShortLinkRow;
use crate::domain::entities::{Click, NewClick, ShortLink};
use crate::domain::repositories::StatsRepository;
use crate::error::AppError;
use crate::utils::db_error::is_missing_link_violation;
use serde_json::json;

#[derive(sqlx::FromRow)]
struct ClickRow {
    clicked_at: DateTime<Utc>,
    referrer_url: String,
    source_ip: String,
    country: String,
    region: String,
}

impl From<ClickRow> for Click {
    fn from(row: ClickRow) -> Self {
        Click {
            timestamp: row.clicked_at,
            referrer_url: row.referrer_url,
            source_ip: row.source_ip,
            country: row.country,
            region: row.region,
        }
    }
}

/// PostgreSQL repository for the click log.
///
/// Each click is its own row, so concurrent appends never contend on the
/// link row. Click order is the `id` sequence order.
pub struct PgStatsRepository {
    pool: Arc<PgPool>,
}

impl PgStatsRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatsRepository for PgStatsRepository {
    async fn record_click(&self, short_code: &str, new_click: NewClick) -> Result<Click, AppError> {
        let result = sqlx::query_as::<_, ClickRow>(
            r#"
            INSERT INTO link_clicks (short_code, clicked_at, referrer_url, source_ip, country, region)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING clicked_at, referrer_url, source_ip, country, region
            "#,
        )
        .bind(short_code)
        .bind(new_click.timestamp)
        .bind(&new_click.referrer_url)
        .bind(&new_click.source_ip)
        .bind(&new_click.country)
        .bind(&new_click.region)
        .fetch_one(self.pool.as_ref())
        .await;

        match result {
            Ok(row) => Ok(row.into()),
            Err(e) if is_missing_link_violation(&e) => Err(AppError::not_found(
                "Short link not found",
                json!({ "code": short_code }),
            )),
            Err(e) => Err(e.into()),
        }
    }

    async fn get_stats_by_code(&self, short_code: &str) -> Result<Option<ShortLink>, AppError> {
        let link_row = sqlx::query_as::<_, ShortLinkRow>(
            r#"
            SELECT short_code, original_url, created_at, expires_at
            FROM short_links
            WHERE short_code = $1
            "#,
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        let Some(link_row) = link_row else {
            return Ok(None);
        };

        let clicks = sqlx::query_as::<_, ClickRow>(
            r#"
            SELECT clicked_at, referrer_url, source_ip, country, region
            FROM link_clicks
            WHERE short_code = $1
            ORDER BY id ASC
            "#,
        )
        .bind(short_code)
        .fetch_all(self.pool.as_ref())
        .await?;

        let link = ShortLink::from(link_row)
            .with_clicks(clicks.into_iter().map(Click::from).collect());

        Ok(Some(link))
    }
}
