//! Click statistics service.

use std::sync::Arc;

use crate::domain::entities::ShortLink;
use crate::domain::repositories::StatsRepository;
use crate::error::AppError;
use serde_json::json;

/// Service for reading a link's recorded clicks.
///
/// Statistics stay readable after a link expires; only redirects stop.
pub struct StatsService<R: StatsRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: StatsRepository + ?Sized> StatsService<R> {
    /// Creates a new statistics service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Retrieves a link with every click recorded for it, in recorded order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn get_stats(&self, code: &str) -> Result<ShortLink, AppError> {
        self.repository
            .get_stats_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Click;
    use crate::domain::repositories::MockStatsRepository;
    use chrono::{Duration, Utc};

    fn click(referrer: &str) -> Click {
        Click {
            timestamp: Utc::now(),
            referrer_url: referrer.to_string(),
            source_ip: "8.8.8.8".to_string(),
            country: "US".to_string(),
            region: "CA".to_string(),
        }
    }

    #[tokio::test]
    async fn test_get_stats_success() {
        let mut mock_repo = MockStatsRepository::new();

        let created = Utc::now() - Duration::hours(2);
        let link = ShortLink::new(
            "abc123".to_string(),
            "https://example.com".to_string(),
            created,
            created + Duration::minutes(30),
        )
        .with_clicks(vec![click("direct"), click("https://google.com")]);

        mock_repo
            .expect_get_stats_by_code()
            .withf(|code| code == "abc123")
            .times(1)
            .returning(move |_| Ok(Some(link.clone())));

        let service = StatsService::new(Arc::new(mock_repo));
        let stats = service.get_stats("abc123").await.unwrap();

        assert_eq!(stats.total_clicks(), 2);
        assert_eq!(stats.clicks[0].referrer_url, "direct");
        assert_eq!(stats.clicks[1].referrer_url, "https://google.com");
    }

    #[tokio::test]
    async fn test_get_stats_not_found() {
        let mut mock_repo = MockStatsRepository::new();

        mock_repo
            .expect_get_stats_by_code()
            .times(1)
            .returning(|_| Ok(None));

        let service = StatsService::new(Arc::new(mock_repo));
        let result = service.get_stats("nonexistent").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_get_stats_propagates_storage_error() {
        let mut mock_repo = MockStatsRepository::new();

        mock_repo
            .expect_get_stats_by_code()
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let service = StatsService::new(Arc::new(mock_repo));
        let result = service.get_stats("abc123").await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }
}
