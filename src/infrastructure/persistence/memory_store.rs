//! Process-local storage backed by a concurrent map.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::{Click, NewClick, NewShortLink, ShortLink};
use crate::domain::repositories::{LinkRepository, StatsRepository};
use crate::error::AppError;

/// In-memory store implementing both repository traits.
///
/// Code allocation goes through the map's entry API, so two inserts of the
/// same code cannot both succeed. Clicks are appended while holding the
/// entry's write guard. Data lives only as long as the process.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    links: Arc<DashMap<String, ShortLink>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored links.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[async_trait]
impl LinkRepository for InMemoryStore {
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        match self.links.entry(new_link.short_code.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict(
                "Shortcode already in use",
                json!({ "code": new_link.short_code }),
            )),
            Entry::Vacant(slot) => {
                let link = ShortLink::from(new_link);
                slot.insert(link.clone());
                Ok(link)
            }
        }
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError> {
        Ok(self.links.get(code).map(|link| {
            ShortLink::new(
                link.short_code.clone(),
                link.original_url.clone(),
                link.created_at,
                link.expires_at,
            )
        }))
    }

    async fn code_exists(&self, code: &str) -> Result<bool, AppError> {
        Ok(self.links.contains_key(code))
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[async_trait]
impl StatsRepository for InMemoryStore {
    async fn record_click(&self, short_code: &str, new_click: NewClick) -> Result<Click, AppError> {
        let Some(mut link) = self.links.get_mut(short_code) else {
            return Err(AppError::not_found(
                "Short link not found",
                json!({ "code": short_code }),
            ));
        };

        let click = Click::from(new_click);
        link.clicks.push(click.clone());

        Ok(click)
    }

    async fn get_stats_by_code(&self, short_code: &str) -> Result<Option<ShortLink>, AppError> {
        Ok(self.links.get(short_code).map(|link| link.clone()))
    }
}
