//! Authenticated scraping client for imdb watchlists, ratings and lists.

pub mod discovery;
pub mod export;
pub mod fetch;
pub mod html;
pub mod identity;
pub mod session;

use crate::config::ImdbConfig;
use crate::domain::model::{CatalogItem, ClientIdentity, CollectionPair, NamedCollection};
use crate::domain::ports::ImdbSource;
use crate::utils::error::{ImdbError, ResourceKind, Result};
use crate::utils::validation::Validate;
use async_trait::async_trait;
use fetch::{Fetcher, RequestParams};
use reqwest::StatusCode;
use session::SessionStore;

pub use export::format_slug;

pub fn list_export_path(list_id: &str) -> String {
    format!("/list/{}/export", list_id)
}

pub fn lists_path(user_id: &str) -> String {
    format!("/user/{}/lists", user_id)
}

pub fn ratings_export_path(user_id: &str) -> String {
    format!("/user/{}/ratings/export", user_id)
}

/// The watchlist is an ordinary list id with a reserved role; both go through
/// the same export path and differ only in how absence is reported.
#[derive(Debug, Clone, Copy)]
enum ListRole {
    Owned,
    Watchlist,
}

impl ListRole {
    fn resource_kind(self) -> ResourceKind {
        match self {
            ListRole::Owned => ResourceKind::List,
            ListRole::Watchlist => ResourceKind::Watchlist,
        }
    }
}

/// Partially configured client. `build` resolves the identity and is the only
/// way to obtain an [`ImdbClient`].
#[derive(Debug, Clone)]
pub struct ImdbClientBuilder {
    config: ImdbConfig,
}

impl ImdbClientBuilder {
    pub fn new(config: ImdbConfig) -> Self {
        Self { config }
    }

    pub async fn build(self) -> Result<ImdbClient> {
        self.config.validate()?;

        let session = SessionStore::new(&self.config.base_url, &self.config.credentials())?;
        let fetcher = Fetcher::new(&session, self.config.timeout(), self.config.user_agent())?;

        let identity = identity::hydrate(&fetcher, self.config.user_id.as_deref()).await?;
        tracing::info!(
            "imdb client ready for user {} (watchlist {})",
            identity.user_id,
            identity.watchlist_id
        );

        Ok(ImdbClient { fetcher, identity })
    }
}

#[derive(Debug, Clone)]
pub struct ImdbClient {
    fetcher: Fetcher,
    identity: ClientIdentity,
}

impl ImdbClient {
    pub fn builder(config: ImdbConfig) -> ImdbClientBuilder {
        ImdbClientBuilder::new(config)
    }

    pub fn identity(&self) -> &ClientIdentity {
        &self.identity
    }

    pub(crate) fn fetcher(&self) -> &Fetcher {
        &self.fetcher
    }

    async fn list_export(
        &self,
        list_id: &str,
        role: ListRole,
    ) -> Result<(String, Vec<CatalogItem>)> {
        let response = self
            .fetcher
            .fetch(RequestParams::get(list_export_path(list_id)))
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ImdbError::not_found(role.resource_kind(), Some(list_id)));
        }

        export::read_list_export(response).await
    }

    /// Fetches one list by id; its name comes from the export filename.
    pub async fn list_items_get(&self, list_id: &str) -> Result<NamedCollection> {
        let (name, items) = self.list_export(list_id, ListRole::Owned).await?;
        tracing::debug!("Retrieved imdb list {} ({}) with {} items", list_id, name, items.len());

        Ok(NamedCollection {
            id: list_id.to_string(),
            name,
            items,
        })
    }

    /// The watchlist export; the collection is named after the watchlist id.
    pub async fn watchlist_get(&self) -> Result<NamedCollection> {
        let watchlist_id = &self.identity.watchlist_id;
        let (_, items) = self.list_export(watchlist_id, ListRole::Watchlist).await?;
        tracing::debug!("Retrieved imdb watchlist with {} items", items.len());

        Ok(NamedCollection {
            id: watchlist_id.clone(),
            name: watchlist_id.clone(),
            items,
        })
    }

    pub async fn ratings_get(&self) -> Result<Vec<CatalogItem>> {
        let response = self
            .fetcher
            .fetch(RequestParams::get(ratings_export_path(&self.identity.user_id)))
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ImdbError::not_found(ResourceKind::Rating, None));
        }

        let ratings = export::read_rating_export(response).await?;
        tracing::debug!("Retrieved {} imdb ratings", ratings.len());
        Ok(ratings)
    }
}

#[async_trait]
impl ImdbSource for ImdbClient {
    fn identity(&self) -> &ClientIdentity {
        ImdbClient::identity(self)
    }

    async fn watchlist_get(&self) -> Result<NamedCollection> {
        ImdbClient::watchlist_get(self).await
    }

    async fn ratings_get(&self) -> Result<Vec<CatalogItem>> {
        ImdbClient::ratings_get(self).await
    }

    async fn list_items_get(&self, list_id: &str) -> Result<NamedCollection> {
        ImdbClient::list_items_get(self, list_id).await
    }

    async fn lists_scrape(&self) -> Result<Vec<CollectionPair>> {
        ImdbClient::lists_scrape(self).await
    }
}
