use crate::domain::model::{CatalogItem, ClientIdentity, CollectionPair, NamedCollection};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// Read side of imdb as seen by the sync step.
#[async_trait]
pub trait ImdbSource: Send + Sync {
    fn identity(&self) -> &ClientIdentity;
    async fn watchlist_get(&self) -> Result<NamedCollection>;
    async fn ratings_get(&self) -> Result<Vec<CatalogItem>>;
    async fn list_items_get(&self, list_id: &str) -> Result<NamedCollection>;
    async fn lists_scrape(&self) -> Result<Vec<CollectionPair>>;
}
