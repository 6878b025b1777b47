use crate::client::fetch::RequestParams;
use crate::client::{export, html, lists_path, ImdbClient};
use crate::domain::model::CollectionPair;
use crate::utils::error::Result;

impl ImdbClient {
    /// Every list owned by the user, each paired with its target slug.
    ///
    /// A list that 404s between enumeration and export was deleted in the
    /// meantime and is skipped. Output order follows the page but callers
    /// should not rely on it.
    pub async fn lists_scrape(&self) -> Result<Vec<CollectionPair>> {
        let response = self
            .fetcher()
            .fetch(RequestParams::get(lists_path(&self.identity().user_id)))
            .await?;
        let body = response.text().await?;

        let list_ids = html::all_attrs(&body, &html::USER_LIST_ID)?;
        if list_ids.is_empty() {
            tracing::info!("found no imdb lists");
            return Ok(Vec::new());
        }
        tracing::debug!("Found {} imdb lists", list_ids.len());

        let mut pairs = Vec::with_capacity(list_ids.len());
        for list_id in list_ids {
            let collection = match self.list_items_get(&list_id).await {
                Ok(collection) => collection,
                Err(e) if e.is_not_found() => {
                    tracing::debug!("Skipping imdb list {}: {}", list_id, e);
                    continue;
                }
                Err(e) => return Err(e),
            };

            let target_slug = export::format_slug(&collection.name);
            pairs.push(CollectionPair {
                collection,
                target_slug,
            });
        }

        Ok(pairs)
    }
}
