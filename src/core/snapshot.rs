use crate::config::OutputOptions;
use crate::domain::model::Snapshot;
use crate::domain::ports::{ImdbSource, Storage};
use crate::utils::error::Result;

/// Pulls the selected parts from imdb, then writes them out as one JSON
/// document. Nothing is written unless every selected part succeeded.
pub struct SnapshotEngine<I: ImdbSource, S: Storage> {
    source: I,
    storage: S,
    options: OutputOptions,
}

impl<I: ImdbSource, S: Storage> SnapshotEngine<I, S> {
    pub fn new(source: I, storage: S, options: OutputOptions) -> Self {
        Self {
            source,
            storage,
            options,
        }
    }

    pub async fn extract(&self) -> Result<Snapshot> {
        let mut snapshot = Snapshot::default();

        if self.options.watchlist {
            tracing::info!("Retrieving imdb watchlist...");
            let watchlist = self.source.watchlist_get().await?;
            tracing::info!("Watchlist has {} items", watchlist.items.len());
            snapshot.watchlist = Some(watchlist);
        }

        if self.options.ratings {
            tracing::info!("Retrieving imdb ratings...");
            let ratings = self.source.ratings_get().await?;
            tracing::info!("Retrieved {} ratings", ratings.len());
            snapshot.ratings = Some(ratings);
        }

        if self.options.lists {
            tracing::info!("Retrieving imdb lists...");
            let lists = self.source.lists_scrape().await?;
            tracing::info!("Retrieved {} lists", lists.len());
            snapshot.lists = Some(lists);
        }

        Ok(snapshot)
    }

    pub async fn load(&self, snapshot: &Snapshot) -> Result<String> {
        let data = serde_json::to_vec_pretty(snapshot)?;
        tracing::debug!("Writing snapshot ({} bytes)", data.len());
        self.storage.write_file(&self.options.filename, &data).await
    }

    pub async fn run(&self) -> Result<String> {
        let identity = self.source.identity();
        tracing::info!("Starting imdb snapshot for user {}", identity.user_id);

        let snapshot = self.extract().await?;
        let location = self.load(&snapshot).await?;

        tracing::info!("Snapshot saved to: {}", location);
        Ok(location)
    }
}
