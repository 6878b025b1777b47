use crate::client::fetch::{Fetcher, RequestParams};
use crate::client::html::{self, AttrQuery};
use crate::domain::model::ClientIdentity;
use crate::utils::error::{ImdbError, Result};

pub const PATH_PROFILE: &str = "/profile";
pub const PATH_WATCHLIST: &str = "/watchlist";

/// Configured user id values that mean "look it up".
pub const USER_ID_SENTINELS: [&str; 2] = ["auto-detect", "scrape"];

pub fn needs_user_id_resolution(user_id: Option<&str>) -> bool {
    match user_id.map(str::trim) {
        None => true,
        Some(id) => id.is_empty() || USER_ID_SENTINELS.contains(&id),
    }
}

async fn scrape_attr(
    fetcher: &Fetcher,
    path: &str,
    query: &AttrQuery,
    what: &str,
) -> Result<String> {
    let response = fetcher.fetch(RequestParams::get(path)).await?;
    let body = response.text().await?;

    html::first_attr(&body, query)?
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ImdbError::scrape(format!("{} not found", what)))
}

pub async fn resolve_user_id(fetcher: &Fetcher) -> Result<String> {
    let user_id = scrape_attr(fetcher, PATH_PROFILE, &html::PROFILE_USER_ID, "user id").await?;
    tracing::debug!("Resolved imdb user id {}", user_id);
    Ok(user_id)
}

pub async fn resolve_watchlist_id(fetcher: &Fetcher) -> Result<String> {
    let watchlist_id =
        scrape_attr(fetcher, PATH_WATCHLIST, &html::WATCHLIST_PAGE_ID, "watchlist id").await?;
    tracing::debug!("Resolved imdb watchlist id {}", watchlist_id);
    Ok(watchlist_id)
}

/// Resolves whatever the configuration left open. The watchlist id is never
/// configured, so it is always scraped.
pub async fn hydrate(fetcher: &Fetcher, supplied_user_id: Option<&str>) -> Result<ClientIdentity> {
    let user_id = match supplied_user_id {
        Some(id) if !needs_user_id_resolution(Some(id)) => id.trim().to_string(),
        _ => resolve_user_id(fetcher).await.inspect_err(|e| {
            tracing::error!("failure scraping imdb user id: {}", e);
        })?,
    };

    let watchlist_id = resolve_watchlist_id(fetcher).await.inspect_err(|e| {
        tracing::error!("failure scraping imdb watchlist id: {}", e);
    })?;

    Ok(ClientIdentity {
        user_id,
        watchlist_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels_and_blank_trigger_resolution() {
        assert!(needs_user_id_resolution(None));
        assert!(needs_user_id_resolution(Some("")));
        assert!(needs_user_id_resolution(Some("   ")));
        assert!(needs_user_id_resolution(Some("auto-detect")));
        assert!(needs_user_id_resolution(Some("scrape")));
    }

    #[test]
    fn test_concrete_id_skips_resolution() {
        assert!(!needs_user_id_resolution(Some("ur12345")));
        assert!(!needs_user_id_resolution(Some(" ur12345 ")));
    }
}
