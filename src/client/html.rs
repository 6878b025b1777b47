//! Every selector used against imdb markup lives here, so a layout change on
//! the site is fixed in one place.

use crate::utils::error::{ImdbError, Result};
use scraper::{Html, Selector};

/// "Read attribute `attribute` from elements matching `selector`."
#[derive(Debug, Clone, Copy)]
pub struct AttrQuery {
    pub selector: &'static str,
    pub attribute: &'static str,
}

pub const PROFILE_USER_ID: AttrQuery = AttrQuery {
    selector: ".user-profile.userId",
    attribute: "data-userid",
};

pub const WATCHLIST_PAGE_ID: AttrQuery = AttrQuery {
    selector: "meta[property='pageId']",
    attribute: "content",
};

pub const USER_LIST_ID: AttrQuery = AttrQuery {
    selector: ".user-list",
    attribute: "id",
};

fn selector(query: &AttrQuery) -> Result<Selector> {
    Selector::parse(query.selector)
        .map_err(|e| ImdbError::scrape(format!("invalid selector {}: {:?}", query.selector, e)))
}

pub fn first_attr(html: &str, query: &AttrQuery) -> Result<Option<String>> {
    let selector = selector(query)?;
    let document = Html::parse_document(html);
    let value = document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr(query.attribute))
        .map(str::to_string);
    Ok(value)
}

/// Elements that match but lack the attribute are skipped.
pub fn all_attrs(html: &str, query: &AttrQuery) -> Result<Vec<String>> {
    let selector = selector(query)?;
    let document = Html::parse_document(html);
    let values = document
        .select(&selector)
        .filter_map(|element| element.value().attr(query.attribute))
        .map(str::to_string)
        .collect();
    Ok(values)
}
