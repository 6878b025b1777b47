use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A user's personal score for a title together with the day it was given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub value: u8,
    pub rated_on: NaiveDate,
}

/// One title as it appears in an imdb export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub external_id: String,
    pub title_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
}

impl CatalogItem {
    pub fn unrated(external_id: impl Into<String>, title_type: impl Into<String>) -> Self {
        Self {
            external_id: external_id.into(),
            title_type: title_type.into(),
            rating: None,
        }
    }

    pub fn rated(
        external_id: impl Into<String>,
        title_type: impl Into<String>,
        value: u8,
        rated_on: NaiveDate,
    ) -> Self {
        Self {
            external_id: external_id.into(),
            title_type: title_type.into(),
            rating: Some(Rating { value, rated_on }),
        }
    }

    pub fn rating(&self) -> Option<u8> {
        self.rating.as_ref().map(|r| r.value)
    }

    pub fn rated_on(&self) -> Option<NaiveDate> {
        self.rating.as_ref().map(|r| r.rated_on)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedCollection {
    pub id: String,
    pub name: String,
    pub items: Vec<CatalogItem>,
}

/// An imdb list and the slug its counterpart should carry on the sync target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionPair {
    pub collection: NamedCollection,
    pub target_slug: String,
}

/// Identifiers resolved once at client construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientIdentity {
    pub user_id: String,
    pub watchlist_id: String,
}

/// Everything pulled from imdb in one run, handed to the sync step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watchlist: Option<NamedCollection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratings: Option<Vec<CatalogItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lists: Option<Vec<CollectionPair>>,
}
