pub mod snapshot;

pub use crate::domain::model::{CatalogItem, CollectionPair, NamedCollection, Snapshot};
pub use crate::domain::ports::{ImdbSource, Storage};
pub use crate::utils::error::Result;
