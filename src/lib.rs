pub mod client;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, LocalStorage, RunSettings, StdoutStorage};

pub use client::{format_slug, ImdbClient, ImdbClientBuilder};
pub use config::{ImdbConfig, OutputOptions};
pub use crate::core::snapshot::SnapshotEngine;
pub use domain::model::{CatalogItem, ClientIdentity, CollectionPair, NamedCollection, Rating, Snapshot};
pub use domain::ports::{ImdbSource, Storage};
pub use utils::error::{ImdbError, ResourceKind, Result};
