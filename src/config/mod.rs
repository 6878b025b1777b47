#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::client::fetch::DEFAULT_USER_AGENT;
use crate::client::session::Credentials;
use crate::utils::error::{ImdbError, Result};
use crate::utils::validation::{validate_non_empty_secret, validate_range, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.imdb.com";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_SNAPSHOT_FILENAME: &str = "imdb-snapshot.json";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

fn default_true() -> bool {
    true
}

fn default_snapshot_filename() -> String {
    DEFAULT_SNAPSHOT_FILENAME.to_string()
}

/// Settings the imdb client is built from.
#[derive(Clone, Serialize, Deserialize)]
pub struct ImdbConfig {
    pub cookie_at_main: String,
    pub cookie_ubid_main: String,
    /// A concrete id, or empty / `auto-detect` to scrape it from the profile.
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl ImdbConfig {
    pub fn new(cookie_at_main: impl Into<String>, cookie_ubid_main: impl Into<String>) -> Self {
        Self {
            cookie_at_main: cookie_at_main.into(),
            cookie_ubid_main: cookie_ubid_main.into(),
            user_id: None,
            base_url: default_base_url(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: None,
        }
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.cookie_at_main, &self.cookie_ubid_main)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }
}

impl fmt::Debug for ImdbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImdbConfig")
            .field("cookie_at_main", &"<redacted>")
            .field("cookie_ubid_main", &"<redacted>")
            .field("user_id", &self.user_id)
            .field("base_url", &self.base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Validate for ImdbConfig {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        validate_range("timeout_seconds", self.timeout_seconds, 1, 600)?;

        for (field, value) in [
            ("cookie_at_main", &self.cookie_at_main),
            ("cookie_ubid_main", &self.cookie_ubid_main),
        ] {
            validate_non_empty_secret(field, value)?;
            if value.starts_with("${") {
                return Err(ImdbError::configuration(format!(
                    "{} references an environment variable that is not set",
                    field
                )));
            }
        }
        Ok(())
    }
}

/// Which parts of the snapshot to pull and where to write it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputOptions {
    /// Directory for the snapshot file; `None` prints to stdout.
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default = "default_snapshot_filename")]
    pub filename: String,
    #[serde(default = "default_true")]
    pub watchlist: bool,
    #[serde(default = "default_true")]
    pub ratings: bool,
    #[serde(default = "default_true")]
    pub lists: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            path: None,
            filename: default_snapshot_filename(),
            watchlist: true,
            ratings: true,
            lists: true,
        }
    }
}

impl Validate for OutputOptions {
    fn validate(&self) -> Result<()> {
        if self.filename.trim().is_empty() || self.filename.contains(['/', '\\', '\0']) {
            return Err(ImdbError::invalid_value(
                "output.filename",
                &self.filename,
                "Must be a plain file name",
            ));
        }
        if let Some(path) = &self.path {
            if path.is_empty() || path.contains('\0') {
                return Err(ImdbError::invalid_value(
                    "output.path",
                    path,
                    "Path cannot be empty or contain null bytes",
                ));
            }
        }
        Ok(())
    }
}
