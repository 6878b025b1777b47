use crate::config::toml_config::TomlConfig;
use crate::config::{ImdbConfig, OutputOptions, DEFAULT_BASE_URL, DEFAULT_SNAPSHOT_FILENAME};
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use std::fs;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Parser)]
#[command(name = "imdb-scrape")]
#[command(about = "Export an imdb watchlist, ratings and lists as JSON")]
pub struct CliConfig {
    /// Load settings from a TOML file instead of flags and environment
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, env = "IMDB_COOKIE_AT_MAIN", hide_env_values = true)]
    pub cookie_at_main: Option<String>,

    #[arg(long, env = "IMDB_COOKIE_UBID_MAIN", hide_env_values = true)]
    pub cookie_ubid_main: Option<String>,

    /// imdb user id (ur...), or "auto-detect"
    #[arg(long, env = "IMDB_USER_ID")]
    pub user_id: Option<String>,

    #[arg(long, env = "IMDB_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(long, env = "IMDB_TIMEOUT_SECONDS", default_value = "30")]
    pub timeout_seconds: u64,

    /// Directory to write the snapshot into; stdout when omitted
    #[arg(short, long)]
    pub output_path: Option<String>,

    #[arg(long, default_value = DEFAULT_SNAPSHOT_FILENAME)]
    pub output_filename: String,

    #[arg(long)]
    pub skip_watchlist: bool,

    #[arg(long)]
    pub skip_ratings: bool,

    #[arg(long)]
    pub skip_lists: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub imdb: ImdbConfig,
    pub output: OutputOptions,
    pub verbose: bool,
    pub json_logs: bool,
}

impl CliConfig {
    /// A `--config` file wins over the individual flags; `--verbose` and
    /// `--log-json` are honoured either way.
    pub fn resolve(self) -> Result<RunSettings> {
        let settings = match &self.config {
            Some(path) => {
                let file = TomlConfig::from_file(path)?;
                RunSettings {
                    verbose: self.verbose || file.verbose(),
                    json_logs: self.log_json || file.json_logs(),
                    imdb: file.imdb,
                    output: file.output,
                }
            }
            None => {
                let mut imdb = ImdbConfig::new(
                    self.cookie_at_main.unwrap_or_default(),
                    self.cookie_ubid_main.unwrap_or_default(),
                )
                .with_base_url(self.base_url);
                imdb.user_id = self.user_id;
                imdb.timeout_seconds = self.timeout_seconds;

                RunSettings {
                    imdb,
                    output: OutputOptions {
                        path: self.output_path,
                        filename: self.output_filename,
                        watchlist: !self.skip_watchlist,
                        ratings: !self.skip_ratings,
                        lists: !self.skip_lists,
                    },
                    verbose: self.verbose,
                    json_logs: self.log_json,
                }
            }
        };

        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for RunSettings {
    fn validate(&self) -> Result<()> {
        self.imdb.validate()?;
        self.output.validate()
    }
}

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<String> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&full_path, data)?;
        Ok(full_path.display().to_string())
    }
}

#[derive(Debug, Clone, Default)]
pub struct StdoutStorage;

impl Storage for StdoutStorage {
    async fn write_file(&self, _path: &str, data: &[u8]) -> Result<String> {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(data)?;
        stdout.write_all(b"\n")?;
        stdout.flush()?;
        Ok("<stdout>".to_string())
    }
}
