use crate::config::{ImdbConfig, OutputOptions};
use crate::utils::error::{ImdbError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub imdb: ImdbConfig,
    #[serde(default)]
    pub output: OutputOptions,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub json: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ImdbError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content)
            .map_err(|e| ImdbError::configuration(format!("TOML parsing error: {}", e)))
    }

    /// 替換環境變數 (例如 ${IMDB_COOKIE_AT_MAIN})；未設定者保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| ImdbError::configuration(format!("invalid substitution pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn verbose(&self) -> bool {
        self.logging.as_ref().map(|l| l.verbose).unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().map(|l| l.json).unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.imdb.validate()?;
        self.output.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = TomlConfig::from_toml_str(
            r#"
[imdb]
cookie_at_main = "a"
cookie_ubid_main = "b"
"#,
        )
        .unwrap();

        assert_eq!(config.imdb.base_url, "https://www.imdb.com");
        assert_eq!(config.imdb.user_id, None);
        assert!(config.output.watchlist && config.output.ratings && config.output.lists);
        assert!(!config.verbose());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_full_config() {
        let config = TomlConfig::from_toml_str(
            r#"
[imdb]
cookie_at_main = "a"
cookie_ubid_main = "b"
user_id = "auto-detect"
timeout_seconds = 10

[output]
path = "./out"
ratings = false

[logging]
verbose = true
json = true
"#,
        )
        .unwrap();

        assert_eq!(config.imdb.user_id.as_deref(), Some("auto-detect"));
        assert_eq!(config.imdb.timeout_seconds, 10);
        assert_eq!(config.output.path.as_deref(), Some("./out"));
        assert!(!config.output.ratings);
        assert_eq!(config.output.filename, "imdb-snapshot.json");
        assert!(config.verbose() && config.json_logs());
    }

    #[test]
    fn test_env_substitution() {
        std::env::set_var("IMDB_SCRAPE_TEST_AT_MAIN", "from-env");
        let config = TomlConfig::from_toml_str(
            r#"
[imdb]
cookie_at_main = "${IMDB_SCRAPE_TEST_AT_MAIN}"
cookie_ubid_main = "${IMDB_SCRAPE_TEST_UNSET_VAR}"
"#,
        )
        .unwrap();

        assert_eq!(config.imdb.cookie_at_main, "from-env");
        assert_eq!(config.imdb.cookie_ubid_main, "${IMDB_SCRAPE_TEST_UNSET_VAR}");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_cookies_is_configuration_error() {
        let err = TomlConfig::from_toml_str("[imdb]\nuser_id = \"ur1\"\n").unwrap_err();
        assert!(matches!(err, ImdbError::ConfigurationError { .. }));
    }
}
