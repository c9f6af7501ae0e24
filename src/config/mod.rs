use crate::constants;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub mod paths;
pub mod user_prompts;
pub mod validation;

use paths::{get_config_path, get_credential_path, get_log_dir_path};
use user_prompts::prompt_for_consumer_credentials;
use validation::validate_config;

/// Configuration structure for the application.
/// Handles loading, saving, and managing application settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// OAuth2 client id of the registered Yahoo application.
    pub consumer_key: String,
    /// OAuth2 client secret of the registered Yahoo application.
    pub consumer_secret: String,
    /// League to rank, e.g. `nba.l.12345`. Can be overridden per run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub league_key: Option<String>,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_auth_url")]
    pub auth_url: String,
    #[serde(default = "default_token_url")]
    pub token_url: String,
    /// Where the OAuth credential is persisted. Defaults to the config directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential_path: Option<String>,
    /// Directory receiving the CSV artifacts.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
    /// HTTP timeout in seconds for API requests. Defaults to 30 seconds if not specified.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Number of ranked players written to the ranking artifact.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_api_base_url() -> String {
    constants::yahoo::API_BASE_URL.to_string()
}

fn default_auth_url() -> String {
    constants::yahoo::AUTH_URL.to_string()
}

fn default_token_url() -> String {
    constants::yahoo::TOKEN_URL.to_string()
}

fn default_output_dir() -> String {
    constants::ranking::DEFAULT_OUTPUT_DIR.to_string()
}

/// Default HTTP timeout in seconds
fn default_http_timeout() -> u64 {
    constants::DEFAULT_HTTP_TIMEOUT_SECONDS
}

fn default_page_size() -> u32 {
    constants::DEFAULT_PAGE_SIZE
}

fn default_top_n() -> usize {
    constants::DEFAULT_TOP_N
}

impl Default for Config {
    fn default() -> Self {
        Config {
            consumer_key: String::new(),
            consumer_secret: String::new(),
            league_key: None,
            api_base_url: default_api_base_url(),
            auth_url: default_auth_url(),
            token_url: default_token_url(),
            credential_path: None,
            output_dir: default_output_dir(),
            log_file_path: None,
            http_timeout_seconds: default_http_timeout(),
            page_size: default_page_size(),
            top_n: default_top_n(),
        }
    }
}

impl Config {
    /// Loads configuration from the default config file location.
    /// If no config file exists and no credentials are given through the
    /// environment, prompts for the consumer key and secret and creates one.
    ///
    /// # Environment Variables
    /// - `FANTASY_CONSUMER_KEY` / `FANTASY_CONSUMER_SECRET` - Override app credentials
    /// - `FANTASY_LEAGUE_KEY` - Override league key
    /// - `FANTASY_API_BASE_URL` - Override API base URL
    /// - `FANTASY_LOG_FILE` - Override log file path
    /// - `FANTASY_HTTP_TIMEOUT` - Override HTTP timeout in seconds (default: 30)
    pub async fn load() -> Result<Self, AppError> {
        let config_path = get_config_path();

        let mut config = if Path::new(&config_path).exists() {
            Self::load_from_path(&config_path).await?
        } else if std::env::var("FANTASY_CONSUMER_KEY").is_ok() {
            Config::default()
        } else {
            let (consumer_key, consumer_secret) = prompt_for_consumer_credentials().await?;
            let config = Config {
                consumer_key,
                consumer_secret,
                ..Config::default()
            };
            config.save().await?;
            config
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Applies `FANTASY_*` environment variables on top of the current values.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("FANTASY_CONSUMER_KEY") {
            self.consumer_key = key;
        }
        if let Ok(secret) = std::env::var("FANTASY_CONSUMER_SECRET") {
            self.consumer_secret = secret;
        }
        if let Ok(league_key) = std::env::var("FANTASY_LEAGUE_KEY") {
            self.league_key = Some(league_key);
        }
        if let Ok(base) = std::env::var("FANTASY_API_BASE_URL") {
            self.api_base_url = base;
        }
        if let Ok(log_file_path) = std::env::var("FANTASY_LOG_FILE") {
            self.log_file_path = Some(log_file_path);
        }
        if let Some(timeout) = std::env::var("FANTASY_HTTP_TIMEOUT")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.http_timeout_seconds = timeout;
        }
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(self)
    }

    /// Saves current configuration to the default config file location.
    pub async fn save(&self) -> Result<(), AppError> {
        let config_path = get_config_path();
        self.save_to_path(&config_path).await
    }

    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }

    /// Location of the persisted credential, honoring a configured override.
    pub fn credential_path(&self) -> String {
        self.credential_path
            .clone()
            .unwrap_or_else(get_credential_path)
    }

    /// Displays current configuration settings to stdout.
    /// The consumer secret is never printed.
    pub async fn display() -> Result<(), AppError> {
        let config_path = get_config_path();
        let log_dir = get_log_dir_path();

        if Path::new(&config_path).exists() {
            let config = Config::load_from_path(&config_path).await?;
            println!("\nCurrent Configuration");
            println!("────────────────────────────────────");
            println!("Config Location:");
            println!("{config_path}");
            println!("────────────────────────────────────");
            println!("Consumer Key:");
            println!("{}", config.consumer_key);
            println!("────────────────────────────────────");
            println!("League:");
            println!("{}", config.league_key.as_deref().unwrap_or("(not set)"));
            println!("────────────────────────────────────");
            println!("API Base URL:");
            println!("{}", config.api_base_url);
            println!("────────────────────────────────────");
            println!("Credential File:");
            println!("{}", config.credential_path());
            println!("────────────────────────────────────");
            println!("Output Directory:");
            println!("{}", config.output_dir);
            println!("────────────────────────────────────");
            println!("Paging / Export:");
            println!(
                "{} players per page, top {} exported",
                config.page_size, config.top_n
            );
            println!("────────────────────────────────────");
            println!("HTTP Timeout:");
            println!("{} seconds", config.http_timeout_seconds);
            println!("────────────────────────────────────");
            println!("Log File Location:");
            if let Some(custom_path) = &config.log_file_path {
                println!("{custom_path}");
            } else {
                println!("{log_dir}/{}", constants::LOG_FILE_NAME);
                println!("(Default location)");
            }
        } else {
            println!("\nNo configuration file found at:");
            println!("{config_path}");
        }

        Ok(())
    }

    /// Saves configuration to a custom file path, creating the parent
    /// directory when needed.
    ///
    /// # Errors
    /// * `AppError::Config` - If the provided path has no parent directory
    /// * `AppError::Io` - If there's an I/O error creating directories or writing the file
    /// * `AppError::TomlSerialize` - If there's an error serializing the configuration
    pub async fn save_to_path(&self, path: &str) -> Result<(), AppError> {
        let config_dir = Path::new(path).parent().ok_or_else(|| {
            AppError::config_error(format!("Path '{path}' has no parent directory"))
        })?;

        if !config_dir.as_os_str().is_empty() && !config_dir.exists() {
            fs::create_dir_all(config_dir).await?;
        }
        let content = toml::to_string_pretty(self)?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Loads configuration from a custom file path without applying
    /// environment overrides.
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    fn create_valid_config() -> Config {
        Config {
            consumer_key: "dj0yJmk9key".to_string(),
            consumer_secret: "s3cr3t".to_string(),
            league_key: Some("nba.l.4242".to_string()),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_config_load_minimal_file_applies_defaults() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path_str = config_path.to_string_lossy();

        let config_content = r#"
consumer_key = "abc"
consumer_secret = "def"
"#;
        tokio::fs::write(&config_path, config_content).await.unwrap();

        let config = Config::load_from_path(&config_path_str).await.unwrap();

        assert_eq!(config.consumer_key, "abc");
        assert_eq!(config.consumer_secret, "def");
        assert_eq!(config.league_key, None);
        assert_eq!(config.api_base_url, constants::yahoo::API_BASE_URL);
        assert_eq!(config.page_size, 25);
        assert_eq!(config.top_n, 150);
        assert_eq!(config.output_dir, "data");
        assert_eq!(config.http_timeout_seconds, 30);
    }

    #[tokio::test]
    async fn test_config_save_and_load_roundtrip() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");
        let config_path_str = config_path.to_string_lossy();

        let mut config = create_valid_config();
        config.log_file_path = Some("/custom/log/path.log".to_string());
        config.page_size = 10;

        config.save_to_path(&config_path_str).await.unwrap();
        assert!(config_path.exists());

        let loaded = Config::load_from_path(&config_path_str).await.unwrap();
        assert_eq!(loaded, config);
    }

    #[tokio::test]
    async fn test_config_without_optional_fields_serialization() {
        let config = Config {
            consumer_key: "k".to_string(),
            consumer_secret: "s".to_string(),
            ..Config::default()
        };
        let toml_string = toml::to_string_pretty(&config).unwrap();
        assert!(!toml_string.contains("league_key"));
        assert!(!toml_string.contains("log_file_path"));
        assert!(!toml_string.contains("credential_path"));
    }

    #[tokio::test]
    async fn test_config_missing_required_field() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        tokio::fs::write(&config_path, "consumer_key = \"only-key\"\n")
            .await
            .unwrap();

        let result = Config::load_from_path(&config_path.to_string_lossy()).await;
        assert!(matches!(result.unwrap_err(), AppError::TomlDeserialize(_)));
    }

    #[tokio::test]
    async fn test_config_load_from_nonexistent_path() {
        let result = Config::load_from_path("/definitely/not/here/config.toml").await;
        assert!(matches!(result.unwrap_err(), AppError::Io(_)));
    }

    #[test]
    fn test_config_validation_valid_config() {
        assert!(create_valid_config().validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_configs() {
        let invalid_configs = vec![
            Config {
                consumer_key: String::new(),
                ..create_valid_config()
            },
            Config {
                consumer_secret: "   ".to_string(),
                ..create_valid_config()
            },
            Config {
                api_base_url: "fantasysports.yahooapis.com".to_string(),
                ..create_valid_config()
            },
            Config {
                token_url: "ftp://login".to_string(),
                ..create_valid_config()
            },
            Config {
                page_size: 0,
                ..create_valid_config()
            },
            Config {
                top_n: 0,
                ..create_valid_config()
            },
            Config {
                league_key: Some("12345".to_string()),
                ..create_valid_config()
            },
            Config {
                log_file_path: Some(String::new()),
                ..create_valid_config()
            },
        ];

        for config in invalid_configs {
            assert!(
                config.validate().is_err(),
                "Config should be invalid: {config:?}"
            );
        }
    }

    #[test]
    fn test_credential_path_override() {
        let mut config = create_valid_config();
        assert!(config.credential_path().ends_with("token.json"));

        config.credential_path = Some("/tmp/custom-token.json".to_string());
        assert_eq!(config.credential_path(), "/tmp/custom-token.json");
    }

    #[test]
    fn test_get_config_path() {
        let path = Config::get_config_path();
        assert!(path.contains("fantasy_hoops_ranker"));
        assert!(path.ends_with("config.toml"));
    }

    #[test]
    #[serial]
    fn test_environment_variable_override() {
        unsafe {
            std::env::set_var("FANTASY_LEAGUE_KEY", "nba.l.9999");
            std::env::set_var("FANTASY_HTTP_TIMEOUT", "5");
            std::env::set_var("FANTASY_API_BASE_URL", "http://localhost:9000");
        }

        let mut config = create_valid_config();
        config.apply_env_overrides();

        assert_eq!(config.league_key.as_deref(), Some("nba.l.9999"));
        assert_eq!(config.http_timeout_seconds, 5);
        assert_eq!(config.api_base_url, "http://localhost:9000");
        assert_eq!(config.consumer_key, "dj0yJmk9key");

        unsafe {
            std::env::remove_var("FANTASY_LEAGUE_KEY");
            std::env::remove_var("FANTASY_HTTP_TIMEOUT");
            std::env::remove_var("FANTASY_API_BASE_URL");
        }
    }

    #[test]
    #[serial]
    fn test_environment_variable_invalid_timeout_is_ignored() {
        unsafe {
            std::env::set_var("FANTASY_HTTP_TIMEOUT", "soon");
        }

        let mut config = create_valid_config();
        config.apply_env_overrides();
        assert_eq!(config.http_timeout_seconds, 30);

        unsafe {
            std::env::remove_var("FANTASY_HTTP_TIMEOUT");
        }
    }
}
