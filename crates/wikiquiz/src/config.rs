//! Configuration management for wikiquiz.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "wikiquiz";

/// Prefix for configuration environment variables.
const ENV_PREFIX: &str = "WIKIQUIZ_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `WIKIQUIZ_`, `__` between sections)
/// 2. TOML config file at `~/.config/wikiquiz/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend connection settings.
    pub api: ApiConfig,
    /// Defaults for quiz generation.
    pub generate: GenerateConfig,
}

/// Backend connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the quiz backend.
    pub base_url: String,
    /// Request timeout in seconds. Generation runs an LLM, so keep this generous.
    pub timeout_secs: u64,
    /// User-Agent header sent with every request.
    pub user_agent: String,
}

/// Defaults applied to `generate` unless overridden on the command line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Ask the backend to ignore its cached quiz for the URL.
    pub force_regenerate: bool,
    /// Ask the backend to keep the article's raw HTML.
    pub store_raw_html: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 120,
            user_agent: concat!("wikiquiz/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ApiConfig {
    /// Get the request timeout as a Duration.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Parse the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL doesn't parse or isn't http(s).
    pub fn base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| Error::config(format!("invalid api.base_url '{}': {e}", self.base_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "api.base_url must use http or https, got '{}'",
                url.scheme()
            )));
        }
        Ok(url)
    }
}

impl Config {
    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);
        Self::from_figment(Self::figment(&config_file))
    }

    fn figment(config_file: &std::path::Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    fn from_figment(figment: Figment) -> Result<Self> {
        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        self.api.base_url()?;

        if self.api.timeout_secs == 0 {
            return Err(Error::config("api.timeout_secs must be greater than 0"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.timeout_secs, 120);
        assert!(config.api.user_agent.starts_with("wikiquiz/"));
        assert!(!config.generate.force_regenerate);
        assert!(!config.generate.store_raw_html);
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = Config::default();
        config.api.timeout_secs = 0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("timeout_secs"));
    }

    #[test]
    fn test_validate_unparsable_base_url() {
        let mut config = Config::default();
        config.api.base_url = "not a url".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("api.base_url"));
    }

    #[test]
    fn test_validate_non_http_base_url() {
        let mut config = Config::default();
        config.api.base_url = "ftp://quiz.example.com".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("http or https"));
    }

    #[test]
    fn test_timeout() {
        let config = Config::default();
        assert_eq!(config.api.timeout(), Duration::from_secs(120));
    }

    #[test]
    fn test_load_nonexistent_config() {
        let config = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml"))).unwrap();
        assert_eq!(config.generate, GenerateConfig::default());
    }

    #[test]
    fn test_toml_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                [api]
                base_url = "https://quiz.example.com"

                [generate]
                force_regenerate = true
                "#,
            )?;

            let config =
                Config::from_figment(Config::figment(std::path::Path::new("config.toml")))
                    .map_err(|e| e.to_string())?;
            assert_eq!(config.api.base_url, "https://quiz.example.com");
            assert_eq!(config.api.timeout_secs, 120);
            assert!(config.generate.force_regenerate);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_toml() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[api]\ntimeout_secs = 30\n")?;
            jail.set_env("WIKIQUIZ_API__TIMEOUT_SECS", "45");
            jail.set_env("WIKIQUIZ_GENERATE__STORE_RAW_HTML", "true");

            let config =
                Config::from_figment(Config::figment(std::path::Path::new("config.toml")))
                    .map_err(|e| e.to_string())?;
            assert_eq!(config.api.timeout_secs, 45);
            assert!(config.generate.store_raw_html);
            Ok(())
        });
    }

    #[test]
    fn test_invalid_toml_value_is_rejected() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[api]\ntimeout_secs = 0\n")?;

            let result = Config::from_figment(Config::figment(std::path::Path::new("config.toml")));
            assert!(matches!(result, Err(Error::ConfigValidation { .. })));
            Ok(())
        });
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("wikiquiz"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_config_serialize() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("base_url"));
        assert!(json.contains("force_regenerate"));
    }

    #[test]
    fn test_api_config_deserialize_partial() {
        let json = r#"{"base_url": "http://10.0.0.2:9000"}"#;
        let api: ApiConfig = serde_json::from_str(json).unwrap();
        assert_eq!(api.base_url, "http://10.0.0.2:9000");
        assert_eq!(api.timeout_secs, 120);
    }
}
