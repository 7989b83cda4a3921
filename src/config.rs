use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::sort::SortOrder;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct DadlyConfig {
    /// Recipe API connection settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Feed paging settings
    #[serde(default)]
    pub feed: FeedConfig,
    /// List display settings
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Configuration for the recipe API
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL of the REST API (e.g., "http://localhost:8000")
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Bearer token for authenticated calls (can also be set via environment variable)
    pub access_token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            access_token: None,
        }
    }
}

/// Configuration for feed paging
#[derive(Debug, Deserialize, Clone)]
pub struct FeedConfig {
    /// Number of recipes requested from the feed
    #[serde(default = "default_feed_limit")]
    pub limit: u32,
    /// Number of liked recipes requested per page
    #[serde(default = "default_liked_limit")]
    pub liked_limit: u32,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            limit: default_feed_limit(),
            liked_limit: default_liked_limit(),
        }
    }
}

/// Configuration for list display
#[derive(Debug, Deserialize, Clone, Default)]
pub struct DisplayConfig {
    /// Sort direction used when none is given
    #[serde(default)]
    pub default_order: SortOrder,
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_feed_limit() -> u32 {
    20
}

fn default_liked_limit() -> u32 {
    100
}

impl DadlyConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with DADLY__ prefix
    /// 2. dadly.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: DADLY__API__BASE_URL
    pub fn load() -> Result<Self, ConfigError> {
        load_config("dadly")
    }
}

/// Load configuration from `<name>.toml` (optional) and `DADLY__` variables
pub fn load_config(name: &str) -> Result<DadlyConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name(name).required(false))
        // Use double underscore for nested: DADLY__API__ACCESS_TOKEN
        .add_source(
            Environment::with_prefix("DADLY")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_values() {
        let config = DadlyConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.timeout, 30);
        assert!(config.api.access_token.is_none());
        assert_eq!(config.feed.limit, 20);
        assert_eq!(config.feed.liked_limit, 100);
        assert_eq!(config.display.default_order, SortOrder::Descending);
    }

    #[test]
    fn test_load_config_without_file() {
        let result = load_config("definitely-not-a-dadly-config");
        let config = result.unwrap();
        assert_eq!(config.feed.limit, 20);
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = std::env::temp_dir().join(format!("dadly-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("custom.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[api]\nbase_url = \"https://api.example.com\"\ntimeout = 5\n\n[display]\ndefault_order = \"ascending\""
        )
        .unwrap();

        let name = dir.join("custom");
        let config = load_config(name.to_str().unwrap()).unwrap();
        assert_eq!(config.api.base_url, "https://api.example.com");
        assert_eq!(config.api.timeout, 5);
        assert_eq!(config.display.default_order, SortOrder::Ascending);
        assert_eq!(config.feed.liked_limit, 100);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
