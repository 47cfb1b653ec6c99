//! Configuration schema for pgdump
//!
//! Configuration is stored at `~/.config/pgdump/config.toml`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default host for release artifacts
pub const DEFAULT_RELEASE_BASE_URL: &str = "https://github.com/bottom-up-ai/pgdump/releases/download";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Binary cache settings
    pub cache: CacheConfig,

    /// Release download settings
    pub release: ReleaseConfig,

    /// Connection defaults applied when the CLI flag is absent
    pub connection: ConnectionConfig,
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// General application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: LogFormat,
}

/// Binary cache configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache root override (default: `~/.cache/pgdump`)
    pub dir: Option<PathBuf>,
}

/// Release artifact configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
    /// Base URL; artifacts live at `<base_url>/v<version>/<archive>`
    pub base_url: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_RELEASE_BASE_URL.to_string(),
        }
    }
}

/// Connection defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[general]"));
        assert!(toml.contains("[release]"));
        assert!(toml.contains("log_format = \"text\""));
    }

    #[test]
    fn config_deserializes_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.release.base_url, DEFAULT_RELEASE_BASE_URL);
        assert!(config.cache.dir.is_none());
        assert_eq!(config.general.log_format, LogFormat::Text);
    }

    #[test]
    fn config_deserializes_partial() {
        let toml = r#"
            [connection]
            host = "db.internal"
            port = 6432

            [general]
            log_format = "json"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.connection.host.as_deref(), Some("db.internal"));
        assert_eq!(config.connection.port, Some(6432));
        assert!(config.connection.user.is_none());
        assert_eq!(config.general.log_format, LogFormat::Json);
        assert_eq!(config.release.base_url, DEFAULT_RELEASE_BASE_URL); // default preserved
    }
}
