//! Application configuration loaded from a TOML file.
//!
//! Default location: `~/.config/asset-management/config.toml`, overridable
//! with `ASSET_MANAGEMENT_CONFIG`. A missing file yields the defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::infrastructure::seed::SeedConfig;
use crate::infrastructure::DatabaseConfig;
use crate::shared::{InfraError, PagingPolicy};

pub const CONFIG_ENV_VAR: &str = "ASSET_MANAGEMENT_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub pagination: PagingPolicy,
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origin used in pagination links; `None` derives it from host and port.
    pub public_base_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            public_base_url: None,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn base_url(&self) -> String {
        match &self.public_base_url {
            Some(url) if !url.trim().is_empty() => url.trim().to_string(),
            _ => {
                let host = match self.host.as_str() {
                    "0.0.0.0" | "::" | "" => "localhost",
                    other => other,
                };
                format!("http://{}:{}/", host, self.port)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; `RUST_LOG` wins when set
    pub level: String,
    /// `plain` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "plain".to_string(),
        }
    }
}

impl AppConfig {
    /// Reads `path`; a missing file is not an error.
    pub fn load(path: &Path) -> Result<Self, InfraError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "Config file not found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn from_toml(text: &str) -> Result<Self, InfraError> {
        let mut config: Self = toml::from_str(text)?;
        config.pagination = config.pagination.sanitized();
        Ok(config)
    }
}

/// `$ASSET_MANAGEMENT_CONFIG`, else the per-user config directory.
pub fn default_config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("asset-management")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Location;

    #[test]
    fn empty_file_gives_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.pagination.default_page_size, 10);
        assert!(config.seed.enabled);
    }

    #[test]
    fn sections_override_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [server]
            port = 9090
            public_base_url = "https://assets.example.com/"

            [database]
            url = "sqlite::memory:"

            [logging]
            format = "json"

            [pagination]
            default_page_size = 500
            max_page_size = 50

            [seed]
            enabled = false
            location = "DaNang"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.base_url(), "https://assets.example.com/");
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.pagination.default_page_size, 50);
        assert_eq!(config.pagination.max_page_size, 50);
        assert!(!config.seed.enabled);
        assert_eq!(config.seed.location, Location::DaNang);
    }

    #[test]
    fn base_url_falls_back_to_localhost() {
        let server = ServerConfig::default();
        assert_eq!(server.address(), "0.0.0.0:8080");
        assert_eq!(server.base_url(), "http://localhost:8080/");
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let err = AppConfig::from_toml("[server]\nport = \"eighty\"").unwrap_err();
        assert!(matches!(err, InfraError::Config(_)));
    }

    #[test]
    fn missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("asset-management-missing").join("config.toml");
        assert_eq!(AppConfig::load(&path).unwrap(), AppConfig::default());
    }
}
