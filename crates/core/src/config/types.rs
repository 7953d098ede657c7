use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

use crate::updater::UpdaterConfig;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub meilisearch: MeilisearchConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub updater: UpdaterConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    "0.0.0.0".parse().unwrap()
}

fn default_port() -> u16 {
    8080
}

/// Search engine configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MeilisearchConfig {
    /// Meilisearch base URL (e.g., "http://localhost:7700")
    pub url: String,
    /// Index visible to searches
    #[serde(default = "default_prod_index")]
    pub prod_index: String,
    /// Index rebuilt by the updater, swapped into production when complete
    #[serde(default = "default_staging_index")]
    pub staging_index: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_prod_index() -> String {
    "books".to_string()
}

fn default_staging_index() -> String {
    "books_tmp".to_string()
}

fn default_timeout() -> u64 {
    30
}

/// Static front-end serving configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiConfig {
    /// Directory holding the prebuilt front-end
    #[serde(default = "default_ui_location")]
    pub location: PathBuf,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            location: default_ui_location(),
        }
    }
}

fn default_ui_location() -> PathBuf {
    PathBuf::from("ui/dist")
}

/// Sanitized config for API responses (local paths and internal
/// endpoints left out)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub meilisearch: SanitizedMeilisearchConfig,
    pub updater: SanitizedUpdaterConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedMeilisearchConfig {
    pub prod_index: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedUpdaterConfig {
    pub enabled: bool,
    pub period_secs: u64,
    pub library_url: String,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            meilisearch: SanitizedMeilisearchConfig {
                prod_index: config.meilisearch.prod_index.clone(),
                timeout_secs: config.meilisearch.timeout_secs,
            },
            updater: SanitizedUpdaterConfig {
                enabled: config.updater.enabled,
                period_secs: config.updater.period_secs,
                library_url: config.updater.library_url.clone(),
            },
        }
    }
}
