//! Updater configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the periodic library updater.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdaterConfig {
    /// Enable/disable background updates.
    /// Useful mostly for local development on a stable dataset.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Seconds between update runs.
    #[serde(default = "default_period")]
    pub period_secs: u64,

    /// URL of the upstream XML library.
    #[serde(default = "default_library_url")]
    pub library_url: String,

    /// Where the downloaded XML library is stored.
    #[serde(default = "default_library_path")]
    pub library_path: PathBuf,

    /// Where the per-category JSON summary is written.
    #[serde(default = "default_summary_path")]
    pub summary_path: PathBuf,

    /// Directory holding the content-addressed favicon files.
    #[serde(default = "default_favicons_path")]
    pub favicons_path: PathBuf,

    /// File listing book names to leave out of the index.
    #[serde(default = "default_ignored_books_path")]
    pub ignored_books_path: PathBuf,

    /// File mapping book names to replacement names.
    #[serde(default = "default_overridden_books_path")]
    pub overridden_books_path: PathBuf,

    /// HTTP timeout for the library download (seconds).
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,
}

fn default_enabled() -> bool {
    true
}

fn default_period() -> u64 {
    3600 // 1 hour
}

fn default_library_url() -> String {
    "https://download.kiwix.org/library/library_zim.xml".to_string()
}

fn default_library_path() -> PathBuf {
    PathBuf::from("data/library_zim.xml")
}

fn default_summary_path() -> PathBuf {
    PathBuf::from("data/library.json")
}

fn default_favicons_path() -> PathBuf {
    PathBuf::from("data/favicons")
}

fn default_ignored_books_path() -> PathBuf {
    PathBuf::from("settings/ignored_books")
}

fn default_overridden_books_path() -> PathBuf {
    PathBuf::from("settings/overridden_books")
}

fn default_http_timeout() -> u64 {
    30
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            period_secs: default_period(),
            library_url: default_library_url(),
            library_path: default_library_path(),
            summary_path: default_summary_path(),
            favicons_path: default_favicons_path(),
            ignored_books_path: default_ignored_books_path(),
            overridden_books_path: default_overridden_books_path(),
            http_timeout_secs: default_http_timeout(),
        }
    }
}
