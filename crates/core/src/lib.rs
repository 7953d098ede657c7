pub mod config;
pub mod icons;
pub mod index;
pub mod library;
pub mod resolver;
pub mod testing;
pub mod updater;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, MeilisearchConfig,
    SanitizedConfig, ServerConfig, UiConfig,
};
pub use index::{BookDocument, IndexError, MeilisearchClient, SearchIndex, SearchRequest};
pub use updater::{RunOutcome, Updater, UpdaterConfig, UpdaterError};
