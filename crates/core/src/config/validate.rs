use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is non-zero
/// - Meilisearch URL is non-empty and production/staging index names differ
/// - Updater settings are coherent when the updater is enabled
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port must be non-zero".to_string(),
        ));
    }

    if config.meilisearch.url.is_empty() {
        return Err(ConfigError::ValidationError(
            "meilisearch.url must not be empty".to_string(),
        ));
    }

    if config.meilisearch.prod_index == config.meilisearch.staging_index {
        return Err(ConfigError::ValidationError(
            "meilisearch.prod_index and meilisearch.staging_index must differ".to_string(),
        ));
    }

    if config.updater.enabled {
        if config.updater.library_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "updater.library_url must not be empty when the updater is enabled".to_string(),
            ));
        }
        if config.updater.period_secs == 0 {
            return Err(ConfigError::ValidationError(
                "updater.period_secs must be greater than zero".to_string(),
            ));
        }
    }

    Ok(())
}
