use std::sync::Arc;
use zimplorer_core::{Config, SanitizedConfig, SearchIndex};

/// Shared application state
pub struct AppState {
    config: Config,
    engine: Arc<dyn SearchIndex>,
}

impl AppState {
    pub fn new(config: Config, engine: Arc<dyn SearchIndex>) -> Self {
        Self { config, engine }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn engine(&self) -> &dyn SearchIndex {
        self.engine.as_ref()
    }

    /// Name of the index searches are served from.
    pub fn prod_index(&self) -> &str {
        &self.config.meilisearch.prod_index
    }

    pub fn ui_location(&self) -> &std::path::Path {
        &self.config.ui.location
    }
}
