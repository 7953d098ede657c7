mod api;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use zimplorer_core::index::IndexPublisher;
use zimplorer_core::library::HttpLibrarySource;
use zimplorer_core::{
    load_config, validate_config, MeilisearchClient, SearchIndex, Updater,
};

use api::create_router;
use state::AppState;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("ZIMPLORER_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Search engine: {}", config.meilisearch.url);

    // Create search engine client
    let engine: Arc<dyn SearchIndex> = Arc::new(
        MeilisearchClient::new(&config.meilisearch)
            .context("Failed to create search engine client")?,
    );

    // Create and start the updater if enabled
    let updater = if config.updater.enabled {
        info!(
            "Initializing library updater (period: {}s, source: {})",
            config.updater.period_secs, config.updater.library_url
        );
        let source = Arc::new(
            HttpLibrarySource::new(
                config.updater.library_url.clone(),
                config.updater.http_timeout_secs,
            )
            .context("Failed to create library fetcher")?,
        );
        let publisher = IndexPublisher::new(
            Arc::clone(&engine),
            config.meilisearch.prod_index.clone(),
            config.meilisearch.staging_index.clone(),
        );
        let updater = Arc::new(Updater::new(config.updater.clone(), source, publisher));
        updater.start();
        info!("Library updater started");
        Some(updater)
    } else {
        info!("Library updater disabled in config");
        None
    };

    // Create app state
    let state = Arc::new(AppState::new(config.clone(), engine));

    // Create router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // Stop updater if running
    if let Some(ref updater) = updater {
        info!("Stopping updater...");
        updater.stop();
        info!("Updater stopped");
    }

    info!("Server shutting down...");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
