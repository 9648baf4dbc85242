use indexer_api::{ApiConfig, ApiServer};
use indexer_core::IndexerConfig;
use indexer_metrics::{MetricsConfig, MetricsServer};
use indexer_store::IndexerStore;
use indexer_sync::SyncEngine;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{error, info, warn, Level};
use tracing_subscriber::EnvFilter;

/// Seconds between status log lines
const STATUS_INTERVAL_SECS: u64 = 30;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file (ignore if not found)
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(Level::INFO.into())
                .add_directive("indexer_sync=info".parse()?)
                .add_directive("indexer_processor=info".parse()?),
        )
        .init();

    info!("Creature indexer starting...");

    let config = match IndexerConfig::load() {
        Ok(config) => {
            info!(
                chain_id = config.chain_id,
                factory = ?config.factory,
                start_block = config.start_block,
                "Configuration loaded from deployment"
            );
            config
        }
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    let store = Arc::new(IndexerStore::new());

    let engine = match SyncEngine::new(config, store.clone()) {
        Ok(engine) => Arc::new(engine),
        Err(e) => {
            error!(error = %e, "Failed to create sync engine");
            std::process::exit(1);
        }
    };

    let (shutdown_tx, shutdown_rx) = broadcast::channel::<()>(1);

    let shutdown_tx_clone = shutdown_tx.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Shutdown signal received (Ctrl+C)");
        shutdown_tx_clone.send(()).ok();
    });

    let metrics_config = MetricsConfig::from_env();
    if metrics_config.enabled {
        match indexer_metrics::init() {
            Ok(handle) => {
                let metrics_server = MetricsServer::new(metrics_config, handle);
                tokio::spawn(async move {
                    if let Err(e) = metrics_server.run().await {
                        error!(error = %e, "Metrics server error");
                    }
                });
                info!("Metrics server started");
            }
            Err(e) => warn!(error = %e, "Metrics recorder unavailable, continuing without metrics"),
        }
    }

    let api_server = ApiServer::new(ApiConfig::from_env(), store.clone());
    tokio::spawn(async move {
        if let Err(e) = api_server.run().await {
            error!(error = %e, "API server error");
        }
    });
    info!("API server started");

    let status_engine = engine.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(STATUS_INTERVAL_SECS));
        loop {
            interval.tick().await;
            status_engine.print_status().await;
        }
    });

    if let Err(e) = engine.run(shutdown_rx).await {
        error!(error = %e, "Sync engine error");
        std::process::exit(1);
    }

    info!("Shutting down...");
    engine.print_status().await;
    match store.state_hash() {
        Ok(hash) => info!(state_hash = %hash, "Creature indexer shutdown complete"),
        Err(e) => warn!(error = %e, "Creature indexer shutdown complete, state digest unavailable"),
    }
    Ok(())
}
