use crate::config::ApiConfig;
use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use indexer_core::types::{Monster, Trade, Trader};
use indexer_store::{Entity, IndexerStore, SyncMode};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// HTTP server for the public endpoints
pub struct ApiServer {
    config: ApiConfig,
    store: Arc<IndexerStore>,
}

/// Sync progress reported by `/status`
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub syncing: bool,
    pub mode: &'static str,
    pub last_synced_block: u64,
    pub events_processed: u64,
    pub events_skipped: u64,
    pub monsters: usize,
    pub traders: usize,
    pub trades: usize,
}

impl ApiServer {
    pub fn new(config: ApiConfig, store: Arc<IndexerStore>) -> Self {
        Self { config, store }
    }

    pub fn router(&self) -> Router {
        let cors = if self.config.cors_enabled {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            CorsLayer::new()
        };

        Router::new()
            .route("/moninfo", get(moninfo))
            .route("/leaderboard", get(leaderboard))
            .route("/profile", get(profile))
            .route("/activity", get(activity))
            .route("/health", get(health_check))
            .route("/status", get(status))
            .with_state(self.store.clone())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Start the server
    pub async fn run(self) -> crate::Result<()> {
        let addr = self.config.address();
        let app = self.router();

        info!(address = %addr, "Starting API server");

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| crate::ApiError::Server(e.to_string()))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| crate::ApiError::Server(e.to_string()))?;

        Ok(())
    }
}

async fn moninfo() -> &'static str {
    "MonInfo"
}

async fn leaderboard() -> &'static str {
    "Leaderboard"
}

async fn profile() -> &'static str {
    "Profile"
}

async fn activity() -> &'static str {
    "Activity"
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    "OK"
}

async fn status(State(store): State<Arc<IndexerStore>>) -> Json<StatusResponse> {
    let (syncing, mode, last_synced_block, events_processed, events_skipped) = {
        let state = store.sync_state.read().await;
        let mode = match state.mode {
            SyncMode::Historical => "historical",
            SyncMode::Polling => "polling",
        };
        (
            state.is_syncing(),
            mode,
            state.last_synced_block,
            state.stats.total_events_processed,
            state.stats.events_skipped,
        )
    };

    Json(StatusResponse {
        syncing,
        mode,
        last_synced_block,
        events_processed,
        events_skipped,
        monsters: store.count(Monster::KIND),
        traders: store.count(Trader::KIND),
        trades: store.count(Trade::KIND),
    })
}
