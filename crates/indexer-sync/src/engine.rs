use indexer_core::{IndexerConfig, IndexerError, Result};
use indexer_core::types::{CurrentHoldings, Monster, Trade, Trader};
use indexer_metrics::gauges;
use indexer_processor::EventProcessor;
use indexer_store::{Entity, IndexerStore};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::select;
use tokio::sync::broadcast;
use tracing::{error, info};

use crate::historical::HistoricalSyncer;
use crate::provider::ProviderManager;

/// Drives the processor: historical catch-up, then head polling
pub struct SyncEngine {
    config: IndexerConfig,
    provider: Arc<ProviderManager>,
    store: Arc<IndexerStore>,
    processor: Arc<EventProcessor>,
    /// Shared shutdown flag for graceful termination
    shutdown_flag: Arc<AtomicBool>,
}

impl SyncEngine {
    pub fn new(config: IndexerConfig, store: Arc<IndexerStore>) -> Result<Self> {
        let provider = Arc::new(ProviderManager::new(&config.rpc_url)?);
        let processor = Arc::new(EventProcessor::new(store.clone(), config.clone()));

        Ok(Self {
            config,
            provider,
            store,
            processor,
            shutdown_flag: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Get reference to the store
    pub fn store(&self) -> &Arc<IndexerStore> {
        &self.store
    }

    /// Get reference to the event processor
    pub fn processor(&self) -> &Arc<EventProcessor> {
        &self.processor
    }

    /// Run until shutdown or a fatal error
    pub async fn run(&self, mut shutdown: broadcast::Receiver<()>) -> Result<()> {
        let shutdown_flag = Arc::clone(&self.shutdown_flag);
        let mut shutdown_listener = shutdown.resubscribe();
        tokio::spawn(async move {
            let _ = shutdown_listener.recv().await;
            shutdown_flag.store(true, Ordering::SeqCst);
            info!("Shutdown flag set");
        });

        {
            let mut state = self.store.sync_state.write().await;
            if state.last_synced_block < self.config.start_block {
                *state = indexer_store::SyncState::new(self.config.start_block);
            }
        }

        let syncer = HistoricalSyncer::new(
            self.config.clone(),
            self.provider.clone(),
            self.processor.clone(),
            Arc::clone(&self.shutdown_flag),
        );

        let verified_block = syncer.sync_to_head().await?;
        if self.shutdown_flag.load(Ordering::Relaxed) {
            info!("Shutdown during historical sync, exiting");
            return Ok(());
        }

        self.store.sync_state.write().await.complete_historical_sync();
        {
            let state = self.store.sync_state.read().await;
            info!(
                verified_block = verified_block,
                monsters = state.stats.monsters_discovered,
                trades = state.stats.trades_indexed,
                events = state.stats.total_events_processed,
                skipped = state.stats.events_skipped,
                "Historical sync finished, polling for new blocks"
            );
        }

        let interval = Duration::from_millis(self.config.poll.interval_ms);
        loop {
            select! {
                _ = shutdown.recv() => {
                    info!("Shutdown signal received");
                    break;
                }
                _ = tokio::time::sleep(interval) => {
                    match self.poll_once(&syncer).await {
                        Ok(()) => {}
                        Err(IndexerError::Rpc(e)) => {
                            error!(error = %e, "Polling failed, will retry");
                        }
                        Err(e) => return Err(e),
                    }
                }
            }
        }

        info!("Sync engine shutdown complete");
        Ok(())
    }

    /// Index any blocks that appeared since the last sync
    async fn poll_once(&self, syncer: &HistoricalSyncer) -> Result<()> {
        let head = syncer.target_head().await?;
        let last = self.store.sync_state.read().await.last_synced_block;
        if head > last {
            syncer.sync_range(last + 1, head).await?;
        }
        Ok(())
    }

    /// Print current sync status
    pub async fn print_status(&self) {
        let state = self.store.sync_state.read().await;
        let monsters = self.store.count(Monster::KIND);
        let traders = self.store.count(Trader::KIND);
        let trades = self.store.count(Trade::KIND);
        let holdings = self.store.count(CurrentHoldings::KIND);

        gauges::set_memory_entities("monsters", monsters);
        gauges::set_memory_entities("traders", traders);
        gauges::set_memory_entities("trades", trades);
        gauges::set_memory_entities("holdings", holdings);

        info!(
            mode = ?state.mode,
            last_block = state.last_synced_block,
            monsters = monsters,
            traders = traders,
            trades = trades,
            holdings = holdings,
            events = state.stats.total_events_processed,
            skipped = state.stats.events_skipped,
            "Current status"
        );
    }
}
