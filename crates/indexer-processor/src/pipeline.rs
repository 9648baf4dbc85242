use alloy::rpc::types::Log;
use indexer_core::types::EventEnvelope;
use indexer_core::{IndexerConfig, Result};
use indexer_metrics::{counters, histograms};
use indexer_store::IndexerStore;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, trace, warn};

use crate::decode::decode_log;
use crate::handlers::{dispatch, Applied};

/// Event processor that routes decoded events to their reducers, one
/// transaction per event
pub struct EventProcessor {
    store: Arc<IndexerStore>,
    config: IndexerConfig,
}

impl EventProcessor {
    pub fn new(store: Arc<IndexerStore>, config: IndexerConfig) -> Self {
        Self { store, config }
    }

    /// Get reference to the store
    pub fn store(&self) -> &Arc<IndexerStore> {
        &self.store
    }

    /// Get reference to config
    pub fn config(&self) -> &IndexerConfig {
        &self.config
    }

    /// Check if a log is from a contract we care about
    pub fn is_relevant_log(&self, log: &Log) -> bool {
        let address = log.address();
        address == self.config.factory || self.store.registry.is_known(&address)
    }

    /// Decode and process a single log. `block_timestamp` is used when the
    /// log does not carry one.
    pub async fn process_log(&self, log: Log, block_timestamp: u64) -> Result<()> {
        if !self.is_relevant_log(&log) {
            trace!(address = ?log.address(), "Skipping log from unknown contract");
            return Ok(());
        }

        let envelope = match decode_log(&log, self.config.chain_id, self.config.factory, block_timestamp) {
            Ok(Some(envelope)) => envelope,
            Ok(None) => return Ok(()),
            Err(e) => {
                warn!(
                    error = %e,
                    block = log.block_number.unwrap_or_default(),
                    log_index = log.log_index.unwrap_or_default(),
                    "Failed to decode log, skipping"
                );
                counters::errors(1, e.kind());
                self.store.sync_state.write().await.record_skipped();
                return Ok(());
            }
        };

        self.process(envelope).await
    }

    /// Reduce one event. Domain errors discard the event's writes and are
    /// logged; fatal errors are returned and halt the stream.
    pub async fn process(&self, envelope: EventEnvelope) -> Result<()> {
        let start = Instant::now();
        let name = envelope.event.name();
        let meta = &envelope.meta;

        debug!(
            event = name,
            block = meta.block_number,
            log_index = meta.log_index,
            address = ?meta.src_address,
            tx_hash = ?meta.tx_hash,
            "Processing event"
        );

        let outcome = {
            let mut tx = self.store.begin();
            match dispatch(&mut tx, &envelope) {
                Ok(applied) => Ok((applied, tx.commit())),
                Err(e) => {
                    tx.rollback();
                    Err(e)
                }
            }
        };

        let elapsed = start.elapsed();
        histograms::event_processing_duration(elapsed, name);

        match outcome {
            Ok((applied, rows)) => {
                counters::events_processed(name);
                self.record_applied(applied).await;
                debug!(
                    event = name,
                    block = meta.block_number,
                    log_index = meta.log_index,
                    rows = rows,
                    total_us = elapsed.as_micros(),
                    "Event committed"
                );
                Ok(())
            }
            Err(e) if e.is_fatal() => {
                counters::errors(1, e.kind());
                error!(
                    event = name,
                    block = meta.block_number,
                    log_index = meta.log_index,
                    error = %e,
                    "Fatal error while processing event"
                );
                Err(e)
            }
            Err(e) => {
                counters::errors(1, e.kind());
                counters::events_skipped(name);
                self.store.sync_state.write().await.record_skipped();
                warn!(
                    event = name,
                    block = meta.block_number,
                    log_index = meta.log_index,
                    tx_hash = ?meta.tx_hash,
                    error = %e,
                    kind = e.kind(),
                    "Event skipped, writes discarded"
                );
                Ok(())
            }
        }
    }

    async fn record_applied(&self, applied: Applied) {
        let mut state = self.store.sync_state.write().await;
        state.record_event();
        if applied.monster_created {
            state.record_monster();
            counters::monsters_discovered(1);
        }
        if applied.trade_indexed {
            state.record_trade();
            counters::trades_indexed(1);
        }
    }

    /// Process multiple logs in order, all sharing one fallback timestamp
    pub async fn process_logs(&self, logs: Vec<Log>, block_timestamp: u64) -> Result<()> {
        for log in logs {
            self.process_log(log, block_timestamp).await?;
        }
        Ok(())
    }

    /// Process already decoded events in order
    pub async fn process_all(&self, events: impl IntoIterator<Item = EventEnvelope>) -> Result<()> {
        for envelope in events {
            self.process(envelope).await?;
        }
        Ok(())
    }
}
