use alloy::rpc::types::{Filter, Log};
use alloy_primitives::{Address, B256};
use futures::future::try_join_all;
use indexer_core::{IndexerConfig, IndexerError, Result};
use indexer_metrics::{counters, gauges, histograms};
use indexer_processor::{EventProcessor, FACTORY_TOPICS, TOKEN_TOPICS};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

use crate::adaptive_batch::{AdaptiveBatchConfig, AdaptiveBatchController};
use crate::provider::ProviderManager;

/// Token addresses per eth_getLogs filter
const ADDRESS_CHUNK: usize = 500;

const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Range sync over eth_getLogs with adaptive batch sizing.
///
/// Each range is processed in two phases: factory logs first, so tokens
/// created inside the range are registered, then token logs for every
/// registered address. Factory reducers are idempotent, which makes a
/// range safe to retry after its first phase.
pub struct HistoricalSyncer {
    config: IndexerConfig,
    provider: Arc<ProviderManager>,
    processor: Arc<EventProcessor>,
    batch_controller: AdaptiveBatchController,
    /// Shutdown flag - checked between ranges
    shutdown: Arc<AtomicBool>,
}

impl HistoricalSyncer {
    pub fn new(
        config: IndexerConfig,
        provider: Arc<ProviderManager>,
        processor: Arc<EventProcessor>,
        shutdown: Arc<AtomicBool>,
    ) -> Self {
        Self {
            config,
            provider,
            processor,
            batch_controller: AdaptiveBatchController::new(AdaptiveBatchConfig::from_env()),
            shutdown,
        }
    }

    fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::Relaxed)
    }

    async fn last_synced_block(&self) -> u64 {
        self.processor.store().sync_state.read().await.last_synced_block
    }

    /// Latest block that is deep enough to index
    pub async fn target_head(&self) -> Result<u64> {
        let head = self.provider.block_number().await?;
        gauges::set_chain_head(head);
        Ok(head.saturating_sub(self.config.poll.confirmations))
    }

    /// Sync from the start block to the current head, repeating until no
    /// new blocks arrived meanwhile. Returns the last synced block.
    pub async fn sync_to_head(&self) -> Result<u64> {
        let start_block = self.config.start_block;
        let initial_target = self.target_head().await?;

        info!(
            start = start_block,
            end = initial_target,
            total = initial_target.saturating_sub(start_block),
            "Starting historical sync"
        );

        self.sync_range(start_block, initial_target).await?;

        loop {
            let last_synced = self.last_synced_block().await;
            if self.is_shutdown() {
                info!(last_synced = last_synced, "Historical sync interrupted by shutdown");
                return Ok(last_synced);
            }

            let latest = self.target_head().await?;
            if last_synced >= latest {
                info!(
                    verified_block = last_synced,
                    tokens = self.processor.store().registry.count(),
                    "Historical sync complete"
                );
                return Ok(last_synced);
            }

            info!(
                from = last_synced + 1,
                to = latest,
                gap = latest - last_synced,
                "Syncing blocks that arrived during historical sync"
            );
            self.sync_range(last_synced + 1, latest).await?;
        }
    }

    /// Process every block in `[from, to]`, one adaptive range at a time
    pub async fn sync_range(&self, from: u64, to: u64) -> Result<()> {
        let max_attempts = self.config.sync.retry_attempts.max(1);
        let mut current = from;
        let mut attempts = 0u32;
        let mut delay = Duration::from_millis(self.config.sync.retry_delay_ms);

        while current <= to {
            if self.is_shutdown() {
                return Ok(());
            }

            let (start, end) = self.batch_controller.next_range(current, to);
            match self.process_range(start, end).await {
                Ok(()) => {
                    self.batch_controller.report_success();
                    attempts = 0;
                    delay = Duration::from_millis(self.config.sync.retry_delay_ms);
                    match end.checked_add(1) {
                        Some(next) => current = next,
                        None => break,
                    }
                }
                Err(e) if is_retryable_error(&e) && attempts + 1 < max_attempts => {
                    attempts += 1;
                    counters::errors(1, e.kind());
                    let msg = e.to_string().to_lowercase();

                    if is_too_many_logs_error(&msg) {
                        // Smaller range on the next attempt, no wait
                        self.batch_controller.report_error();
                        continue;
                    }

                    let wait = if is_rate_limit_error(&msg) {
                        Duration::from_secs(parse_retry_seconds(&msg).unwrap_or(10))
                    } else {
                        delay
                    };

                    warn!(
                        from = start,
                        to = end,
                        attempt = attempts,
                        max_attempts = max_attempts,
                        delay_ms = wait.as_millis(),
                        error = %e,
                        "Range failed, retrying with backoff"
                    );
                    tokio::time::sleep(wait).await;
                    delay = (delay * 2).min(MAX_BACKOFF);
                }
                Err(e) => {
                    error!(from = start, to = end, attempts = attempts + 1, error = %e, "Range failed");
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    async fn process_range(&self, from: u64, to: u64) -> Result<()> {
        let batch_start = Instant::now();
        let store = self.processor.store();
        let mut timestamps = HashMap::new();

        let factory_logs = self
            .fetch_logs(from, to, &[self.config.factory], &FACTORY_TOPICS)
            .await?;
        let tokens_before = store.registry.count();
        let factory_events = factory_logs.len();
        self.process_sorted(factory_logs, &mut timestamps).await?;

        let discovered = store.registry.count().saturating_sub(tokens_before);
        if discovered > 0 {
            info!(from = from, to = to, new_tokens = discovered, "Discovered creature tokens");
        }

        let fetch_start = Instant::now();
        let tokens = store.registry.addresses();
        let token_logs = self.fetch_logs(from, to, &tokens, &TOKEN_TOPICS).await?;
        let fetch_ms = fetch_start.elapsed().as_millis();
        let token_events = token_logs.len();

        let process_start = Instant::now();
        self.process_sorted(token_logs, &mut timestamps).await?;
        let process_ms = process_start.elapsed().as_millis();

        store.sync_state.write().await.set_last_synced_block(to);
        gauges::set_current_block(to);
        gauges::set_registered_tokens(store.registry.count());
        counters::blocks_processed(to - from + 1);
        histograms::batch_processing_duration(batch_start.elapsed());

        info!(
            from = from,
            to = to,
            factory_events = factory_events,
            token_events = token_events,
            tokens = tokens.len(),
            fetch_ms = fetch_ms,
            process_ms = process_ms,
            total_ms = batch_start.elapsed().as_millis(),
            "Batch complete"
        );
        Ok(())
    }

    /// Process logs in (block, log index) order. Timestamps are resolved
    /// before the first log is applied so an RPC failure leaves the range
    /// untouched.
    async fn process_sorted(&self, mut logs: Vec<Log>, timestamps: &mut HashMap<u64, u64>) -> Result<()> {
        logs.sort_by_key(log_position);

        let mut stamped = Vec::with_capacity(logs.len());
        for log in logs {
            let timestamp = self.block_timestamp(&log, timestamps).await?;
            stamped.push((log, timestamp));
        }

        for (log, timestamp) in stamped {
            self.processor.process_log(log, timestamp).await?;
        }
        Ok(())
    }

    /// Timestamp carried by the log, else looked up once per block
    async fn block_timestamp(&self, log: &Log, cache: &mut HashMap<u64, u64>) -> Result<u64> {
        if let Some(timestamp) = log.block_timestamp {
            return Ok(timestamp);
        }
        let block = log.block_number.unwrap_or_default();
        if let Some(timestamp) = cache.get(&block) {
            return Ok(*timestamp);
        }
        let timestamp = self.provider.block_timestamp(block).await?;
        cache.insert(block, timestamp);
        Ok(timestamp)
    }

    /// Logs matching any of `topics` from any of `addresses`
    async fn fetch_logs(
        &self,
        from: u64,
        to: u64,
        addresses: &[Address],
        topics: &[B256],
    ) -> Result<Vec<Log>> {
        if addresses.is_empty() {
            return Ok(vec![]);
        }

        let requests = addresses.chunks(ADDRESS_CHUNK).map(|chunk| {
            let filter = Filter::new()
                .address(chunk.to_vec())
                .event_signature(topics.to_vec())
                .from_block(from)
                .to_block(to);
            async move { self.provider.logs(&filter).await }
        });

        let logs: Vec<Log> = try_join_all(requests).await?.into_iter().flatten().collect();
        if !logs.is_empty() {
            debug!(
                addresses = addresses.len(),
                from = from,
                to = to,
                count = logs.len(),
                "Fetched event logs"
            );
        }
        Ok(logs)
    }
}

fn log_position(log: &Log) -> (u64, u64) {
    (
        log.block_number.unwrap_or_default(),
        log.log_index.unwrap_or_default(),
    )
}

/// Node refused the range as too large
fn is_too_many_logs_error(msg: &str) -> bool {
    msg.contains("too many logs")
        || msg.contains("-32005")
        || msg.contains("query returned more than")
        || msg.contains("block range")
}

fn is_rate_limit_error(msg: &str) -> bool {
    msg.contains("rate limit")
        || msg.contains("too many requests")
        || msg.contains("429")
        || msg.contains("resource exhausted")
}

fn is_connection_error(msg: &str) -> bool {
    msg.contains("timeout")
        || msg.contains("timed out")
        || msg.contains("connection")
        || msg.contains("eof")
        || msg.contains("broken pipe")
        || msg.contains("reset by peer")
        || msg.contains("error sending request")
        || msg.contains("network")
        || msg.contains("dns")
        || msg.contains("unreachable")
        || msg.contains("502")
        || msg.contains("503")
}

/// Only RPC failures are retried; store errors halt the sync
fn is_retryable_error(error: &IndexerError) -> bool {
    match error {
        IndexerError::Rpc(msg) => {
            let msg = msg.to_lowercase();
            is_too_many_logs_error(&msg) || is_rate_limit_error(&msg) || is_connection_error(&msg)
        }
        _ => false,
    }
}

/// Wait hint from a rate-limit message ("retry after 30 seconds", "wait 5s")
fn parse_retry_seconds(msg: &str) -> Option<u64> {
    let patterns = [
        r"retry.{0,10}?(\d+)\s*(?:second|sec|s\b)",
        r"wait.{0,10}?(\d+)\s*(?:second|sec|s\b)",
        r"after\s+(\d+)\s*(?:second|sec|s\b)",
    ];

    patterns.iter().find_map(|pattern| {
        let re = regex::Regex::new(pattern).ok()?;
        let secs = re.captures(msg)?.get(1)?.as_str().parse::<u64>().ok()?;
        Some(secs.max(1))
    })
}
