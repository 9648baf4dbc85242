use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use tracing::{debug, info, warn};

/// Configuration for adaptive batch sizing
#[derive(Debug, Clone)]
pub struct AdaptiveBatchConfig {
    /// Initial block range per eth_getLogs call (default: 2000)
    pub initial_size: u64,
    /// Minimum batch size (floor, default: 10)
    pub min_size: u64,
    /// Maximum batch size (ceiling, default: 10000)
    pub max_size: u64,
    /// Factor to multiply by on error (default: 0.5 = halve)
    pub decrease_factor: f64,
    /// Factor to increase by on success (default: 0.1 = 10% increase)
    pub increase_factor: f64,
    /// Number of consecutive successes before increasing (default: 10)
    pub success_threshold: u32,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl AdaptiveBatchConfig {
    pub fn from_env() -> Self {
        Self {
            initial_size: env_or("BATCH_SIZE_INITIAL", 2000),
            min_size: env_or("BATCH_SIZE_MIN", 10),
            max_size: env_or("BATCH_SIZE_MAX", 10000),
            decrease_factor: env_or("BATCH_SIZE_DECREASE_FACTOR", 0.5),
            increase_factor: env_or("BATCH_SIZE_INCREASE_FACTOR", 0.1),
            success_threshold: env_or("BATCH_SIZE_SUCCESS_THRESHOLD", 10),
        }
    }
}

impl Default for AdaptiveBatchConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// AIMD (Additive Increase, Multiplicative Decrease) batch controller.
/// Shrinks the block range when the node rejects a query as too large and
/// slowly grows it back while queries succeed.
pub struct AdaptiveBatchController {
    current_size: AtomicU64,
    success_count: AtomicU32,
    config: AdaptiveBatchConfig,
}

impl AdaptiveBatchController {
    pub fn new(config: AdaptiveBatchConfig) -> Self {
        let initial = config.initial_size.clamp(config.min_size, config.max_size);
        info!(
            initial_size = initial,
            min = config.min_size,
            max = config.max_size,
            success_threshold = config.success_threshold,
            "AdaptiveBatchController initialized"
        );
        Self {
            current_size: AtomicU64::new(initial),
            success_count: AtomicU32::new(0),
            config,
        }
    }

    /// Get the current batch size
    pub fn get_size(&self) -> u64 {
        self.current_size.load(Ordering::Relaxed)
    }

    /// Inclusive range starting at `from` that fits the current size and
    /// does not pass `to`
    pub fn next_range(&self, from: u64, to: u64) -> (u64, u64) {
        let size = self.get_size().max(1);
        (from, from.saturating_add(size - 1).min(to))
    }

    /// Report a successful batch operation
    pub fn report_success(&self) {
        let count = self.success_count.fetch_add(1, Ordering::Relaxed) + 1;
        if count < self.config.success_threshold {
            return;
        }

        self.success_count.store(0, Ordering::Relaxed);
        let current = self.current_size.load(Ordering::Relaxed);
        let increase = (current as f64 * self.config.increase_factor).max(1.0) as u64;
        let new_size = (current + increase).min(self.config.max_size);

        if new_size > current {
            self.current_size.store(new_size, Ordering::Relaxed);
            indexer_metrics::gauges::set_batch_size(new_size);
            debug!(from = current, to = new_size, "Batch size increased");
        }
    }

    /// Report a range the node refused; shrinks immediately
    pub fn report_error(&self) {
        self.success_count.store(0, Ordering::Relaxed);
        let current = self.current_size.load(Ordering::Relaxed);
        let new_size = ((current as f64 * self.config.decrease_factor) as u64)
            .max(self.config.min_size);

        self.current_size.store(new_size, Ordering::Relaxed);
        indexer_metrics::gauges::set_batch_size(new_size);
        warn!(from = current, to = new_size, "Batch size decreased");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(initial: u64) -> AdaptiveBatchController {
        AdaptiveBatchController::new(AdaptiveBatchConfig {
            initial_size: initial,
            min_size: 100,
            max_size: 10000,
            decrease_factor: 0.5,
            increase_factor: 0.1,
            success_threshold: 3,
        })
    }

    #[test]
    fn test_aimd_grows_and_halves() {
        let controller = controller(1000);
        assert_eq!(controller.get_size(), 1000);

        controller.report_success();
        controller.report_success();
        assert_eq!(controller.get_size(), 1000);
        controller.report_success();
        assert_eq!(controller.get_size(), 1100);

        controller.report_error();
        assert_eq!(controller.get_size(), 550);

        for _ in 0..4 {
            controller.report_error();
        }
        assert_eq!(controller.get_size(), 100);
    }

    #[test]
    fn test_initial_size_is_clamped() {
        assert_eq!(controller(50_000).get_size(), 10000);
        assert_eq!(controller(1).get_size(), 100);
    }

    #[test]
    fn test_next_range_stops_at_target() {
        let controller = controller(1000);
        assert_eq!(controller.next_range(1, 5000), (1, 1000));
        assert_eq!(controller.next_range(4500, 5000), (4500, 5000));
        assert_eq!(controller.next_range(u64::MAX - 1, u64::MAX), (u64::MAX - 1, u64::MAX));
    }
}
