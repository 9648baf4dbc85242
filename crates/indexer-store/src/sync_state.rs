/// Current sync mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SyncMode {
    #[default]
    Historical,
    Polling,
}

/// Sync statistics
#[derive(Debug, Clone, Default)]
pub struct SyncStats {
    pub total_blocks_processed: u64,
    pub total_events_processed: u64,
    /// Events whose writes were discarded after a domain error
    pub events_skipped: u64,
    pub monsters_discovered: u64,
    pub trades_indexed: u64,
}

/// Sync state tracking
#[derive(Debug, Clone, Default)]
pub struct SyncState {
    /// Last fully synced block number
    pub last_synced_block: u64,

    /// Whether historical sync is complete
    pub historical_sync_complete: bool,

    /// Current sync mode
    pub mode: SyncMode,

    /// Statistics
    pub stats: SyncStats,
}

impl SyncState {
    pub fn new(start_block: u64) -> Self {
        Self {
            last_synced_block: start_block.saturating_sub(1),
            ..Default::default()
        }
    }

    /// Update last synced block
    pub fn set_last_synced_block(&mut self, block: u64) {
        if block > self.last_synced_block {
            self.stats.total_blocks_processed += block - self.last_synced_block;
        }
        self.last_synced_block = block;
    }

    /// Mark historical sync as complete
    pub fn complete_historical_sync(&mut self) {
        self.historical_sync_complete = true;
        self.mode = SyncMode::Polling;
    }

    pub fn record_event(&mut self) {
        self.stats.total_events_processed += 1;
    }

    pub fn record_skipped(&mut self) {
        self.stats.events_skipped += 1;
    }

    pub fn record_monster(&mut self) {
        self.stats.monsters_discovered += 1;
    }

    pub fn record_trade(&mut self) {
        self.stats.trades_indexed += 1;
    }

    /// Get last synced block
    pub fn last_synced_block(&self) -> u64 {
        self.last_synced_block
    }

    /// Check if still catching up with the chain
    pub fn is_syncing(&self) -> bool {
        !self.historical_sync_complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_progress_counts_range() {
        let mut state = SyncState::new(100);
        assert_eq!(state.last_synced_block(), 99);
        state.set_last_synced_block(149);
        assert_eq!(state.stats.total_blocks_processed, 50);
        assert!(state.is_syncing());
        state.complete_historical_sync();
        assert_eq!(state.mode, SyncMode::Polling);
        assert!(!state.is_syncing());
    }
}
