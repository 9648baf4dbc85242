use metrics::{counter, describe_counter};

/// Initialize counter descriptions
pub fn init() {
    describe_counter!(
        "indexer_events_processed_total",
        "Events whose writes were committed, by event name"
    );
    describe_counter!(
        "indexer_events_skipped_total",
        "Events discarded after a domain error, by event name"
    );
    describe_counter!(
        "indexer_blocks_processed_total",
        "Total number of blocks processed"
    );
    describe_counter!(
        "indexer_trades_total",
        "Total number of Trade events indexed"
    );
    describe_counter!(
        "indexer_monsters_total",
        "Total number of creature tokens discovered"
    );
    describe_counter!(
        "indexer_errors_total",
        "Total number of errors, by class"
    );
}

/// Increment events processed counter
pub fn events_processed(event: &'static str) {
    counter!("indexer_events_processed_total", "event" => event).increment(1);
}

/// Increment skipped events counter
pub fn events_skipped(event: &'static str) {
    counter!("indexer_events_skipped_total", "event" => event).increment(1);
}

/// Increment blocks processed counter
pub fn blocks_processed(count: u64) {
    counter!("indexer_blocks_processed_total").increment(count);
}

/// Increment trades counter
pub fn trades_indexed(count: u64) {
    counter!("indexer_trades_total").increment(count);
}

/// Increment monsters counter
pub fn monsters_discovered(count: u64) {
    counter!("indexer_monsters_total").increment(count);
}

/// Increment errors counter
pub fn errors(count: u64, error_type: &'static str) {
    counter!("indexer_errors_total", "type" => error_type).increment(count);
}
