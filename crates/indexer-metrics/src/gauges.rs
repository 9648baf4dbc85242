use metrics::{describe_gauge, gauge};

/// Initialize gauge descriptions
pub fn init() {
    describe_gauge!(
        "indexer_current_block",
        "Last block fully processed"
    );
    describe_gauge!(
        "indexer_chain_head",
        "Latest block reported by the RPC node"
    );
    describe_gauge!(
        "indexer_batch_size",
        "Current eth_getLogs block range"
    );
    describe_gauge!(
        "indexer_memory_entities",
        "Number of committed rows per entity collection"
    );
    describe_gauge!(
        "indexer_registered_tokens",
        "Token contracts whose events are delivered"
    );
}

/// Set current block gauge
pub fn set_current_block(block: u64) {
    gauge!("indexer_current_block").set(block as f64);
}

pub fn set_chain_head(block: u64) {
    gauge!("indexer_chain_head").set(block as f64);
}

pub fn set_batch_size(size: u64) {
    gauge!("indexer_batch_size").set(size as f64);
}

/// Set the row count of one entity collection
pub fn set_memory_entities(collection: &'static str, count: usize) {
    gauge!("indexer_memory_entities", "collection" => collection).set(count as f64);
}

pub fn set_registered_tokens(count: usize) {
    gauge!("indexer_registered_tokens").set(count as f64);
}
