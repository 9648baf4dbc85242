use alloy_primitives::U256;
use indexer_core::constants::GLOBAL_STATS_ID;
use indexer_core::types::GlobalStats;
use indexer_core::Result;
use indexer_store::EntityStore;
use tracing::debug;

/// Add a trade's protocol fee to the singleton, creating it on first use
pub fn add_protocol_fee<S: EntityStore>(store: &mut S, fee: U256) -> Result<GlobalStats> {
    let stats = match store.get::<GlobalStats>(GLOBAL_STATS_ID)? {
        Some(stats) => stats,
        None => {
            debug!("Creating global stats");
            GlobalStats::new()
        }
    };

    let stats = stats.with_fee(fee);
    store.set(stats.clone())?;
    Ok(stats)
}
