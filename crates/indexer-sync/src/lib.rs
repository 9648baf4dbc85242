mod adaptive_batch;
mod engine;
mod historical;
mod provider;

pub use adaptive_batch::{AdaptiveBatchConfig, AdaptiveBatchController};
pub use engine::SyncEngine;
pub use historical::HistoricalSyncer;
pub use provider::ProviderManager;
