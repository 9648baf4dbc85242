pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod numeric;
pub mod types;

pub use config::{IndexerConfig, PollConfig, SyncConfig};
pub use error::{IndexerError, Result};
