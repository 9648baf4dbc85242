use alloy_primitives::{Address, B256};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexerError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Deployment file not found: {0}")]
    DeploymentFileNotFound(String),

    #[error("Failed to parse deployment file: {0}")]
    DeploymentParseError(String),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Event decode error: {0}")]
    EventDecode(String),

    #[error("Monster not found: {0}")]
    MonsterNotFound(Address),

    #[error("Trader not found: {0}")]
    TraderNotFound(Address),

    #[error("Trade with zero amount: tx={tx_hash}, log_index={log_index}")]
    ZeroTradeAmount { tx_hash: B256, log_index: u64 },

    #[error("Numeric overflow: {0}")]
    Overflow(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Sync error: {0}")]
    Sync(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IndexerError {
    /// Fatal errors halt the event stream; everything else is a domain
    /// error that discards the current event's writes and moves on.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            IndexerError::Store(_) | IndexerError::Rpc(_) | IndexerError::Sync(_) | IndexerError::Io(_)
        )
    }

    /// Short label used for error metrics
    pub fn kind(&self) -> &'static str {
        match self {
            IndexerError::MissingEnvVar(_)
            | IndexerError::DeploymentFileNotFound(_)
            | IndexerError::DeploymentParseError(_) => "config",
            IndexerError::Rpc(_) => "rpc",
            IndexerError::EventDecode(_) => "decode",
            IndexerError::MonsterNotFound(_) | IndexerError::TraderNotFound(_) => {
                "missing_prerequisite"
            }
            IndexerError::ZeroTradeAmount { .. } | IndexerError::Overflow(_) => "invariant",
            IndexerError::Store(_) => "store",
            IndexerError::Sync(_) => "sync",
            IndexerError::Io(_) => "io",
        }
    }
}

pub type Result<T> = std::result::Result<T, IndexerError>;
