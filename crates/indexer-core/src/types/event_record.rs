use alloy_primitives::{Address, B256};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw copy of a decoded contract event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// chainId_blockNumber_logIndex
    pub id: String,
    pub event_name: String,
    pub contract: Address,
    pub params: BTreeMap<String, String>,
    pub tx_hash: B256,
    pub block_number: u64,
    pub timestamp: u64,
}

impl EventRecord {
    pub fn make_id(chain_id: u64, block_number: u64, log_index: u64) -> String {
        format!("{}_{}_{}", chain_id, block_number, log_index)
    }
}
