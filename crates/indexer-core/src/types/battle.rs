use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// Result of one battle from the point of view of `monster`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleOutcome {
    /// txHash-logIndex
    pub id: String,
    pub monster: String,
    pub win: bool,
    pub opponent: Address,
    pub transferred_value: U256,
    pub block_number: u64,
    pub timestamp: u64,
}
