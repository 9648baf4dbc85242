use alloy_primitives::{B256, I256, U256};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// Id shared by the per-event snapshots: txHash-logIndex
pub fn snapshot_id(tx_hash: &B256, log_index: u64) -> String {
    format!("{:?}-{}", tx_hash, log_index)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketCapSnapshot {
    pub id: String,
    pub monster: String,
    pub price: BigDecimal,
    pub supply: I256,
    pub market_cap: BigDecimal,
    pub block_number: u64,
    pub timestamp: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalVolumeTradedSnapshot {
    pub id: String,
    pub monster: String,
    pub total_volume_traded: U256,
    pub block_number: u64,
    pub timestamp: u64,
}
