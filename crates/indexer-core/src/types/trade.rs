use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

use super::address_id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeType {
    Buy,
    Sell,
    TransferIn,
    TransferOut,
}

impl TradeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeType::Buy => "BUY",
            TradeType::Sell => "SELL",
            TradeType::TransferIn => "TRANSFER_IN",
            TradeType::TransferOut => "TRANSFER_OUT",
        }
    }

    pub fn from_side(is_buy: bool) -> Self {
        if is_buy {
            TradeType::Buy
        } else {
            TradeType::Sell
        }
    }
}

/// One leg of a token movement. Written by the Transfer reducer and
/// enriched in place when the paired Trade event arrives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    /// txHash-logIndexTransfer-trader
    pub id: String,
    pub monster: String,
    pub trader: Address,
    pub trade_type: TradeType,
    pub amount: U256,
    pub eth_amount: U256,
    pub tx_hash: B256,
    pub block_number: u64,
    pub block_timestamp: u64,
    pub log_index_transfer: u64,
    /// None until a Trade event has been correlated
    pub log_index_trade: Option<u64>,
}

/// Fields the Trade event fills in on a transfer leg
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradeResolution {
    pub trade_type: TradeType,
    pub eth_amount: U256,
    pub log_index_trade: u64,
}

impl Trade {
    pub fn make_id(tx_hash: &B256, log_index: u64, trader: &Address) -> String {
        format!("{:?}-{}-{}", tx_hash, log_index, address_id(trader))
    }

    pub fn is_resolved(&self) -> bool {
        self.log_index_trade.is_some()
    }

    pub fn resolve(self, resolution: TradeResolution) -> Self {
        Self {
            trade_type: resolution.trade_type,
            eth_amount: resolution.eth_amount,
            log_index_trade: Some(resolution.log_index_trade),
            ..self
        }
    }
}
