use alloy_primitives::{Address, I256};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use super::address_id;

/// Position of one trader in one monster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentHoldings {
    /// monsterId-traderId
    pub id: String,
    pub monster: String,
    pub trader: Address,
    /// Negative only for the mint/burn address
    pub balance: I256,
    pub last_trade_price: BigDecimal,
    pub last_trade_market_cap: BigDecimal,
    /// Value added while the balance grew
    pub total_holdings_cost: BigDecimal,
    /// Value realised while the balance shrank
    pub total_holdings_sales: BigDecimal,
}

impl CurrentHoldings {
    pub fn new(monster: &str, trader: Address) -> Self {
        Self {
            id: Self::make_id(monster, &trader),
            monster: monster.to_string(),
            trader,
            balance: I256::ZERO,
            last_trade_price: BigDecimal::from(0),
            last_trade_market_cap: BigDecimal::from(0),
            total_holdings_cost: BigDecimal::from(0),
            total_holdings_sales: BigDecimal::from(0),
        }
    }

    pub fn make_id(monster: &str, trader: &Address) -> String {
        format!("{}-{}", monster, address_id(trader))
    }
}

/// Balance of a holder right after one transfer leg
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingsSnapshot {
    /// txHash-logIndex-trader
    pub id: String,
    pub monster: String,
    pub trader: Address,
    pub balance: I256,
    pub price: BigDecimal,
    pub market_cap: BigDecimal,
    pub block_number: u64,
    pub timestamp: u64,
}
