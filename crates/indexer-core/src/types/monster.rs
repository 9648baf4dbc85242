use alloy_primitives::{Address, I256, U256};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use super::address_id;

/// Aggregate market and battle state of one creature token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    /// Token contract address as a string
    pub id: String,
    pub address: Address,
    pub name: String,
    pub symbol: String,
    /// Bought minus sold token units
    pub supply: I256,
    /// Price of the last trade (wei per token unit)
    pub price: BigDecimal,
    /// price * supply
    pub market_cap: BigDecimal,
    pub total_volume_traded: U256,
    pub deposits_total: U256,
    pub withdrawals_total: U256,
    pub experience_points: BigDecimal,
    pub total_wins_count: u64,
    pub total_losses_count: u64,
    /// wins / (wins + losses), zero before the first battle
    pub win_lose_ratio: BigDecimal,
    pub is_in_battle: bool,
    pub active_opponent: Option<Address>,
    pub contract_owner: Option<Address>,
    pub paused: bool,
}

/// Name and symbol set by the factory after deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonsterMetadata {
    pub name: String,
    pub symbol: String,
}

/// Fields a trade rewrites
#[derive(Debug, Clone, PartialEq)]
pub struct MarketPatch {
    pub supply: I256,
    pub price: BigDecimal,
    pub market_cap: BigDecimal,
    pub total_volume_traded: U256,
    pub deposits_total: U256,
    pub withdrawals_total: U256,
    pub experience_points: BigDecimal,
}

/// Fields a finished battle rewrites
#[derive(Debug, Clone, PartialEq)]
pub struct BattleRecordPatch {
    pub total_wins_count: u64,
    pub total_losses_count: u64,
    pub win_lose_ratio: BigDecimal,
}

impl Monster {
    /// Zero-valued monster for a freshly deployed token
    pub fn new(address: Address) -> Self {
        Self {
            id: Self::make_id(&address),
            address,
            name: String::new(),
            symbol: String::new(),
            supply: I256::ZERO,
            price: BigDecimal::from(0),
            market_cap: BigDecimal::from(0),
            total_volume_traded: U256::ZERO,
            deposits_total: U256::ZERO,
            withdrawals_total: U256::ZERO,
            experience_points: BigDecimal::from(0),
            total_wins_count: 0,
            total_losses_count: 0,
            win_lose_ratio: BigDecimal::from(0),
            is_in_battle: false,
            active_opponent: None,
            contract_owner: None,
            paused: false,
        }
    }

    pub fn make_id(address: &Address) -> String {
        address_id(address)
    }

    pub fn with_metadata(self, metadata: MonsterMetadata) -> Self {
        Self {
            name: metadata.name,
            symbol: metadata.symbol,
            ..self
        }
    }

    pub fn with_market(self, patch: MarketPatch) -> Self {
        Self {
            supply: patch.supply,
            price: patch.price,
            market_cap: patch.market_cap,
            total_volume_traded: patch.total_volume_traded,
            deposits_total: patch.deposits_total,
            withdrawals_total: patch.withdrawals_total,
            experience_points: patch.experience_points,
            ..self
        }
    }

    pub fn with_battle_started(self, opponent: Address) -> Self {
        Self {
            is_in_battle: true,
            active_opponent: Some(opponent),
            ..self
        }
    }

    /// Records the result and returns the monster to idle
    pub fn with_battle_result(self, patch: BattleRecordPatch) -> Self {
        Self {
            total_wins_count: patch.total_wins_count,
            total_losses_count: patch.total_losses_count,
            win_lose_ratio: patch.win_lose_ratio,
            is_in_battle: false,
            active_opponent: None,
            ..self
        }
    }

    pub fn with_owner(self, owner: Address) -> Self {
        Self {
            contract_owner: Some(owner),
            ..self
        }
    }

    pub fn with_paused(self, paused: bool) -> Self {
        Self { paused, ..self }
    }
}
