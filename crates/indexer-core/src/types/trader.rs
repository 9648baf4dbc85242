use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use super::address_id;

/// Per-wallet activity counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trader {
    pub id: String,
    pub address: Address,
    pub number_of_trades: u64,
    pub points: U256,
}

impl Trader {
    pub fn new(address: Address) -> Self {
        Self {
            id: Self::make_id(&address),
            address,
            number_of_trades: 0,
            points: U256::ZERO,
        }
    }

    pub fn make_id(address: &Address) -> String {
        address_id(address)
    }

    /// Counts one more trade and credits its points
    pub fn with_trade(self, points: U256) -> Self {
        Self {
            number_of_trades: self.number_of_trades + 1,
            points: self.points.saturating_add(points),
            ..self
        }
    }

    pub fn with_points(self, points: U256) -> Self {
        Self {
            points: self.points.saturating_add(points),
            ..self
        }
    }
}
