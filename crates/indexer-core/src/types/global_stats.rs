use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::constants::GLOBAL_STATS_ID;

/// Protocol-wide totals (singleton)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalStats {
    pub id: String,
    pub protocol_fees: U256,
}

impl GlobalStats {
    pub fn new() -> Self {
        Self {
            id: GLOBAL_STATS_ID.to_string(),
            protocol_fees: U256::ZERO,
        }
    }

    pub fn with_fee(self, fee: U256) -> Self {
        Self {
            protocol_fees: self.protocol_fees.saturating_add(fee),
            ..self
        }
    }
}

impl Default for GlobalStats {
    fn default() -> Self {
        Self::new()
    }
}
