use alloy_primitives::{Address, I256, U256};
use indexer_core::constants::{TRADE_POINTS_MULTIPLIER, WIN_POINTS_DENOMINATOR, WIN_POINTS_NUMERATOR};
use indexer_core::numeric::abs_u256;
use indexer_core::types::Trader;
use indexer_core::Result;
use indexer_store::EntityStore;

/// Points earned by a trade of `eth_amount` wei
pub fn trade_points(eth_amount: U256) -> U256 {
    eth_amount.saturating_mul(U256::from(TRADE_POINTS_MULTIPLIER))
}

/// Points earned by holding `balance` of a winning monster, truncated.
/// Non-positive balances earn nothing.
pub fn win_points(balance: I256) -> U256 {
    if balance <= I256::ZERO {
        return U256::ZERO;
    }
    abs_u256(balance).saturating_mul(U256::from(WIN_POINTS_NUMERATOR))
        / U256::from(WIN_POINTS_DENOMINATOR)
}

/// Current trader row, or a fresh one that has not been written yet
pub fn load_or_new<S: EntityStore>(store: &S, address: Address) -> Result<Trader> {
    Ok(store
        .get::<Trader>(&Trader::make_id(&address))?
        .unwrap_or_else(|| Trader::new(address)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trade_points_scale_with_volume() {
        assert_eq!(trade_points(U256::from(2u64)), U256::from(100u64));
        assert_eq!(trade_points(U256::MAX), U256::MAX);
    }

    #[test]
    fn test_win_points_truncate_and_ignore_negative() {
        assert_eq!(win_points(I256::try_from(250i64).unwrap()), U256::from(2u64));
        assert_eq!(win_points(I256::try_from(99i64).unwrap()), U256::ZERO);
        assert_eq!(win_points(I256::try_from(-500i64).unwrap()), U256::ZERO);
    }
}
