use alloy_primitives::{Address, I256, U256};
use bigdecimal::{BigDecimal, Zero};
use indexer_core::constants::MONSTER_XP_MULTIPLIER;
use indexer_core::numeric::{i256_to_decimal, to_signed, u256_to_decimal};
use indexer_core::types::{BattleRecordPatch, EventMeta, MarketPatch, Monster, TradeParams};
use indexer_core::{IndexerError, Result};
use indexer_store::EntityStore;
use tracing::{error, warn};

/// Load the monster behind a token address or fail with a logged error
pub fn require_monster<S: EntityStore>(store: &S, address: &Address, event: &str) -> Result<Monster> {
    match store.get::<Monster>(&Monster::make_id(address))? {
        Some(monster) => Ok(monster),
        None => {
            error!(
                monster = ?address,
                event = event,
                "Monster not found, token must be created before its events"
            );
            Err(IndexerError::MonsterNotFound(*address))
        }
    }
}

/// Load the monster or start a zeroed one, warning when it was missing
pub fn load_or_create<S: EntityStore>(store: &S, address: &Address, event: &str) -> Result<Monster> {
    match store.get::<Monster>(&Monster::make_id(address))? {
        Some(monster) => Ok(monster),
        None => {
            warn!(
                monster = ?address,
                event = event,
                "Monster missing, creating it ahead of its factory event"
            );
            Ok(Monster::new(*address))
        }
    }
}

/// Wei per token unit paid in one trade
pub fn trade_price(amount: U256, eth_amount: U256, meta: &EventMeta) -> Result<BigDecimal> {
    if amount.is_zero() {
        error!(
            tx_hash = ?meta.tx_hash,
            log_index = meta.log_index,
            "Trade with zero token amount has no price"
        );
        return Err(IndexerError::ZeroTradeAmount {
            tx_hash: meta.tx_hash,
            log_index: meta.log_index,
        });
    }
    Ok(u256_to_decimal(eth_amount) / u256_to_decimal(amount))
}

pub fn market_cap(price: &BigDecimal, supply: I256) -> BigDecimal {
    price * i256_to_decimal(supply)
}

/// Linear experience: buys add `eth_amount * MONSTER_XP_MULTIPLIER`, sells
/// subtract it. The total is floored at zero.
pub fn experience_after_trade(
    monster: &Monster,
    eth_amount: U256,
    is_buy: bool,
) -> BigDecimal {
    let delta = u256_to_decimal(eth_amount) * BigDecimal::from(MONSTER_XP_MULTIPLIER);
    let next = if is_buy {
        &monster.experience_points + delta
    } else {
        &monster.experience_points - delta
    };

    if next < BigDecimal::zero() {
        warn!(
            monster = %monster.id,
            experience_points = %next,
            "Net flow negative, clamping experience points to zero"
        );
        return BigDecimal::zero();
    }
    next
}

/// Everything a trade changes on its monster
pub fn derive_market_patch(monster: &Monster, trade: &TradeParams, meta: &EventMeta) -> Result<MarketPatch> {
    let amount = to_signed(trade.amount)?;
    let supply = if trade.is_buy {
        monster.supply.checked_add(amount)
    } else {
        monster.supply.checked_sub(amount)
    }
    .ok_or_else(|| IndexerError::Overflow(format!("supply of {}", monster.id)))?;

    let (deposits_total, withdrawals_total) = if trade.is_buy {
        (
            monster.deposits_total.saturating_add(trade.eth_amount),
            monster.withdrawals_total,
        )
    } else {
        (
            monster.deposits_total,
            monster.withdrawals_total.saturating_add(trade.eth_amount),
        )
    };

    if supply < I256::ZERO {
        warn!(
            monster = %monster.id,
            supply = %supply,
            tx_hash = ?meta.tx_hash,
            "Supply went negative"
        );
    }

    let price = trade_price(trade.amount, trade.eth_amount, meta)?;
    let market_cap = market_cap(&price, supply);

    Ok(MarketPatch {
        supply,
        market_cap,
        price,
        total_volume_traded: monster.total_volume_traded.saturating_add(trade.eth_amount),
        deposits_total,
        withdrawals_total,
        experience_points: experience_after_trade(monster, trade.eth_amount, trade.is_buy),
    })
}

/// wins / (wins + losses); None before the first battle
pub fn win_lose_ratio(wins: u64, losses: u64) -> Option<BigDecimal> {
    let total = wins.checked_add(losses)?;
    if total == 0 {
        return None;
    }
    Some(BigDecimal::from(wins) / BigDecimal::from(total))
}

/// Counters and ratio after one more battle
pub fn derive_battle_record(monster: &Monster, won: bool) -> BattleRecordPatch {
    let (wins, losses) = if won {
        (monster.total_wins_count + 1, monster.total_losses_count)
    } else {
        (monster.total_wins_count, monster.total_losses_count + 1)
    };

    BattleRecordPatch {
        total_wins_count: wins,
        total_losses_count: losses,
        win_lose_ratio: win_lose_ratio(wins, losses).unwrap_or_else(BigDecimal::zero),
    }
}
