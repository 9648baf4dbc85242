use alloy_primitives::{Address, I256};
use bigdecimal::BigDecimal;
use indexer_core::constants::ZERO_ADDRESS;
use indexer_core::numeric::{abs_u256, i256_to_decimal, u256_to_decimal};
use indexer_core::types::{
    address_id, snapshot_id, CurrentHoldings, EventMeta, HoldingsSnapshot, Monster,
};
use indexer_core::{IndexerError, Result};
use indexer_store::EntityStore;
use tracing::{debug, error};

/// How a transfer leg contributes to cost basis
#[derive(Debug, Clone, PartialEq)]
pub enum Valuation {
    /// Balance only; the paired Trade adds cost basis at its own price
    Deferred,
    /// Wallet-to-wallet movement valued at the given price
    AtPrice(BigDecimal),
}

/// Add `|delta| * price` to cost when the balance grows, to sales when it shrinks
fn accumulate_cost_basis(holding: CurrentHoldings, delta: I256, price: &BigDecimal) -> CurrentHoldings {
    let value = u256_to_decimal(abs_u256(delta)) * price;
    if delta > I256::ZERO {
        CurrentHoldings {
            total_holdings_cost: holding.total_holdings_cost + value,
            ..holding
        }
    } else if delta < I256::ZERO {
        CurrentHoldings {
            total_holdings_sales: holding.total_holdings_sales + value,
            ..holding
        }
    } else {
        holding
    }
}

/// Apply one transfer leg to a position and record a HoldingsSnapshot.
///
/// A negative first movement for anything but the mint/burn address means
/// the stream lost an earlier credit; nothing is written for that leg and
/// `None` is returned.
pub fn apply_transfer<S: EntityStore>(
    store: &mut S,
    monster: &Monster,
    trader: Address,
    delta: I256,
    valuation: &Valuation,
    meta: &EventMeta,
) -> Result<Option<CurrentHoldings>> {
    let id = CurrentHoldings::make_id(&monster.id, &trader);

    let holding = match store.get::<CurrentHoldings>(&id)? {
        Some(holding) => holding,
        None if delta < I256::ZERO && trader != ZERO_ADDRESS => {
            error!(
                monster = %monster.id,
                trader = ?trader,
                delta = %delta,
                tx_hash = ?meta.tx_hash,
                log_index = meta.log_index,
                "First movement for holder is a debit, skipping holdings update"
            );
            return Ok(None);
        }
        None => CurrentHoldings::new(&monster.id, trader),
    };

    let balance = holding
        .balance
        .checked_add(delta)
        .ok_or_else(|| IndexerError::Overflow(format!("balance of {}", id)))?;

    if balance < I256::ZERO && trader != ZERO_ADDRESS {
        error!(
            monster = %monster.id,
            trader = ?trader,
            balance = %balance,
            tx_hash = ?meta.tx_hash,
            "Holder balance went negative"
        );
    }

    let holding = CurrentHoldings { balance, ..holding };
    let holding = match valuation {
        Valuation::Deferred => holding,
        Valuation::AtPrice(price) => accumulate_cost_basis(holding, delta, price),
    };

    let snapshot = HoldingsSnapshot {
        id: format!("{}-{}", snapshot_id(&meta.tx_hash, meta.log_index), address_id(&trader)),
        monster: monster.id.clone(),
        trader,
        balance: holding.balance,
        price: monster.price.clone(),
        market_cap: i256_to_decimal(holding.balance) * &monster.price,
        block_number: meta.block_number,
        timestamp: meta.block_timestamp,
    };

    debug!(
        monster = %monster.id,
        trader = ?trader,
        delta = %delta,
        balance = %holding.balance,
        "Holdings updated from transfer"
    );

    store.set(holding.clone())?;
    store.set(snapshot)?;
    Ok(Some(holding))
}

/// Record the trade price on a position created by the preceding transfer.
/// Balance is left alone; the transfer already moved it.
pub fn apply_trade<S: EntityStore>(
    store: &mut S,
    monster: &Monster,
    trader: Address,
    delta: I256,
    price: &BigDecimal,
    meta: &EventMeta,
) -> Result<Option<CurrentHoldings>> {
    let id = CurrentHoldings::make_id(&monster.id, &trader);

    let Some(holding) = store.get::<CurrentHoldings>(&id)? else {
        error!(
            monster = %monster.id,
            trader = ?trader,
            tx_hash = ?meta.tx_hash,
            log_index = meta.log_index,
            "No holdings for trader, transfer leg missing before trade"
        );
        return Ok(None);
    };

    let holding = CurrentHoldings {
        last_trade_price: price.clone(),
        last_trade_market_cap: i256_to_decimal(holding.balance) * price,
        ..holding
    };
    let holding = accumulate_cost_basis(holding, delta, price);

    store.set(holding.clone())?;
    Ok(Some(holding))
}
