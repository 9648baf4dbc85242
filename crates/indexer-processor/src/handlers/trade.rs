use indexer_core::numeric::{to_signed, to_signed_neg};
use indexer_core::types::{
    snapshot_id, EventMeta, MarketCapSnapshot, TotalVolumeTradedSnapshot, TradeParams,
    TradeResolution, TradeType,
};
use indexer_core::Result;
use indexer_store::EntityStore;
use std::time::Instant;
use tracing::{debug, warn};

use crate::helpers::correlation::resolve_placeholder;
use crate::helpers::global_stats::add_protocol_fee;
use crate::helpers::holdings::apply_trade;
use crate::helpers::monster::{derive_market_patch, require_monster};
use crate::helpers::trader::{load_or_new, trade_points};

pub fn handle<S: EntityStore>(store: &mut S, meta: &EventMeta, params: &TradeParams) -> Result<()> {
    let start = Instant::now();

    // Validate before the first write
    let monster = require_monster(store, &meta.src_address, "Trade")?;
    let patch = derive_market_patch(&monster, params, meta)?;
    let price = patch.price.clone();

    add_protocol_fee(store, params.protocol_fee)?;

    let monster = monster.with_market(patch);
    store.set(monster.clone())?;

    match resolve_placeholder(store, meta, &params.trader)? {
        Some(row) => {
            let row = row.resolve(TradeResolution {
                trade_type: TradeType::from_side(params.is_buy),
                eth_amount: params.eth_amount,
                log_index_trade: meta.log_index,
            });
            store.set(row)?;
        }
        None => {
            warn!(
                monster = %monster.id,
                trader = ?params.trader,
                tx_hash = ?meta.tx_hash,
                log_index = meta.log_index,
                "No transfer leg found for trade, leaving it uncorrelated"
            );
        }
    }

    let trader = load_or_new(store, params.trader)?.with_trade(trade_points(params.eth_amount));
    store.set(trader)?;

    let id = snapshot_id(&meta.tx_hash, meta.log_index);
    store.set(MarketCapSnapshot {
        id: id.clone(),
        monster: monster.id.clone(),
        price: monster.price.clone(),
        supply: monster.supply,
        market_cap: monster.market_cap.clone(),
        block_number: meta.block_number,
        timestamp: meta.block_timestamp,
    })?;
    store.set(TotalVolumeTradedSnapshot {
        id,
        monster: monster.id.clone(),
        total_volume_traded: monster.total_volume_traded,
        block_number: meta.block_number,
        timestamp: meta.block_timestamp,
    })?;

    let delta = if params.is_buy {
        to_signed(params.amount)?
    } else {
        to_signed_neg(params.amount)?
    };
    apply_trade(store, &monster, params.trader, delta, &price, meta)?;

    debug!(
        monster = %monster.id,
        trader = ?params.trader,
        is_buy = params.is_buy,
        amount = %params.amount,
        eth_amount = %params.eth_amount,
        price = %price,
        supply = %monster.supply,
        total_us = start.elapsed().as_micros(),
        "Trade handler timing"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, B256, I256, U256};
    use bigdecimal::BigDecimal;
    use indexer_core::constants::GLOBAL_STATS_ID;
    use indexer_core::types::{GlobalStats, Monster, Trade, Trader};
    use indexer_core::IndexerError;
    use indexer_store::{EntityKind, IndexerStore};

    const TOKEN: Address = Address::new([0x11; 20]);
    const ALICE: Address = Address::new([0x01; 20]);

    fn meta(log_index: u64) -> EventMeta {
        EventMeta {
            chain_id: 1,
            block_number: 10,
            block_timestamp: 1_700_000_000,
            tx_hash: B256::repeat_byte(0xaa),
            src_address: TOKEN,
            log_index,
        }
    }

    fn trade(is_buy: bool, amount: u64, eth_amount: u64, fee: u64) -> TradeParams {
        TradeParams {
            trader: ALICE,
            is_buy,
            amount: U256::from(amount),
            eth_amount: U256::from(eth_amount),
            protocol_fee: U256::from(fee),
        }
    }

    fn store_with_monster() -> IndexerStore {
        let store = IndexerStore::new();
        let mut tx = store.begin();
        tx.set(Monster::new(TOKEN)).unwrap();
        tx.commit();
        store
    }

    #[test]
    fn test_buy_updates_aggregates() {
        let store = store_with_monster();
        let mut tx = store.begin();
        handle(&mut tx, &meta(1), &trade(true, 4, 100, 3)).unwrap();
        tx.commit();

        let monster = store.get::<Monster>(&Monster::make_id(&TOKEN)).unwrap();
        assert_eq!(monster.supply, I256::try_from(4i64).unwrap());
        assert_eq!(monster.price, BigDecimal::from(25));
        assert_eq!(monster.market_cap, BigDecimal::from(100));
        assert_eq!(monster.deposits_total, U256::from(100u64));

        let trader = store.get::<Trader>(&Trader::make_id(&ALICE)).unwrap();
        assert_eq!(trader.number_of_trades, 1);
        assert_eq!(trader.points, U256::from(5000u64));

        let stats = store.get::<GlobalStats>(GLOBAL_STATS_ID).unwrap();
        assert_eq!(stats.protocol_fees, U256::from(3u64));

        assert_eq!(store.count(EntityKind::MarketCapSnapshot), 1);
        assert_eq!(store.count(EntityKind::TotalVolumeTradedSnapshot), 1);
    }

    #[test]
    fn test_uncorrelated_trade_still_applies() {
        let store = store_with_monster();
        let mut tx = store.begin();
        handle(&mut tx, &meta(7), &trade(false, 1, 10, 0)).unwrap();
        tx.commit();

        assert_eq!(store.count(EntityKind::Trade), 0);
        let monster = store.get::<Monster>(&Monster::make_id(&TOKEN)).unwrap();
        assert_eq!(monster.withdrawals_total, U256::from(10u64));
    }

    #[test]
    fn test_missing_monster_writes_nothing() {
        let store = IndexerStore::new();
        let mut tx = store.begin();
        let err = handle(&mut tx, &meta(1), &trade(true, 1, 1, 5)).unwrap_err();
        assert!(matches!(err, IndexerError::MonsterNotFound(_)));
        assert_eq!(tx.pending(), 0);
    }

    #[test]
    fn test_zero_amount_writes_nothing() {
        let store = store_with_monster();
        let mut tx = store.begin();
        let err = handle(&mut tx, &meta(1), &trade(true, 0, 1, 5)).unwrap_err();
        assert!(matches!(err, IndexerError::ZeroTradeAmount { .. }));
        assert_eq!(tx.pending(), 0);
    }

    #[test]
    fn test_resolves_preceding_leg() {
        let store = store_with_monster();
        let m = meta(2);
        let mut tx = store.begin();
        tx.set(Trade {
            id: Trade::make_id(&m.tx_hash, 2, &ALICE),
            monster: Monster::make_id(&TOKEN),
            trader: ALICE,
            trade_type: TradeType::TransferIn,
            amount: U256::from(1u64),
            eth_amount: U256::ZERO,
            tx_hash: m.tx_hash,
            block_number: m.block_number,
            block_timestamp: m.block_timestamp,
            log_index_transfer: 2,
            log_index_trade: None,
        })
        .unwrap();
        handle(&mut tx, &meta(3), &trade(true, 1, 9, 0)).unwrap();
        tx.commit();

        let row = store
            .get::<Trade>(&Trade::make_id(&m.tx_hash, 2, &ALICE))
            .unwrap();
        assert_eq!(row.trade_type, TradeType::Buy);
        assert_eq!(row.eth_amount, U256::from(9u64));
        assert_eq!(row.log_index_trade, Some(3));
    }
}
