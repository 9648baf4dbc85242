use indexer_core::types::{
    snapshot_id, BattleEndedParams, BattleOutcome, BattleStartedParams, CurrentHoldings,
    EventMeta, Monster, Trader,
};
use indexer_core::{IndexerError, Result};
use indexer_store::{EntityStore, Field};
use std::time::Instant;
use tracing::{debug, error, info};

use crate::helpers::monster::{derive_battle_record, require_monster};
use crate::helpers::trader::win_points;

pub fn started<S: EntityStore>(
    store: &mut S,
    meta: &EventMeta,
    params: &BattleStartedParams,
) -> Result<()> {
    let monster = require_monster(store, &meta.src_address, "BattleStarted")?
        .with_battle_started(params.opponent);

    info!(
        monster = %monster.id,
        opponent = ?params.opponent,
        block = meta.block_number,
        "Battle started"
    );
    store.set(monster)
}

/// Credit every holder of the winning monster. Returns the number of
/// traders credited.
fn credit_holders<S: EntityStore>(store: &mut S, monster: &Monster) -> Result<usize> {
    let holders: Vec<CurrentHoldings> = store.query_where(Field::Monster, &monster.id)?;

    let mut credited = 0;
    for holding in holders {
        let points = win_points(holding.balance);
        if points.is_zero() {
            continue;
        }

        let Some(trader) = store.get::<Trader>(&Trader::make_id(&holding.trader))? else {
            error!(
                monster = %monster.id,
                trader = ?holding.trader,
                "Holder has no trader row, cannot credit battle win"
            );
            return Err(IndexerError::TraderNotFound(holding.trader));
        };

        store.set(trader.with_points(points))?;
        credited += 1;
    }
    Ok(credited)
}

/// Each side's contract emits its own BattleEnded; the emitter's result is
/// recorded on the emitter's Monster.
pub fn ended<S: EntityStore>(
    store: &mut S,
    meta: &EventMeta,
    params: &BattleEndedParams,
) -> Result<()> {
    let start = Instant::now();
    let monster = require_monster(store, &meta.src_address, "BattleEnded")?;

    let won = meta.src_address == params.winner;
    let opponent = if won { params.loser } else { params.winner };

    let credited = if won {
        credit_holders(store, &monster)?
    } else {
        0
    };

    let record = derive_battle_record(&monster, won);
    let monster = monster.with_battle_result(record);

    store.set(BattleOutcome {
        id: snapshot_id(&meta.tx_hash, meta.log_index),
        monster: monster.id.clone(),
        win: won,
        opponent,
        transferred_value: params.transferred_value,
        block_number: meta.block_number,
        timestamp: meta.block_timestamp,
    })?;

    info!(
        monster = %monster.id,
        win = won,
        opponent = ?opponent,
        wins = monster.total_wins_count,
        losses = monster.total_losses_count,
        "Battle ended"
    );
    debug!(
        monster = %monster.id,
        holders_credited = credited,
        total_us = start.elapsed().as_micros(),
        "BattleEnded handler timing"
    );

    store.set(monster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, B256, I256, U256};
    use bigdecimal::BigDecimal;
    use indexer_store::{EntityKind, IndexerStore};

    const RED: Address = Address::new([0x11; 20]);
    const BLUE: Address = Address::new([0x22; 20]);
    const ALICE: Address = Address::new([0x01; 20]);

    fn meta(src: Address, log_index: u64) -> EventMeta {
        EventMeta {
            chain_id: 1,
            block_number: 10,
            block_timestamp: 1_700_000_000,
            tx_hash: B256::repeat_byte(0xbb),
            src_address: src,
            log_index,
        }
    }

    fn holding(trader: Address, balance: i64) -> CurrentHoldings {
        let mut row = CurrentHoldings::new(&Monster::make_id(&RED), trader);
        row.balance = I256::try_from(balance).unwrap();
        row
    }

    fn setup() -> IndexerStore {
        let store = IndexerStore::new();
        let mut tx = store.begin();
        tx.set(Monster::new(RED)).unwrap();
        tx.set(Monster::new(BLUE)).unwrap();
        tx.commit();
        store
    }

    fn ended_params() -> BattleEndedParams {
        BattleEndedParams {
            winner: RED,
            loser: BLUE,
            transferred_value: U256::from(77u64),
        }
    }

    #[test]
    fn test_lifecycle_and_ratio() {
        let store = setup();
        let mut tx = store.begin();
        started(&mut tx, &meta(RED, 0), &BattleStartedParams { opponent: BLUE }).unwrap();
        assert!(tx.get::<Monster>(&Monster::make_id(&RED)).unwrap().unwrap().is_in_battle);

        ended(&mut tx, &meta(RED, 1), &ended_params()).unwrap();
        ended(&mut tx, &meta(BLUE, 2), &ended_params()).unwrap();
        tx.commit();

        let red = store.get::<Monster>(&Monster::make_id(&RED)).unwrap();
        let blue = store.get::<Monster>(&Monster::make_id(&BLUE)).unwrap();
        assert!(!red.is_in_battle);
        assert_eq!(red.active_opponent, None);
        assert_eq!(red.win_lose_ratio, BigDecimal::from(1));
        assert_eq!(blue.total_losses_count, 1);
        assert_eq!(blue.win_lose_ratio, BigDecimal::from(0));
        assert_eq!(store.count(EntityKind::BattleOutcome), 2);
    }

    #[test]
    fn test_winner_holders_get_points() {
        let store = setup();
        let bob = Address::repeat_byte(0x02);
        let mut tx = store.begin();
        tx.set(Trader::new(ALICE)).unwrap();
        tx.set(holding(ALICE, 250)).unwrap();
        tx.set(holding(bob, 50)).unwrap();
        tx.set(holding(Address::ZERO, -300)).unwrap();
        tx.commit();

        let mut tx = store.begin();
        ended(&mut tx, &meta(RED, 1), &ended_params()).unwrap();
        tx.commit();

        let alice = store.get::<Trader>(&Trader::make_id(&ALICE)).unwrap();
        assert_eq!(alice.points, U256::from(2u64));
    }

    #[test]
    fn test_missing_trader_rolls_back() {
        let store = setup();
        let mut tx = store.begin();
        tx.set(holding(ALICE, 1000)).unwrap();
        tx.commit();

        let mut tx = store.begin();
        let err = ended(&mut tx, &meta(RED, 1), &ended_params()).unwrap_err();
        assert!(matches!(err, IndexerError::TraderNotFound(a) if a == ALICE));
        tx.rollback();

        let red = store.get::<Monster>(&Monster::make_id(&RED)).unwrap();
        assert_eq!(red.total_wins_count, 0);
        assert_eq!(store.count(EntityKind::BattleOutcome), 0);
    }
}
