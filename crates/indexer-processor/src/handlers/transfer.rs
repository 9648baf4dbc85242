use alloy_primitives::{Address, I256, U256};
use indexer_core::constants::ZERO_ADDRESS;
use indexer_core::numeric::{to_signed, to_signed_neg};
use indexer_core::types::{EventMeta, Monster, Trade, TradeType, Trader, TransferParams};
use indexer_core::Result;
use indexer_store::EntityStore;
use std::time::Instant;
use tracing::debug;

use crate::helpers::holdings::{apply_transfer, Valuation};
use crate::helpers::monster::require_monster;

fn transfer_leg(
    monster: &Monster,
    trader: Address,
    trade_type: TradeType,
    params: &TransferParams,
    meta: &EventMeta,
) -> Trade {
    Trade {
        id: Trade::make_id(&meta.tx_hash, meta.log_index, &trader),
        monster: monster.id.clone(),
        trader,
        trade_type,
        amount: params.value,
        eth_amount: U256::ZERO,
        tx_hash: meta.tx_hash,
        block_number: meta.block_number,
        block_timestamp: meta.block_timestamp,
        log_index_transfer: meta.log_index,
        log_index_trade: None,
    }
}

/// Mints and burns are the token side of a bonding-curve trade; the Trade
/// event prices them. Only wallet-to-wallet moves are valued here.
fn valuation(monster: &Monster, params: &TransferParams) -> Valuation {
    if params.from == ZERO_ADDRESS || params.to == ZERO_ADDRESS {
        Valuation::Deferred
    } else {
        Valuation::AtPrice(monster.price.clone())
    }
}

pub fn handle<S: EntityStore>(store: &mut S, meta: &EventMeta, params: &TransferParams) -> Result<()> {
    let start = Instant::now();
    let monster = require_monster(store, &meta.src_address, "Transfer")?;

    if store.get::<Trader>(&Trader::make_id(&params.to))?.is_none() {
        store.set(Trader::new(params.to))?;
    }

    let valuation = valuation(&monster, params);

    if params.from == params.to {
        store.set(transfer_leg(&monster, params.to, TradeType::TransferIn, params, meta))?;
        apply_transfer(store, &monster, params.to, I256::ZERO, &valuation, meta)?;
        debug!(
            monster = %monster.id,
            trader = ?params.to,
            value = %params.value,
            "Self transfer, balance unchanged"
        );
        return Ok(());
    }

    store.set(transfer_leg(&monster, params.from, TradeType::TransferOut, params, meta))?;
    store.set(transfer_leg(&monster, params.to, TradeType::TransferIn, params, meta))?;

    apply_transfer(store, &monster, params.from, to_signed_neg(params.value)?, &valuation, meta)?;
    apply_transfer(store, &monster, params.to, to_signed(params.value)?, &valuation, meta)?;

    debug!(
        monster = %monster.id,
        from = ?params.from,
        to = ?params.to,
        value = %params.value,
        total_us = start.elapsed().as_micros(),
        "Transfer handler timing"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::B256;
    use bigdecimal::BigDecimal;
    use indexer_core::types::CurrentHoldings;
    use indexer_core::IndexerError;
    use indexer_store::{EntityKind, IndexerStore};

    const TOKEN: Address = Address::new([0x11; 20]);

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

    fn transfer(from: Address, to: Address, value: u64) -> TransferParams {
        TransferParams {
            from,
            to,
            value: U256::from(value),
        }
    }

    fn store_with_monster(price: i64) -> IndexerStore {
        let store = IndexerStore::new();
        let mut monster = Monster::new(TOKEN);
        monster.price = BigDecimal::from(price);
        let mut tx = store.begin();
        tx.set(monster).unwrap();
        tx.commit();
        store
    }

    fn holding(store: &IndexerStore, trader: Address) -> Option<CurrentHoldings> {
        store.get::<CurrentHoldings>(&CurrentHoldings::make_id(&Monster::make_id(&TOKEN), &trader))
    }

    #[test]
    fn test_mint_writes_legs_and_balances() {
        let store = store_with_monster(0);
        let alice = Address::repeat_byte(0x01);

        let mut tx = store.begin();
        handle(&mut tx, &meta(3), &transfer(ZERO_ADDRESS, alice, 5)).unwrap();
        tx.commit();

        let out = store
            .get::<Trade>(&Trade::make_id(&meta(3).tx_hash, 3, &ZERO_ADDRESS))
            .unwrap();
        let inn = store
            .get::<Trade>(&Trade::make_id(&meta(3).tx_hash, 3, &alice))
            .unwrap();
        assert_eq!(out.trade_type, TradeType::TransferOut);
        assert_eq!(inn.trade_type, TradeType::TransferIn);
        assert_eq!(inn.eth_amount, U256::ZERO);
        assert_eq!(inn.log_index_trade, None);

        assert_eq!(holding(&store, alice).unwrap().balance, I256::try_from(5i64).unwrap());
        assert_eq!(holding(&store, ZERO_ADDRESS).unwrap().balance, I256::try_from(-5i64).unwrap());
        assert!(store.get::<Trader>(&Trader::make_id(&alice)).is_some());
        assert_eq!(store.count(EntityKind::HoldingsSnapshot), 2);
        assert_eq!(holding(&store, alice).unwrap().total_holdings_cost, BigDecimal::from(0));
    }

    #[test]
    fn test_wallet_transfer_values_at_monster_price() {
        let store = store_with_monster(4);
        let alice = Address::repeat_byte(0x01);
        let bob = Address::repeat_byte(0x02);

        let mut tx = store.begin();
        handle(&mut tx, &meta(1), &transfer(ZERO_ADDRESS, alice, 5)).unwrap();
        handle(&mut tx, &meta(2), &transfer(alice, bob, 2)).unwrap();
        tx.commit();

        let alice_row = holding(&store, alice).unwrap();
        let bob_row = holding(&store, bob).unwrap();
        assert_eq!(alice_row.balance, I256::try_from(3i64).unwrap());
        assert_eq!(alice_row.total_holdings_sales, BigDecimal::from(8));
        assert_eq!(bob_row.total_holdings_cost, BigDecimal::from(8));
    }

    #[test]
    fn test_missing_monster_aborts() {
        let store = IndexerStore::new();
        let mut tx = store.begin();
        let err = handle(
            &mut tx,
            &meta(0),
            &transfer(ZERO_ADDRESS, Address::repeat_byte(0x01), 1),
        )
        .unwrap_err();
        assert!(matches!(err, IndexerError::MonsterNotFound(a) if a == TOKEN));
        assert_eq!(tx.pending(), 0);
    }

    #[test]
    fn test_self_transfer_keeps_balance_and_snapshots() {
        let store = store_with_monster(4);
        let alice = Address::repeat_byte(0x01);

        let mut tx = store.begin();
        handle(&mut tx, &meta(1), &transfer(ZERO_ADDRESS, alice, 5)).unwrap();
        tx.commit();
        let snapshots_before = store.count(EntityKind::HoldingsSnapshot);

        let mut tx = store.begin();
        handle(&mut tx, &meta(2), &transfer(alice, alice, 2)).unwrap();
        tx.commit();

        let row = holding(&store, alice).unwrap();
        assert_eq!(row.balance, I256::try_from(5i64).unwrap());
        assert_eq!(row.total_holdings_cost, BigDecimal::from(0));
        assert_eq!(row.total_holdings_sales, BigDecimal::from(0));
        assert_eq!(store.count(EntityKind::HoldingsSnapshot), snapshots_before + 1);

        let leg = store
            .get::<Trade>(&Trade::make_id(&meta(2).tx_hash, 2, &alice))
            .unwrap();
        assert_eq!(leg.trade_type, TradeType::TransferIn);
    }

    #[test]
    fn test_self_transfer_opens_missing_position() {
        let store = store_with_monster(4);
        let bob = Address::repeat_byte(0x02);

        let mut tx = store.begin();
        handle(&mut tx, &meta(1), &transfer(bob, bob, 3)).unwrap();
        tx.commit();

        assert_eq!(holding(&store, bob).unwrap().balance, I256::ZERO);
        assert_eq!(store.count(EntityKind::HoldingsSnapshot), 1);
        assert_eq!(store.count(EntityKind::Trade), 1);
    }
}
