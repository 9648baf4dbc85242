use alloy_primitives::Address;
use indexer_core::constants::{TRANSFER_LOG_OFFSET, WHITELIST_TRANSFER_LOG_OFFSET};
use indexer_core::types::{EventMeta, Trade};
use indexer_core::Result;
use indexer_store::EntityStore;
use tracing::trace;

/// Log-index distances tried, in order, between a Trade and its Transfer
const OFFSETS: [u64; 2] = [TRANSFER_LOG_OFFSET, WHITELIST_TRANSFER_LOG_OFFSET];

/// Find the transfer-leg row a Trade event at `meta.log_index` belongs to.
///
/// The plain path has the Transfer directly before the Trade; the whitelist
/// path has a WhitelistPurchase in between. A row already claimed by a
/// different Trade is never reused.
pub fn resolve_placeholder<S: EntityStore>(
    store: &S,
    meta: &EventMeta,
    trader: &Address,
) -> Result<Option<Trade>> {
    for offset in OFFSETS {
        let Some(transfer_index) = meta.log_index.checked_sub(offset) else {
            continue;
        };

        let id = Trade::make_id(&meta.tx_hash, transfer_index, trader);
        match store.get::<Trade>(&id)? {
            Some(row) if row.log_index_trade.map_or(true, |li| li == meta.log_index) => {
                trace!(
                    trade_log_index = meta.log_index,
                    transfer_log_index = transfer_index,
                    "Trade correlated with transfer leg"
                );
                return Ok(Some(row));
            }
            Some(row) => {
                trace!(
                    id = %row.id,
                    claimed_by = ?row.log_index_trade,
                    "Transfer leg already claimed by another trade"
                );
            }
            None => {}
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{B256, U256};
    use indexer_core::types::{TradeResolution, TradeType};
    use indexer_store::IndexerStore;

    fn meta(log_index: u64) -> EventMeta {
        EventMeta {
            chain_id: 1,
            block_number: 10,
            block_timestamp: 1_700_000_000,
            tx_hash: B256::repeat_byte(0xaa),
            src_address: Address::repeat_byte(0x11),
            log_index,
        }
    }

    fn leg(log_index: u64, trader: Address) -> Trade {
        let m = meta(log_index);
        Trade {
            id: Trade::make_id(&m.tx_hash, log_index, &trader),
            monster: "0x11".to_string(),
            trader,
            trade_type: TradeType::TransferIn,
            amount: U256::from(1u64),
            eth_amount: U256::ZERO,
            tx_hash: m.tx_hash,
            block_number: m.block_number,
            block_timestamp: m.block_timestamp,
            log_index_transfer: log_index,
            log_index_trade: None,
        }
    }

    #[test]
    fn test_direct_predecessor() {
        let store = IndexerStore::new();
        let alice = Address::repeat_byte(0x01);
        let mut tx = store.begin();
        tx.set(leg(4, alice)).unwrap();

        let row = resolve_placeholder(&tx, &meta(5), &alice).unwrap().unwrap();
        assert_eq!(row.log_index_transfer, 4);
    }

    #[test]
    fn test_whitelist_offset() {
        let store = IndexerStore::new();
        let alice = Address::repeat_byte(0x01);
        let mut tx = store.begin();
        tx.set(leg(3, alice)).unwrap();

        let row = resolve_placeholder(&tx, &meta(5), &alice).unwrap().unwrap();
        assert_eq!(row.log_index_transfer, 3);
    }

    #[test]
    fn test_claimed_leg_is_skipped() {
        let store = IndexerStore::new();
        let alice = Address::repeat_byte(0x01);
        let mut tx = store.begin();
        let claimed = leg(4, alice).resolve(TradeResolution {
            trade_type: TradeType::Buy,
            eth_amount: U256::from(9u64),
            log_index_trade: 5,
        });
        tx.set(claimed).unwrap();

        assert!(resolve_placeholder(&tx, &meta(6), &alice).unwrap().is_none());
        assert!(resolve_placeholder(&tx, &meta(5), &alice).unwrap().is_some());
    }

    #[test]
    fn test_low_log_index_does_not_underflow() {
        let store = IndexerStore::new();
        let tx = store.begin();
        assert!(resolve_placeholder(&tx, &meta(0), &Address::repeat_byte(0x01))
            .unwrap()
            .is_none());
    }
}
