use indexer_core::types::{EventMeta, OwnershipTransferredParams, PauseParams};
use indexer_core::Result;
use indexer_store::EntityStore;
use tracing::info;

use crate::helpers::monster::load_or_create;

pub fn ownership_transferred<S: EntityStore>(
    store: &mut S,
    meta: &EventMeta,
    params: &OwnershipTransferredParams,
) -> Result<()> {
    let monster = load_or_create(store, &meta.src_address, "OwnershipTransferred")?
        .with_owner(params.new_owner);

    info!(
        monster = %monster.id,
        previous_owner = ?params.previous_owner,
        new_owner = ?params.new_owner,
        "Ownership transferred"
    );
    store.set(monster)
}

pub fn set_paused<S: EntityStore>(
    store: &mut S,
    meta: &EventMeta,
    params: &PauseParams,
    paused: bool,
) -> Result<()> {
    let event = if paused { "Paused" } else { "Unpaused" };
    let monster = load_or_create(store, &meta.src_address, event)?.with_paused(paused);

    info!(monster = %monster.id, account = ?params.account, paused = paused, "Pause state changed");
    store.set(monster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, B256};
    use indexer_core::types::Monster;
    use indexer_store::IndexerStore;

    fn meta() -> EventMeta {
        EventMeta {
            chain_id: 1,
            block_number: 3,
            block_timestamp: 1_700_000_000,
            tx_hash: B256::repeat_byte(0x0c),
            src_address: Address::repeat_byte(0x11),
            log_index: 0,
        }
    }

    #[test]
    fn test_owner_and_pause_create_if_absent() {
        let store = IndexerStore::new();
        let owner = Address::repeat_byte(0x0f);
        let mut tx = store.begin();
        ownership_transferred(
            &mut tx,
            &meta(),
            &OwnershipTransferredParams {
                previous_owner: Address::ZERO,
                new_owner: owner,
            },
        )
        .unwrap();
        set_paused(&mut tx, &meta(), &PauseParams { account: owner }, true).unwrap();
        tx.commit();

        let monster = store
            .get::<Monster>(&Monster::make_id(&Address::repeat_byte(0x11)))
            .unwrap();
        assert_eq!(monster.contract_owner, Some(owner));
        assert!(monster.paused);

        let mut tx = store.begin();
        set_paused(&mut tx, &meta(), &PauseParams { account: owner }, false).unwrap();
        tx.commit();
        let monster = store
            .get::<Monster>(&Monster::make_id(&Address::repeat_byte(0x11)))
            .unwrap();
        assert!(!monster.paused);
    }
}
