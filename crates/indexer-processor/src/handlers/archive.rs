use indexer_core::types::{address_id, CreatureEvent, EventMeta, EventRecord};
use indexer_core::Result;
use indexer_store::EntityStore;
use std::collections::BTreeMap;
use tracing::debug;

/// Parameters of an event as strings, keyed by their ABI names
fn archived_params(event: &CreatureEvent) -> BTreeMap<String, String> {
    let pairs: Vec<(&str, String)> = match event {
        CreatureEvent::TokenCreated(p) => vec![
            ("tokenAddress", address_id(&p.token)),
            ("creator", address_id(&p.creator)),
        ],
        CreatureEvent::TokenInitialized(p) => vec![
            ("tokenAddress", address_id(&p.token)),
            ("name", p.name.clone()),
            ("symbol", p.symbol.clone()),
        ],
        CreatureEvent::Transfer(p) => vec![
            ("from", address_id(&p.from)),
            ("to", address_id(&p.to)),
            ("value", p.value.to_string()),
        ],
        CreatureEvent::Trade(p) => vec![
            ("trader", address_id(&p.trader)),
            ("isBuy", p.is_buy.to_string()),
            ("amount", p.amount.to_string()),
            ("ethAmount", p.eth_amount.to_string()),
            ("protocolFee", p.protocol_fee.to_string()),
        ],
        CreatureEvent::BattleStarted(p) => vec![("opponent", address_id(&p.opponent))],
        CreatureEvent::BattleEnded(p) => vec![
            ("winner", address_id(&p.winner)),
            ("loser", address_id(&p.loser)),
            ("transferredValue", p.transferred_value.to_string()),
        ],
        CreatureEvent::OwnershipTransferred(p) => vec![
            ("previousOwner", address_id(&p.previous_owner)),
            ("newOwner", address_id(&p.new_owner)),
        ],
        CreatureEvent::Paused(p) | CreatureEvent::Unpaused(p) => {
            vec![("account", address_id(&p.account))]
        }
        CreatureEvent::Approval(p) => vec![
            ("owner", address_id(&p.owner)),
            ("spender", address_id(&p.spender)),
            ("value", p.value.to_string()),
        ],
        CreatureEvent::TokensMigrated(p) => vec![
            ("account", address_id(&p.account)),
            ("amount", p.amount.to_string()),
        ],
        CreatureEvent::WhitelistPurchase(p) => vec![
            ("buyer", address_id(&p.buyer)),
            ("amount", p.amount.to_string()),
        ],
    };
    pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

/// Store an immutable raw copy of a decoded event. Replaying the same log
/// rewrites the same row.
pub fn record<S: EntityStore>(store: &mut S, meta: &EventMeta, event: &CreatureEvent) -> Result<()> {
    let record = EventRecord {
        id: EventRecord::make_id(meta.chain_id, meta.block_number, meta.log_index),
        event_name: event.name().to_string(),
        contract: meta.src_address,
        params: archived_params(event),
        tx_hash: meta.tx_hash,
        block_number: meta.block_number,
        timestamp: meta.block_timestamp,
    };

    debug!(id = %record.id, event = %record.event_name, "Event archived");
    store.set(record)
}
