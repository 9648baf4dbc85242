//! One reducer per contract event. Every reducer runs against a
//! transaction and either stages all of its writes or returns an error.
//!
//! Reducers are free functions generic over [`EntityStore`] rather than
//! handler structs owning the store: the [`StoreTx`](indexer_store::StoreTx)
//! for the event is created by the processor and passed in, so the same
//! reducer runs against a transaction in production and in tests.
//! Every event that reduces cleanly is also archived as an `EventRecord`
//! in the same transaction.

mod archive;
mod battle;
mod factory;
mod ownership;
mod trade;
mod transfer;

use indexer_core::types::{CreatureEvent, EventEnvelope};
use indexer_core::Result;
use indexer_store::{EntityStore, Registrar};

/// What a reduced event changed, for sync statistics
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Applied {
    pub monster_created: bool,
    pub trade_indexed: bool,
}

/// Route an event to its reducer, then archive it
pub fn dispatch<S: EntityStore + Registrar>(store: &mut S, envelope: &EventEnvelope) -> Result<Applied> {
    let meta = &envelope.meta;
    let mut applied = Applied::default();

    match &envelope.event {
        CreatureEvent::TokenCreated(p) => {
            applied.monster_created = factory::token_created(store, meta, p)?;
        }
        CreatureEvent::TokenInitialized(p) => {
            applied.monster_created = factory::token_initialized(store, meta, p)?;
        }
        CreatureEvent::Transfer(p) => transfer::handle(store, meta, p)?,
        CreatureEvent::Trade(p) => {
            trade::handle(store, meta, p)?;
            applied.trade_indexed = true;
        }
        CreatureEvent::BattleStarted(p) => battle::started(store, meta, p)?,
        CreatureEvent::BattleEnded(p) => battle::ended(store, meta, p)?,
        CreatureEvent::OwnershipTransferred(p) => ownership::ownership_transferred(store, meta, p)?,
        CreatureEvent::Paused(p) => ownership::set_paused(store, meta, p, true)?,
        CreatureEvent::Unpaused(p) => ownership::set_paused(store, meta, p, false)?,
        CreatureEvent::Approval(_)
        | CreatureEvent::TokensMigrated(_)
        | CreatureEvent::WhitelistPurchase(_) => {}
    }

    archive::record(store, meta, &envelope.event)?;
    Ok(applied)
}
