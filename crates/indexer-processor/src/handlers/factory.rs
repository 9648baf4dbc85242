use indexer_core::types::{
    EventMeta, Monster, MonsterMetadata, TokenCreatedParams, TokenInitializedParams,
};
use indexer_core::Result;
use indexer_store::{EntityStore, Registrar};
use tracing::{debug, info};

use crate::helpers::monster::load_or_create;

/// Register a newly deployed token and create its zeroed Monster.
/// Returns whether a Monster row was created.
pub fn token_created<S: EntityStore + Registrar>(
    store: &mut S,
    meta: &EventMeta,
    params: &TokenCreatedParams,
) -> Result<bool> {
    if !store.is_registered(&params.token) {
        store.register_contract(params.token, meta.block_number);
    }

    if store.get::<Monster>(&Monster::make_id(&params.token))?.is_some() {
        info!(
            monster = ?params.token,
            block = meta.block_number,
            "Token created again for an existing monster, keeping current row"
        );
        return Ok(false);
    }

    store.set(Monster::new(params.token))?;

    info!(
        monster = ?params.token,
        creator = ?params.creator,
        block = meta.block_number,
        "Monster created"
    );
    Ok(true)
}

/// Set name and symbol. Returns whether the Monster had to be created.
pub fn token_initialized<S: EntityStore + Registrar>(
    store: &mut S,
    meta: &EventMeta,
    params: &TokenInitializedParams,
) -> Result<bool> {
    let created = store
        .get::<Monster>(&Monster::make_id(&params.token))?
        .is_none();
    if !store.is_registered(&params.token) {
        store.register_contract(params.token, meta.block_number);
    }

    let monster = load_or_create(store, &params.token, "TokenInitialized")?.with_metadata(
        MonsterMetadata {
            name: params.name.clone(),
            symbol: params.symbol.clone(),
        },
    );

    debug!(
        monster = %monster.id,
        name = %monster.name,
        symbol = %monster.symbol,
        "Monster metadata set"
    );

    store.set(monster)?;
    Ok(created)
}
