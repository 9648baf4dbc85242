use alloy_primitives::Address;
use indexer_core::Result;
use std::collections::BTreeMap;

use crate::entity::{Changeset, Entity, EntityStore, Field};
use crate::registry::Registrar;
use crate::store::IndexerStore;

/// One reducer invocation's view of the store. Reads see the
/// invocation's own writes; nothing reaches the store before `commit`.
#[derive(Debug)]
pub struct StoreTx<'a> {
    store: &'a IndexerStore,
    changes: Changeset,
}

impl<'a> StoreTx<'a> {
    pub(crate) fn new(store: &'a IndexerStore) -> Self {
        Self {
            store,
            changes: Changeset::default(),
        }
    }

    /// Number of rows staged so far
    pub fn pending(&self) -> usize {
        self.changes.len()
    }

    /// Apply all staged writes at once; returns the number of rows written
    pub fn commit(self) -> usize {
        self.store.apply(self.changes)
    }

    /// Drop all staged writes
    pub fn rollback(self) {}
}

impl Registrar for StoreTx<'_> {
    fn register_contract(&mut self, address: Address, block: u64) {
        self.changes.stage_registration(address, block);
    }

    fn is_registered(&self, address: &Address) -> bool {
        self.changes.is_registration_staged(address) || self.store.registry.is_known(address)
    }
}

impl EntityStore for StoreTx<'_> {
    fn get<E: Entity>(&self, id: &str) -> Result<Option<E>> {
        if let Some(row) = E::staged(&self.changes).get(id) {
            return Ok(Some(row.clone()));
        }
        Ok(E::table(self.store.tables()).get(id).map(|e| e.clone()))
    }

    fn set<E: Entity>(&mut self, entity: E) -> Result<()> {
        E::staged_mut(&mut self.changes).insert(entity.id().to_string(), entity);
        Ok(())
    }

    fn query_where<E: Entity>(&self, field: Field, value: &str) -> Result<Vec<E>> {
        let matches = |row: &E| row.field(field).as_deref() == Some(value);

        let mut rows: BTreeMap<String, E> = E::table(self.store.tables())
            .iter()
            .filter(|e| matches(e.value()))
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect();

        for (id, row) in E::staged(&self.changes) {
            if matches(row) {
                rows.insert(id.clone(), row.clone());
            } else {
                rows.remove(id);
            }
        }

        Ok(rows.into_values().collect())
    }
}
