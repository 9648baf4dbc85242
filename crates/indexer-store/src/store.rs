use parking_lot::RwLock as CommitGate;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tracing::debug;

use crate::entity::{Changeset, Entity, EntityKind, StoreSnapshot, Tables};
use crate::registry::ContractRegistry;
use crate::sync_state::SyncState;
use crate::tx::StoreTx;

/// Thread-safe in-memory entity store for the indexer
#[derive(Debug)]
pub struct IndexerStore {
    tables: Tables,
    /// Held for writing while a changeset is applied so readers never
    /// observe half of a reducer's writes
    gate: CommitGate<()>,
    pub registry: Arc<ContractRegistry>,
    pub sync_state: Arc<RwLock<SyncState>>,
}

impl IndexerStore {
    pub fn new() -> Self {
        Self {
            tables: Tables::default(),
            gate: CommitGate::new(()),
            registry: Arc::new(ContractRegistry::new()),
            sync_state: Arc::new(RwLock::new(SyncState::default())),
        }
    }

    /// Start a transaction; nothing it writes is visible until commit
    pub fn begin(&self) -> StoreTx<'_> {
        StoreTx::new(self)
    }

    pub(crate) fn tables(&self) -> &Tables {
        &self.tables
    }

    pub(crate) fn apply(&self, changes: Changeset) -> usize {
        let start = Instant::now();
        let rows = changes.len();
        let registrations = {
            let _guard = self.gate.write();
            changes.apply_to(&self.tables)
        };
        let registered = registrations.len();
        for (address, block) in registrations {
            self.registry.register(address, block);
        }
        debug!(
            rows = rows,
            registered = registered,
            commit_us = start.elapsed().as_micros(),
            "Changeset committed"
        );
        rows
    }

    /// Get a committed row by id
    pub fn get<E: Entity>(&self, id: &str) -> Option<E> {
        let _guard = self.gate.read();
        E::table(&self.tables).get(id).map(|e| e.clone())
    }

    /// All committed rows of one collection, ordered by id
    pub fn all<E: Entity>(&self) -> Vec<E> {
        let _guard = self.gate.read();
        let mut rows: Vec<(String, E)> = E::table(&self.tables)
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect();
        rows.sort_by(|a, b| a.0.cmp(&b.0));
        rows.into_iter().map(|(_, row)| row).collect()
    }

    /// Number of committed rows of one collection
    pub fn count(&self, kind: EntityKind) -> usize {
        self.tables.count(kind)
    }

    /// Consistent copy of every collection
    pub fn snapshot(&self) -> StoreSnapshot {
        let _guard = self.gate.read();
        self.tables.snapshot()
    }

    /// Digest of the current state, equal for equal states
    pub fn state_hash(&self) -> indexer_core::Result<String> {
        crate::digest::state_hash(&self.snapshot())
    }
}

impl Default for IndexerStore {
    fn default() -> Self {
        Self::new()
    }
}
