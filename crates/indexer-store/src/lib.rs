mod digest;
mod entity;
mod registry;
mod store;
mod sync_state;
mod tx;

pub use digest::state_hash;
pub use entity::{Changeset, Entity, EntityKind, EntityStore, Field, Fields, StoreSnapshot, Tables};
pub use registry::{ContractRegistry, Registrar};
pub use store::IndexerStore;
pub use sync_state::{SyncMode, SyncState, SyncStats};
pub use tx::StoreTx;
