use indexer_core::{IndexerError, Result};
use sha2::{Digest, Sha256};

use crate::entity::StoreSnapshot;

/// SHA-256 over the canonical JSON form of a snapshot. Collections are
/// ordered maps, so equal states hash equally.
pub fn state_hash(snapshot: &StoreSnapshot) -> Result<String> {
    let bytes = serde_json::to_vec(snapshot)
        .map_err(|e| IndexerError::Store(format!("snapshot serialization failed: {e}")))?;
    let hash = Sha256::digest(bytes);
    Ok(format!("{hash:x}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityStore;
    use crate::store::IndexerStore;
    use alloy_primitives::Address;
    use indexer_core::types::{Monster, Trader};

    #[test]
    fn test_hash_independent_of_insert_order() {
        let a = IndexerStore::new();
        let mut tx = a.begin();
        tx.set(Monster::new(Address::repeat_byte(1))).unwrap();
        tx.set(Trader::new(Address::repeat_byte(2))).unwrap();
        tx.commit();

        let b = IndexerStore::new();
        let mut tx = b.begin();
        tx.set(Trader::new(Address::repeat_byte(2))).unwrap();
        tx.commit();
        let mut tx = b.begin();
        tx.set(Monster::new(Address::repeat_byte(1))).unwrap();
        tx.commit();

        assert_eq!(a.snapshot(), b.snapshot());
        assert_eq!(
            state_hash(&a.snapshot()).unwrap(),
            state_hash(&b.snapshot()).unwrap()
        );
    }

    #[test]
    fn test_hash_changes_with_state() {
        let store = IndexerStore::new();
        let empty = state_hash(&store.snapshot()).unwrap();
        let mut tx = store.begin();
        tx.set(Trader::new(Address::repeat_byte(2))).unwrap();
        tx.commit();
        assert_ne!(empty, store.state_hash().unwrap());
    }

    #[test]
    fn test_empty_store_hashes() {
        let hash = IndexerStore::new().state_hash().unwrap();
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
