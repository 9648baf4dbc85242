use alloy_primitives::Address;
use dashmap::DashMap;
use std::time::Instant;
use tracing::debug;

/// Side-effect channel through which reducers announce new token contracts
pub trait Registrar {
    /// Start delivering events of `address` from `block` on
    fn register_contract(&mut self, address: Address, block: u64);

    fn is_registered(&self, address: &Address) -> bool;
}

/// Token contracts whose events are delivered to the processor.
/// Filled by the factory reducer, read by the log fetcher.
#[derive(Debug)]
pub struct ContractRegistry {
    /// Token address -> block it was created in
    tokens: DashMap<Address, u64>,
}

impl ContractRegistry {
    pub fn new() -> Self {
        Self {
            tokens: DashMap::new(),
        }
    }

    /// Register a token; returns false if it was already known
    pub fn register(&self, address: Address, block: u64) -> bool {
        let start = Instant::now();
        if self.tokens.contains_key(&address) {
            return false;
        }
        self.tokens.insert(address, block);

        debug!(
            token = ?address,
            block = block,
            total_tokens = self.tokens.len(),
            insert_us = start.elapsed().as_micros(),
            "Token registered for event delivery"
        );
        true
    }

    /// Check if a token address is known
    pub fn is_known(&self, address: &Address) -> bool {
        self.tokens.contains_key(address)
    }

    /// Block in which a token was discovered
    pub fn discovered_at(&self, address: &Address) -> Option<u64> {
        self.tokens.get(address).map(|b| *b)
    }

    /// All registered addresses, sorted (for log filtering)
    pub fn addresses(&self) -> Vec<Address> {
        let mut addresses: Vec<Address> = self.tokens.iter().map(|e| *e.key()).collect();
        addresses.sort();
        addresses
    }

    /// Get total number of registered tokens
    pub fn count(&self) -> usize {
        self.tokens.len()
    }

    /// Bulk register tokens (for restoring a known token list)
    pub fn bulk_insert(&self, tokens: impl IntoIterator<Item = (Address, u64)>) -> usize {
        let mut count = 0;
        for (address, block) in tokens {
            if self.register(address, block) {
                count += 1;
            }
        }
        count
    }
}

impl Default for ContractRegistry {
    fn default() -> Self {
        Self::new()
    }
}
