#![allow(dead_code)]

use alloy_primitives::{Address, B256, U256};
use indexer_core::constants::ZERO_ADDRESS;
use indexer_core::types::{
    BattleEndedParams, CreatureEvent, EventEnvelope, EventMeta, TokenCreatedParams, TradeParams,
    TransferParams, WhitelistPurchaseParams,
};
use indexer_core::{IndexerConfig, PollConfig, SyncConfig};
use indexer_processor::EventProcessor;
use indexer_store::IndexerStore;
use std::sync::Arc;

pub const CHAIN_ID: u64 = 8453;
pub const FACTORY: Address = Address::new([0xf1; 20]);
pub const TOKEN: Address = Address::new([0x11; 20]);
pub const RIVAL: Address = Address::new([0x22; 20]);
pub const ALICE: Address = Address::new([0x01; 20]);
pub const BOB: Address = Address::new([0x02; 20]);

pub fn config() -> IndexerConfig {
    IndexerConfig {
        chain_id: CHAIN_ID,
        rpc_url: "http://localhost:8545".to_string(),
        factory: FACTORY,
        start_block: 1,
        sync: SyncConfig {
            retry_attempts: 1,
            retry_delay_ms: 0,
        },
        poll: PollConfig {
            interval_ms: 10,
            confirmations: 0,
        },
    }
}

pub fn processor() -> EventProcessor {
    EventProcessor::new(Arc::new(IndexerStore::new()), config())
}

pub fn wei(eth_tenths: u64) -> U256 {
    U256::from(eth_tenths) * U256::from(100_000_000_000_000_000u64)
}

/// Builds an ordered event stream, one transaction per `tx()` call
pub struct Stream {
    events: Vec<EventEnvelope>,
    block: u64,
    tx: u8,
    log_index: u64,
}

impl Stream {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            block: 100,
            tx: 0,
            log_index: 0,
        }
    }

    /// Start a new transaction in a new block
    pub fn tx(&mut self) -> &mut Self {
        self.block += 1;
        self.tx = self.tx.wrapping_add(1);
        self.log_index = 0;
        self
    }

    pub fn tx_hash(&self) -> B256 {
        B256::repeat_byte(self.tx)
    }

    pub fn block_number(&self) -> u64 {
        self.block
    }

    pub fn next_log_index(&self) -> u64 {
        self.log_index
    }

    pub fn push(&mut self, src: Address, event: CreatureEvent) -> &mut Self {
        let meta = EventMeta {
            chain_id: CHAIN_ID,
            block_number: self.block,
            block_timestamp: 1_700_000_000 + self.block * 2,
            tx_hash: self.tx_hash(),
            src_address: src,
            log_index: self.log_index,
        };
        self.events.push(EventEnvelope::new(meta, event));
        self.log_index += 1;
        self
    }

    pub fn create(&mut self, token: Address) -> &mut Self {
        self.tx().push(
            FACTORY,
            CreatureEvent::TokenCreated(TokenCreatedParams {
                token,
                creator: Address::repeat_byte(0x99),
            }),
        )
    }

    pub fn transfer(&mut self, token: Address, from: Address, to: Address, value: U256) -> &mut Self {
        self.push(token, CreatureEvent::Transfer(TransferParams { from, to, value }))
    }

    pub fn trade_event(
        &mut self,
        token: Address,
        trader: Address,
        is_buy: bool,
        amount: U256,
        eth_amount: U256,
        fee: U256,
    ) -> &mut Self {
        self.push(
            token,
            CreatureEvent::Trade(TradeParams {
                trader,
                is_buy,
                amount,
                eth_amount,
                protocol_fee: fee,
            }),
        )
    }

    /// Mint transfer followed by a buy, as the bonding curve emits them
    pub fn buy(&mut self, token: Address, trader: Address, amount: U256, eth_amount: U256, fee: U256) -> &mut Self {
        self.tx()
            .transfer(token, ZERO_ADDRESS, trader, amount)
            .trade_event(token, trader, true, amount, eth_amount, fee)
    }

    /// Burn transfer followed by a sell
    pub fn sell(&mut self, token: Address, trader: Address, amount: U256, eth_amount: U256, fee: U256) -> &mut Self {
        self.tx()
            .transfer(token, trader, ZERO_ADDRESS, amount)
            .trade_event(token, trader, false, amount, eth_amount, fee)
    }

    /// Mint, WhitelistPurchase, then the buy
    pub fn whitelist_buy(&mut self, token: Address, trader: Address, amount: U256, eth_amount: U256) -> &mut Self {
        self.tx()
            .transfer(token, ZERO_ADDRESS, trader, amount)
            .push(
                token,
                CreatureEvent::WhitelistPurchase(WhitelistPurchaseParams {
                    buyer: trader,
                    amount,
                }),
            )
            .trade_event(token, trader, true, amount, eth_amount, U256::ZERO)
    }

    /// Both contracts report the battle result
    pub fn battle(&mut self, winner: Address, loser: Address) -> &mut Self {
        let params = BattleEndedParams {
            winner,
            loser,
            transferred_value: U256::from(1_000u64),
        };
        self.tx()
            .push(winner, CreatureEvent::BattleEnded(params.clone()))
            .push(loser, CreatureEvent::BattleEnded(params))
    }

    pub fn events(&self) -> Vec<EventEnvelope> {
        self.events.clone()
    }
}
