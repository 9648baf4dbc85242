use alloy_primitives::{Address, B256, U256};

/// Delivery metadata attached to every event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventMeta {
    pub chain_id: u64,
    pub block_number: u64,
    pub block_timestamp: u64,
    pub tx_hash: B256,
    /// Contract that emitted the log
    pub src_address: Address,
    pub log_index: u64,
}

/// A decoded event together with its metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventEnvelope {
    pub meta: EventMeta,
    pub event: CreatureEvent,
}

impl EventEnvelope {
    pub fn new(meta: EventMeta, event: CreatureEvent) -> Self {
        Self { meta, event }
    }
}

/// Every event the indexer understands, one variant per contract event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreatureEvent {
    TokenCreated(TokenCreatedParams),
    TokenInitialized(TokenInitializedParams),
    Transfer(TransferParams),
    Trade(TradeParams),
    BattleStarted(BattleStartedParams),
    BattleEnded(BattleEndedParams),
    OwnershipTransferred(OwnershipTransferredParams),
    Paused(PauseParams),
    Unpaused(PauseParams),
    Approval(ApprovalParams),
    TokensMigrated(TokensMigratedParams),
    WhitelistPurchase(WhitelistPurchaseParams),
}

impl CreatureEvent {
    pub fn name(&self) -> &'static str {
        match self {
            CreatureEvent::TokenCreated(_) => "TokenCreated",
            CreatureEvent::TokenInitialized(_) => "TokenInitialized",
            CreatureEvent::Transfer(_) => "Transfer",
            CreatureEvent::Trade(_) => "Trade",
            CreatureEvent::BattleStarted(_) => "BattleStarted",
            CreatureEvent::BattleEnded(_) => "BattleEnded",
            CreatureEvent::OwnershipTransferred(_) => "OwnershipTransferred",
            CreatureEvent::Paused(_) => "Paused",
            CreatureEvent::Unpaused(_) => "Unpaused",
            CreatureEvent::Approval(_) => "Approval",
            CreatureEvent::TokensMigrated(_) => "TokensMigrated",
            CreatureEvent::WhitelistPurchase(_) => "WhitelistPurchase",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenCreatedParams {
    pub token: Address,
    pub creator: Address,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInitializedParams {
    pub token: Address,
    pub name: String,
    pub symbol: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferParams {
    pub from: Address,
    pub to: Address,
    pub value: U256,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeParams {
    pub trader: Address,
    pub is_buy: bool,
    /// Token units
    pub amount: U256,
    /// Wei paid or received
    pub eth_amount: U256,
    pub protocol_fee: U256,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleStartedParams {
    pub opponent: Address,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleEndedParams {
    pub winner: Address,
    pub loser: Address,
    pub transferred_value: U256,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnershipTransferredParams {
    pub previous_owner: Address,
    pub new_owner: Address,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PauseParams {
    pub account: Address,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalParams {
    pub owner: Address,
    pub spender: Address,
    pub value: U256,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokensMigratedParams {
    pub account: Address,
    pub amount: U256,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhitelistPurchaseParams {
    pub buyer: Address,
    pub amount: U256,
}
