mod battle;
mod event;
mod event_record;
mod global_stats;
mod holdings;
mod monster;
mod snapshot;
mod trade;
mod trader;

pub use battle::BattleOutcome;
pub use event::{
    ApprovalParams, BattleEndedParams, BattleStartedParams, CreatureEvent, EventEnvelope,
    EventMeta, OwnershipTransferredParams, PauseParams, TokenCreatedParams,
    TokenInitializedParams, TokensMigratedParams, TradeParams, TransferParams,
    WhitelistPurchaseParams,
};
pub use event_record::EventRecord;
pub use global_stats::GlobalStats;
pub use holdings::{CurrentHoldings, HoldingsSnapshot};
pub use monster::{BattleRecordPatch, MarketPatch, Monster, MonsterMetadata};
pub use snapshot::{snapshot_id, MarketCapSnapshot, TotalVolumeTradedSnapshot};
pub use trade::{Trade, TradeResolution, TradeType};
pub use trader::Trader;

use alloy_primitives::Address;

/// Canonical string form of an address used inside entity ids
pub fn address_id(address: &Address) -> String {
    format!("{:?}", address)
}
