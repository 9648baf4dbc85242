use alloy_primitives::Address;

/// Points per wei of holder balance on a battle win (0.01).
pub const WIN_POINTS_NUMERATOR: u64 = 1;
pub const WIN_POINTS_DENOMINATOR: u64 = 100;

/// Points per wei of trade volume.
pub const TRADE_POINTS_MULTIPLIER: u64 = 50;

/// Experience points per wei of net flow.
pub const MONSTER_XP_MULTIPLIER: u64 = 2;

/// Mint/burn counterparty of every token contract.
pub const ZERO_ADDRESS: Address = Address::ZERO;

/// Id of the GlobalStats singleton.
pub const GLOBAL_STATS_ID: &str = "global";

/// Log-index distance between a Trade and its Transfer.
pub const TRANSFER_LOG_OFFSET: u64 = 1;

/// Same distance on the whitelist path, where a WhitelistPurchase sits in between.
pub const WHITELIST_TRANSFER_LOG_OFFSET: u64 = 2;
