use alloy::rpc::types::Log;
use alloy_primitives::{Address, B256};
use alloy_sol_types::SolEvent;
use indexer_core::events::{
    Approval, BattleEnded, BattleStarted, OwnershipTransferred, Paused, TokenCreated,
    TokenInitialized, TokensMigrated, Trade, Transfer, Unpaused, WhitelistPurchase,
};
use indexer_core::types::{
    ApprovalParams, BattleEndedParams, BattleStartedParams, CreatureEvent, EventEnvelope,
    EventMeta, OwnershipTransferredParams, PauseParams, TokenCreatedParams,
    TokenInitializedParams, TokensMigratedParams, TradeParams, TransferParams,
    WhitelistPurchaseParams,
};
use indexer_core::{IndexerError, Result};
use tracing::trace;

/// topic0 of every factory event
pub const FACTORY_TOPICS: [B256; 2] = [TokenCreated::SIGNATURE_HASH, TokenInitialized::SIGNATURE_HASH];

/// topic0 of every creature token event
pub const TOKEN_TOPICS: [B256; 10] = [
    Transfer::SIGNATURE_HASH,
    Trade::SIGNATURE_HASH,
    BattleStarted::SIGNATURE_HASH,
    BattleEnded::SIGNATURE_HASH,
    OwnershipTransferred::SIGNATURE_HASH,
    Paused::SIGNATURE_HASH,
    Unpaused::SIGNATURE_HASH,
    Approval::SIGNATURE_HASH,
    TokensMigrated::SIGNATURE_HASH,
    WhitelistPurchase::SIGNATURE_HASH,
];

fn decode<E: SolEvent>(log: &Log) -> Result<E> {
    E::decode_log(&log.inner)
        .map(|decoded| decoded.data)
        .map_err(|e| IndexerError::EventDecode(format!("{}: {}", E::SIGNATURE, e)))
}

fn decode_factory_event(topic0: B256, log: &Log) -> Result<Option<CreatureEvent>> {
    let event = match topic0 {
        sig if sig == TokenCreated::SIGNATURE_HASH => {
            let e = decode::<TokenCreated>(log)?;
            CreatureEvent::TokenCreated(TokenCreatedParams {
                token: e.tokenAddress,
                creator: e.creator,
            })
        }
        sig if sig == TokenInitialized::SIGNATURE_HASH => {
            let e = decode::<TokenInitialized>(log)?;
            CreatureEvent::TokenInitialized(TokenInitializedParams {
                token: e.tokenAddress,
                name: e.name,
                symbol: e.symbol,
            })
        }
        _ => return Ok(None),
    };
    Ok(Some(event))
}

fn decode_token_event(topic0: B256, log: &Log) -> Result<Option<CreatureEvent>> {
    let event = match topic0 {
        sig if sig == Transfer::SIGNATURE_HASH => {
            let e = decode::<Transfer>(log)?;
            CreatureEvent::Transfer(TransferParams {
                from: e.from,
                to: e.to,
                value: e.value,
            })
        }
        sig if sig == Trade::SIGNATURE_HASH => {
            let e = decode::<Trade>(log)?;
            CreatureEvent::Trade(TradeParams {
                trader: e.trader,
                is_buy: e.isBuy,
                amount: e.amount,
                eth_amount: e.ethAmount,
                protocol_fee: e.protocolFee,
            })
        }
        sig if sig == BattleStarted::SIGNATURE_HASH => {
            let e = decode::<BattleStarted>(log)?;
            CreatureEvent::BattleStarted(BattleStartedParams { opponent: e.opponent })
        }
        sig if sig == BattleEnded::SIGNATURE_HASH => {
            let e = decode::<BattleEnded>(log)?;
            CreatureEvent::BattleEnded(BattleEndedParams {
                winner: e.winner,
                loser: e.loser,
                transferred_value: e.transferredValue,
            })
        }
        sig if sig == OwnershipTransferred::SIGNATURE_HASH => {
            let e = decode::<OwnershipTransferred>(log)?;
            CreatureEvent::OwnershipTransferred(OwnershipTransferredParams {
                previous_owner: e.previousOwner,
                new_owner: e.newOwner,
            })
        }
        sig if sig == Paused::SIGNATURE_HASH => {
            let e = decode::<Paused>(log)?;
            CreatureEvent::Paused(PauseParams { account: e.account })
        }
        sig if sig == Unpaused::SIGNATURE_HASH => {
            let e = decode::<Unpaused>(log)?;
            CreatureEvent::Unpaused(PauseParams { account: e.account })
        }
        sig if sig == Approval::SIGNATURE_HASH => {
            let e = decode::<Approval>(log)?;
            CreatureEvent::Approval(ApprovalParams {
                owner: e.owner,
                spender: e.spender,
                value: e.value,
            })
        }
        sig if sig == TokensMigrated::SIGNATURE_HASH => {
            let e = decode::<TokensMigrated>(log)?;
            CreatureEvent::TokensMigrated(TokensMigratedParams {
                account: e.account,
                amount: e.amount,
            })
        }
        sig if sig == WhitelistPurchase::SIGNATURE_HASH => {
            let e = decode::<WhitelistPurchase>(log)?;
            CreatureEvent::WhitelistPurchase(WhitelistPurchaseParams {
                buyer: e.buyer,
                amount: e.amount,
            })
        }
        _ => return Ok(None),
    };
    Ok(Some(event))
}

/// Turn an RPC log into an event envelope.
///
/// Factory events are only accepted from `factory`; token events are
/// decoded from any address and the caller decides relevance. Returns
/// `None` for logs with an unknown or missing topic0.
pub fn decode_log(
    log: &Log,
    chain_id: u64,
    factory: Address,
    block_timestamp: u64,
) -> Result<Option<EventEnvelope>> {
    let Some(topic0) = log.topics().first().copied() else {
        trace!("Skipping log without topic0");
        return Ok(None);
    };

    let address = log.address();
    let event = if address == factory {
        decode_factory_event(topic0, log)?
    } else {
        decode_token_event(topic0, log)?
    };

    let Some(event) = event else {
        trace!(topic0 = ?topic0, address = ?address, "Unknown event signature");
        return Ok(None);
    };

    let meta = EventMeta {
        chain_id,
        block_number: log.block_number.unwrap_or_default(),
        block_timestamp: log.block_timestamp.unwrap_or(block_timestamp),
        tx_hash: log.transaction_hash.unwrap_or_default(),
        src_address: address,
        log_index: log.log_index.unwrap_or_default(),
    };

    Ok(Some(EventEnvelope::new(meta, event)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{LogData, U256};

    const FACTORY: Address = Address::new([0xf1; 20]);
    const TOKEN: Address = Address::new([0x11; 20]);

    fn rpc_log<E: SolEvent>(address: Address, event: &E, log_index: u64) -> Log {
        Log {
            inner: alloy_primitives::Log {
                address,
                data: event.encode_log_data(),
            },
            block_hash: None,
            block_number: Some(12),
            block_timestamp: None,
            transaction_hash: Some(B256::repeat_byte(0xaa)),
            transaction_index: Some(0),
            log_index: Some(log_index),
            removed: false,
        }
    }

    #[test]
    fn test_decodes_trade_with_meta() {
        let event = Trade {
            trader: Address::repeat_byte(0x01),
            isBuy: true,
            amount: U256::from(5u64),
            ethAmount: U256::from(50u64),
            protocolFee: U256::from(1u64),
        };
        let envelope = decode_log(&rpc_log(TOKEN, &event, 3), 1, FACTORY, 1_700_000_000)
            .unwrap()
            .unwrap();

        assert_eq!(envelope.meta.block_number, 12);
        assert_eq!(envelope.meta.log_index, 3);
        assert_eq!(envelope.meta.block_timestamp, 1_700_000_000);
        assert_eq!(envelope.meta.src_address, TOKEN);
        match envelope.event {
            CreatureEvent::Trade(p) => {
                assert!(p.is_buy);
                assert_eq!(p.eth_amount, U256::from(50u64));
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_factory_events_only_from_factory() {
        let event = TokenCreated {
            tokenAddress: TOKEN,
            creator: Address::repeat_byte(0x99),
        };
        let from_factory = decode_log(&rpc_log(FACTORY, &event, 0), 1, FACTORY, 0).unwrap();
        assert!(matches!(
            from_factory.map(|e| e.event),
            Some(CreatureEvent::TokenCreated(p)) if p.token == TOKEN
        ));

        let spoofed = decode_log(&rpc_log(TOKEN, &event, 0), 1, FACTORY, 0).unwrap();
        assert!(spoofed.is_none());
    }

    #[test]
    fn test_log_without_topics_is_ignored() {
        let mut log = rpc_log(
            TOKEN,
            &Paused {
                account: Address::ZERO,
            },
            0,
        );
        log.inner.data = LogData::new_unchecked(vec![], Default::default());
        assert!(decode_log(&log, 1, FACTORY, 0).unwrap().is_none());
    }

    #[test]
    fn test_truncated_data_is_a_decode_error() {
        let mut log = rpc_log(
            TOKEN,
            &Transfer {
                from: Address::ZERO,
                to: TOKEN,
                value: U256::from(1u64),
            },
            0,
        );
        let topics = log.inner.data.topics().to_vec();
        log.inner.data = LogData::new_unchecked(topics, Default::default());
        let err = decode_log(&log, 1, FACTORY, 0).unwrap_err();
        assert!(matches!(err, IndexerError::EventDecode(_)));
    }
}
