//! Conversions between on-chain integers and the decimal type used for
//! prices, market caps, and cost-basis accumulators.

use crate::error::{IndexerError, Result};
use alloy_primitives::{Sign, I256, U256};
use bigdecimal::num_bigint::{BigInt, Sign as BigSign};
use bigdecimal::BigDecimal;

/// Exact decimal value of an unsigned 256-bit integer
pub fn u256_to_decimal(value: U256) -> BigDecimal {
    let digits = BigInt::from_bytes_be(BigSign::Plus, &value.to_be_bytes::<32>());
    BigDecimal::from(digits)
}

/// Exact decimal value of a signed 256-bit integer
pub fn i256_to_decimal(value: I256) -> BigDecimal {
    let (sign, abs) = value.into_sign_and_abs();
    let magnitude = u256_to_decimal(abs);
    match sign {
        Sign::Negative => -magnitude,
        Sign::Positive => magnitude,
    }
}

/// Reinterpret an event amount as a signed delta
pub fn to_signed(value: U256) -> Result<I256> {
    I256::try_from(value).map_err(|_| IndexerError::Overflow(format!("{value} exceeds I256")))
}

/// Negated signed delta of an event amount
pub fn to_signed_neg(value: U256) -> Result<I256> {
    to_signed(value).map(|v| -v)
}

/// Magnitude of a signed delta
pub fn abs_u256(value: I256) -> U256 {
    value.unsigned_abs()
}
