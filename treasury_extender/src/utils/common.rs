//! Common utility and helper functions that are used across the project

use std::str::FromStr;

use alloy_primitives::{Address, U256};
use candid::Nat;
use num_bigint::BigUint;
use num_traits::ToPrimitive;

use super::error::*;

/// Converts String to Address and returns ExtenderError on failure
pub fn string_to_address(input: String) -> ExtenderResult<Address> {
    Address::from_str(&input).map_err(|err| ExtenderError::DecodingError(format!("{:#?}", err)))
}

/// Converts values of type `U256` to `Nat`
pub fn u256_to_nat(value: &U256) -> Nat {
    Nat(BigUint::from_bytes_be(&value.to_be_bytes::<32>()))
}

/// Converts values of type `Nat` to `u64`
pub fn nat_to_u64(n: &Nat) -> ExtenderResult<u64> {
    n.0.to_u64().ok_or(ExtenderError::DecodingError(
        "The `Nat` input does not fit into 64 bits.".to_string(),
    ))
}

/// Adds two ledger amounts, naming the counter in the error on overflow.
pub fn checked_add(lhs: U256, rhs: U256, counter: &str) -> ExtenderResult<U256> {
    lhs.checked_add(rhs)
        .ok_or(arithmetic_err(format!("{} overflowed.", counter)))
}

/// Subtracts two ledger amounts, naming the counter in the error on underflow.
pub fn checked_sub(lhs: U256, rhs: U256, counter: &str) -> ExtenderResult<U256> {
    lhs.checked_sub(rhs)
        .ok_or(arithmetic_err(format!("{} underflowed.", counter)))
}
