//! Synchronous ports to the systems the ledger coordinates with.
//!
//! Calls through these traits may re-enter the ledger before they return.

use alloy_primitives::{Address, U256};

use crate::{types::AllocatorStatus, utils::error::ExtenderResult};

/// Valuation and custody authority holding the reserve.
#[cfg_attr(test, mockall::automock)]
pub trait Treasury {
    /// Identity the treasury pulls tokens with
    fn address(&self) -> Address;

    /// Prices `amount` of `token` in the common unit
    fn token_value(&self, token: Address, amount: U256) -> ExtenderResult<U256>;

    /// Releases `amount` of `token` from custody to the ledger
    fn manage(&self, token: Address, amount: U256) -> ExtenderResult<()>;

    /// Pulls `amount` of `token` from the ledger back into custody with its declared `value`.
    /// Returns a status code, zero meaning accepted.
    fn deposit(&self, amount: U256, token: Address, value: U256) -> ExtenderResult<U256>;
}

/// A registered yield strategy.
#[cfg_attr(test, mockall::automock)]
pub trait Allocator {
    /// Identity of the allocator
    fn address(&self) -> Address;

    fn status(&self) -> AllocatorStatus;

    /// Underlying token the allocator is entrusted with
    fn token(&self) -> Address;

    /// Id assigned at registration, zero while unassigned
    fn id(&self) -> u64;

    /// Persists the id assigned at registration
    fn set_id(&self, id: u64);
}

/// Fungible token transfer primitives.
#[cfg_attr(test, mockall::automock)]
pub trait Erc20 {
    fn balance_of(&self, token: Address, owner: Address) -> ExtenderResult<U256>;

    fn allowance(&self, token: Address, owner: Address, spender: Address) -> ExtenderResult<U256>;

    fn approve(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
        amount: U256,
    ) -> ExtenderResult<()>;

    fn transfer(&self, token: Address, from: Address, to: Address, amount: U256)
        -> ExtenderResult<()>;

    /// Moves `amount` from `from` to `to` on behalf of `spender`, consuming allowance
    fn transfer_from(
        &self,
        token: Address,
        spender: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> ExtenderResult<()>;
}
