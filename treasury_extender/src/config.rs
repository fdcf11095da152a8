//! Ledger configuration
//!
//! `InitArgs` is the wire form (candid or JSON, addresses as strings);
//! `ExtenderConfig` is the parsed form the ledger runs with.

use alloy_primitives::Address;
use candid::{CandidType, Nat};
use serde::Deserialize;

use crate::{
    constants::{DEFAULT_JOURNAL_CAPACITY, DEFAULT_REENTRANCY_GUARD},
    utils::{
        common::{nat_to_u64, string_to_address},
        error::{ExtenderError, ExtenderResult},
    },
};

#[derive(CandidType, Deserialize, Clone, Debug)]
pub struct InitArgs {
    /// Address the ledger holds and moves tokens as
    pub extender: String,
    /// Addresses holding the operator role
    pub operators: Vec<String>,
    pub reentrancy_guard: Option<bool>,
    pub journal_capacity: Option<Nat>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtenderConfig {
    pub extender: Address,
    pub operators: Vec<Address>,
    /// Rejects re-entrant mutating calls with `Locked` when set
    pub reentrancy_guard: bool,
    pub journal_capacity: u64,
}

impl Default for ExtenderConfig {
    fn default() -> Self {
        Self {
            extender: Address::ZERO,
            operators: vec![],
            reentrancy_guard: DEFAULT_REENTRANCY_GUARD,
            journal_capacity: DEFAULT_JOURNAL_CAPACITY,
        }
    }
}

impl TryFrom<InitArgs> for ExtenderConfig {
    type Error = ExtenderError;

    fn try_from(value: InitArgs) -> Result<Self, Self::Error> {
        let extender = string_to_address(value.extender)?;
        let operators: Vec<Address> = value
            .operators
            .into_iter()
            .map(string_to_address)
            .collect::<Result<Vec<_>, _>>()?;
        let journal_capacity = value
            .journal_capacity
            .as_ref()
            .map(nat_to_u64)
            .transpose()?
            .unwrap_or(DEFAULT_JOURNAL_CAPACITY);

        Ok(Self {
            extender,
            operators,
            reentrancy_guard: value.reentrancy_guard.unwrap_or(DEFAULT_REENTRANCY_GUARD),
            journal_capacity,
        })
    }
}

impl ExtenderConfig {
    /// Parses a JSON document shaped like `InitArgs`
    pub fn from_json(json: &str) -> ExtenderResult<Self> {
        let args: InitArgs = serde_json::from_str(json)
            .map_err(|err| ExtenderError::DecodingError(err.to_string()))?;
        args.try_into()
    }

    /// Sets the ledger's own address.
    pub fn extender(&mut self, extender: Address) -> &mut Self {
        self.extender = extender;
        self
    }

    /// Grants the operator role to `operator`.
    pub fn operator(&mut self, operator: Address) -> &mut Self {
        if !self.operators.contains(&operator) {
            self.operators.push(operator);
        }
        self
    }

    /// Enables or disables the re-entrancy lock.
    pub fn reentrancy_guard(&mut self, enabled: bool) -> &mut Self {
        self.reentrancy_guard = enabled;
        self
    }

    /// Sets how many journal entries are kept.
    pub fn journal_capacity(&mut self, capacity: u64) -> &mut Self {
        self.journal_capacity = capacity;
        self
    }

    pub fn is_operator(&self, caller: &Address) -> bool {
        self.operators.contains(caller)
    }
}
