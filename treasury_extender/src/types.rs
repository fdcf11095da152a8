use alloy_primitives::{Address, U256};
use candid::{CandidType, Nat};
use serde::Deserialize;

use crate::utils::common::u256_to_nat;

/// Operating status an allocator reports about itself.
/// The ledger only observes it; transitions are owned by the allocator.
#[derive(Clone, Copy, CandidType, Debug, Deserialize, PartialEq, Eq)]
pub enum AllocatorStatus {
    Offline,
    Activated,
    Migrating,
}

impl AllocatorStatus {
    pub fn is_offline(&self) -> bool {
        matches!(self, AllocatorStatus::Offline)
    }
}

/// Ceilings on outstanding holdings and on cumulative loss.
/// Overwritten wholesale, never merged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AllocatorLimits {
    /// Maximum `holdings.allocated` after any funding operation
    pub allocated: U256,
    /// Cumulative loss the allocator is expected to stay under
    pub loss: U256,
}

/// Cumulative, non-decreasing (outside fund returns) performance counters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AllocatorPerformance {
    pub gain: U256,
    pub loss: U256,
}

/// Outstanding principal held by the allocator, in its underlying token
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AllocatorHoldings {
    pub allocated: U256,
}

/// Addresses an allocator either by its sequential id or by its identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AllocatorTarget {
    Id(u64),
    Address(Address),
}

impl From<u64> for AllocatorTarget {
    fn from(value: u64) -> Self {
        AllocatorTarget::Id(value)
    }
}

impl From<Address> for AllocatorTarget {
    fn from(value: Address) -> Self {
        AllocatorTarget::Address(value)
    }
}

#[derive(CandidType, Clone, Debug, PartialEq)]
pub struct AllocatorQueryData {
    pub id: u64,
    pub allocator: String,
    pub token: String,
    pub status: AllocatorStatus,
    pub allocation_limit: Nat,
    pub loss_limit: Nat,
    pub gain: Nat,
    pub loss: Nat,
    pub allocated: Nat,
}

impl AllocatorQueryData {
    pub fn new(
        id: u64,
        allocator: Address,
        token: Address,
        status: AllocatorStatus,
        limits: &AllocatorLimits,
        performance: &AllocatorPerformance,
        holdings: &AllocatorHoldings,
    ) -> Self {
        Self {
            id,
            allocator: allocator.to_string(),
            token: token.to_string(),
            status,
            allocation_limit: u256_to_nat(&limits.allocated),
            loss_limit: u256_to_nat(&limits.loss),
            gain: u256_to_nat(&performance.gain),
            loss: u256_to_nat(&performance.loss),
            allocated: u256_to_nat(&holdings.allocated),
        }
    }
}
