//! Treasury Extender's Constants

use alloy_primitives::U256;

/// Registry slot and id reserved as the "unassigned" sentinel
pub const SENTINEL_ID: u64 = 0;

/// Status the treasury returns when it accepts a deposit
pub const DEPOSIT_ACCEPTED: u64 = 0;
pub fn deposit_accepted() -> U256 {
    U256::from(DEPOSIT_ACCEPTED)
}

/// Allowance granted to the treasury the first time it needs to pull a token
pub fn max_approval() -> U256 {
    U256::MAX
}

/// Default number of journal entries kept before the oldest are dropped
pub const DEFAULT_JOURNAL_CAPACITY: u64 = 300;

/// Whether mutating calls take the per-ledger lock unless configured otherwise
#[cfg(not(feature = "parity"))]
pub const DEFAULT_REENTRANCY_GUARD: bool = true;
#[cfg(feature = "parity")]
pub const DEFAULT_REENTRANCY_GUARD: bool = false;
