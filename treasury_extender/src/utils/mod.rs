//! Utility and helper functions needed for:
//! - Error handling
//! - Type casting between `U256`, `Nat` and `Address`
//! - Checked arithmetic on ledger counters

pub(crate) mod common;
pub(crate) mod error;
