//! Allocation ledger for a treasury that delegates part of its reserve to
//! external yield strategies ("allocators").
//!
//! The ledger registers allocators, limits them, funds and defunds them, books
//! the gains and losses they report and sweeps their incidental rewards back to
//! the treasury. The treasury, the allocators and the token ledger are reached
//! through the synchronous ports in [`ports`].

mod allocator;
mod config;
mod constants;
mod events;
mod extender;
mod journal;
pub mod ports;
mod state;
mod types;
mod utils;

#[cfg(test)]
pub(crate) mod testkit;

pub use allocator::data::AllocatorData;
pub use config::{ExtenderConfig, InitArgs};
pub use events::{EventQuery, ExtenderEvent};
pub use extender::TreasuryExtender;
pub use journal::{JournalEntryQuery, LogType};
pub use types::{
    AllocatorHoldings, AllocatorLimits, AllocatorPerformance, AllocatorQueryData,
    AllocatorStatus, AllocatorTarget,
};
pub use utils::error::{ExtenderError, ExtenderResult};
