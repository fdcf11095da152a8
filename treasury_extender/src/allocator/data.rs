//! Per-allocator ledger record

use alloy_primitives::U256;

use crate::types::{AllocatorHoldings, AllocatorLimits, AllocatorPerformance};

/// Struct containing everything the ledger tracks about one allocator
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AllocatorData {
    /// Limits set by the operator while the allocator is offline
    pub limits: AllocatorLimits,
    /// Cumulative self-reported gain and loss
    pub performance: AllocatorPerformance,
    /// Outstanding principal
    pub holdings: AllocatorHoldings,
}

impl AllocatorData {
    /// Replaces the limits record.
    pub fn limits(&mut self, limits: AllocatorLimits) -> &mut Self {
        self.limits = limits;
        self
    }

    /// Sets the cumulative gain.
    pub fn gain(&mut self, gain: U256) -> &mut Self {
        self.performance.gain = gain;
        self
    }

    /// Sets the cumulative loss.
    pub fn loss(&mut self, loss: U256) -> &mut Self {
        self.performance.loss = loss;
        self
    }

    /// Sets the outstanding principal.
    pub fn allocated(&mut self, allocated: U256) -> &mut Self {
        self.holdings.allocated = allocated;
        self
    }

    /// Room left under the allocation limit
    pub fn headroom(&self) -> U256 {
        self.limits
            .allocated
            .saturating_sub(self.holdings.allocated)
    }

    /// `true` when cumulative loss exceeds the loss limit
    pub fn is_loss_limit_exceeded(&self) -> bool {
        self.performance.loss > self.limits.loss
    }
}
