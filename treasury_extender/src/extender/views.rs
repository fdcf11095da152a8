//! Read-only accessors. None of them lock the ledger or change state.

use alloy_primitives::{Address, U256};

use crate::{
    allocator::data::AllocatorData,
    events::{EventQuery, ExtenderEvent},
    journal::JournalEntryQuery,
    types::{
        AllocatorHoldings, AllocatorLimits, AllocatorPerformance, AllocatorQueryData,
        AllocatorTarget,
    },
    utils::error::{ExtenderError, ExtenderResult},
};

use super::TreasuryExtender;

impl TreasuryExtender {
    /// Identity of the allocator registered at `id`
    pub fn allocator_by_id(&self, id: u64) -> Option<Address> {
        self.state.borrow().registry.address_of(id)
    }

    /// Id of the allocator registered under `address`
    pub fn allocator_id(&self, address: &Address) -> Option<u64> {
        self.state.borrow().registry.id_of(address)
    }

    pub fn allocator_count(&self) -> usize {
        self.state.borrow().registry.len()
    }

    /// Registered identities in id order
    pub fn allocators(&self) -> Vec<Address> {
        self.state.borrow().registry.addresses()
    }

    pub fn total_value_allocated(&self) -> U256 {
        self.state.borrow().total_value_allocated
    }

    pub fn allocator_data<T: Into<AllocatorTarget>>(
        &self,
        target: T,
    ) -> ExtenderResult<AllocatorData> {
        let id = self
            .target_id(target.into())
            .ok_or(ExtenderError::NonExistentValue)?;
        self.record(id)
    }

    pub fn allocator_limits<T: Into<AllocatorTarget>>(
        &self,
        target: T,
    ) -> ExtenderResult<AllocatorLimits> {
        Ok(self.allocator_data(target)?.limits)
    }

    pub fn allocator_performance<T: Into<AllocatorTarget>>(
        &self,
        target: T,
    ) -> ExtenderResult<AllocatorPerformance> {
        Ok(self.allocator_data(target)?.performance)
    }

    pub fn allocator_allocated<T: Into<AllocatorTarget>>(
        &self,
        target: T,
    ) -> ExtenderResult<AllocatorHoldings> {
        Ok(self.allocator_data(target)?.holdings)
    }

    /// Amount the allocator can still be funded with before hitting its allocation limit
    pub fn allocator_headroom<T: Into<AllocatorTarget>>(&self, target: T) -> ExtenderResult<U256> {
        Ok(self.allocator_data(target)?.headroom())
    }

    /// `true` when the allocator's cumulative loss is above its loss limit.
    /// Informational; the ledger never enforces the loss limit itself.
    pub fn is_loss_limit_exceeded<T: Into<AllocatorTarget>>(
        &self,
        target: T,
    ) -> ExtenderResult<bool> {
        Ok(self.allocator_data(target)?.is_loss_limit_exceeded())
    }

    /// Candid snapshot of one allocator, including its live status and token
    pub fn allocator_query<T: Into<AllocatorTarget>>(
        &self,
        target: T,
    ) -> ExtenderResult<AllocatorQueryData> {
        let (id, address, allocator) = self.resolve(target.into())?;
        let data = self.record(id)?;
        Ok(AllocatorQueryData::new(
            id,
            address,
            allocator.token(),
            allocator.status(),
            &data.limits,
            &data.performance,
            &data.holdings,
        ))
    }

    /// Emitted events not yet drained, in emission order
    pub fn events(&self) -> Vec<ExtenderEvent> {
        self.state.borrow().events.clone()
    }

    /// Hands off the emitted events and clears the buffer
    pub fn drain_events(&self) -> Vec<ExtenderEvent> {
        std::mem::take(&mut self.state.borrow_mut().events)
    }

    pub fn event_queries(&self) -> Vec<EventQuery> {
        self.state.borrow().events.iter().map(EventQuery::from).collect()
    }

    pub fn journal(&self) -> Vec<JournalEntryQuery> {
        self.journal
            .borrow()
            .entries()
            .map(JournalEntryQuery::from)
            .collect()
    }
}
