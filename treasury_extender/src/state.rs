//! In-memory ledger state
//!
//! Records are stored by id in a vector aligned with the registry slots, so
//! slot 0 carries an unused default record.

use alloy_primitives::U256;

use crate::{
    allocator::{data::AllocatorData, registry::AllocatorRegistry},
    events::ExtenderEvent,
};

#[derive(Clone)]
pub struct ExtenderState {
    pub registry: AllocatorRegistry,
    pub records: Vec<AllocatorData>,
    /// Common-unit value currently delegated across all allocators
    pub total_value_allocated: U256,
    /// Emitted events not yet drained, in emission order
    pub events: Vec<ExtenderEvent>,
}

impl Default for ExtenderState {
    fn default() -> Self {
        Self {
            registry: AllocatorRegistry::default(),
            records: vec![AllocatorData::default()],
            total_value_allocated: U256::ZERO,
            events: vec![],
        }
    }
}

impl ExtenderState {
    pub fn record(&self, id: u64) -> Option<&AllocatorData> {
        self.registry.address_of(id)?;
        self.records.get(id as usize)
    }

    pub fn record_mut(&mut self, id: u64) -> Option<&mut AllocatorData> {
        self.registry.address_of(id)?;
        self.records.get_mut(id as usize)
    }

    pub fn emit(&mut self, event: ExtenderEvent) {
        self.events.push(event);
    }
}
