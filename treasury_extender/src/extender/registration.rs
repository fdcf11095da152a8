//! Allocator registration and limits management

use std::rc::Rc;

use alloy_primitives::Address;

use crate::{
    allocator::data::AllocatorData,
    constants::SENTINEL_ID,
    events::ExtenderEvent,
    journal::{JournalEntry, LogType},
    ports::Allocator,
    types::{AllocatorLimits, AllocatorTarget},
    utils::error::{ExtenderError, ExtenderResult},
};

use super::TreasuryExtender;

impl TreasuryExtender {
    /// Registers `allocator` at the next id and hands the id back to it.
    ///
    /// Fails with `AlreadyRegistered` when the allocator already reports a
    /// non-zero id, or when its identity already occupies a slot.
    pub fn register_allocator(
        &self,
        caller: Address,
        allocator: Rc<dyn Allocator>,
    ) -> ExtenderResult<u64> {
        let address = allocator.address();
        let entry = JournalEntry::new(Ok(()), LogType::Registration)
            .caller(caller)
            .note(format!("Registering allocator {}.", address));

        self.atomic(entry, || {
            self.only_operator(&caller)?;

            let current_id = allocator.id();
            if current_id != SENTINEL_ID {
                return Err(ExtenderError::AlreadyRegistered(current_id));
            }

            let id = {
                let mut state = self.state.borrow_mut();
                let id = state.registry.insert(address, allocator.clone())?;
                state.records.push(AllocatorData::default());
                id
            };

            allocator.set_id(id);
            let token = allocator.token();

            self.emit(ExtenderEvent::NewAllocatorRegistered {
                allocator: address,
                token,
                id,
            });
            Ok(id)
        })
    }

    /// Replaces the limits of an offline allocator.
    pub fn set_allocator_limits<T: Into<AllocatorTarget>>(
        &self,
        caller: Address,
        target: T,
        limits: AllocatorLimits,
    ) -> ExtenderResult<()> {
        let target = target.into();
        let mut entry = JournalEntry::new(Ok(()), LogType::Limits)
            .caller(caller)
            .note(format!(
                "Setting limits: allocated {}, loss {}.",
                limits.allocated, limits.loss
            ));
        if let Some(id) = self.target_id(target) {
            entry = entry.allocator(id);
        }

        self.atomic(entry, || {
            self.only_operator(&caller)?;
            let (id, _, allocator) = self.resolve(target)?;

            if !allocator.status().is_offline() {
                return Err(ExtenderError::AllocatorActivated);
            }

            self.update_record(id, |record| {
                record.limits(limits);
                Ok(())
            })?;

            self.emit(ExtenderEvent::AllocatorLimitsChanged {
                id,
                allocation_limit: limits.allocated,
                loss_limit: limits.loss,
            });
            Ok(())
        })
    }
}
