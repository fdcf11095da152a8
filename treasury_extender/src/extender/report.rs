//! Performance reporting by allocators

use alloy_primitives::{Address, U256};

use crate::{
    journal::{JournalEntry, LogType},
    utils::{
        common::{checked_add, checked_sub},
        error::{ExtenderError, ExtenderResult},
    },
};

use super::{
    reconcile::{classify_report, reconcile_report},
    TreasuryExtender,
};

impl TreasuryExtender {
    /// Books a self-reported `gain` and `loss` for the allocator at `id`.
    ///
    /// Only the allocator stored at `id` may report, and only while it is not
    /// offline. Both amounts are added to the cumulative performance counters
    /// first; a report carrying both a gain and a loss is treated as a
    /// migration and writes off the whole outstanding principal. The record is
    /// settled before the treasury is asked to value the gain or the loss.
    pub fn report(&self, caller: Address, id: u64, gain: U256, loss: U256) -> ExtenderResult<()> {
        let entry = JournalEntry::new(Ok(()), LogType::Report)
            .caller(caller)
            .allocator(id)
            .note(format!("Report of gain {} and loss {}.", gain, loss));

        self.atomic(entry, || {
            let (allocator, address) = {
                let state = self.state.borrow();
                (state.registry.get(id), state.registry.address_of(id))
            };
            let allocator = match (allocator, address) {
                (Some(allocator), Some(address)) if address == caller => allocator,
                _ => return Err(ExtenderError::OnlyAllocator(id, caller)),
            };

            if allocator.status().is_offline() {
                return Err(ExtenderError::AllocatorOffline);
            }

            let reconciliation = self.update_record(id, |record| {
                let total_gain = checked_add(record.performance.gain, gain, "Cumulative gain")?;
                let total_loss = checked_add(record.performance.loss, loss, "Cumulative loss")?;
                let outcome = reconcile_report(gain, loss, record.holdings.allocated);
                let allocated = checked_sub(
                    record.holdings.allocated,
                    outcome.working_loss,
                    "Allocated holdings",
                )?;

                record.gain(total_gain).loss(total_loss).allocated(allocated);
                Ok(outcome)
            })?;

            let token = allocator.token();
            if reconciliation.credits_gain {
                let value = self.treasury.token_value(token, gain)?;
                self.update_total_value(|total| {
                    checked_add(total, value, "Total value allocated")
                })?;
            }
            if !reconciliation.working_loss.is_zero() {
                let value = self
                    .treasury
                    .token_value(token, reconciliation.working_loss)?;
                self.update_total_value(|total| Ok(total.saturating_sub(value)))?;
            }

            self.emit(classify_report(id, gain, reconciliation.working_loss));
            Ok(())
        })
    }
}
