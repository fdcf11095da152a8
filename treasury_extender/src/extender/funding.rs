//! Fund movements between the treasury and allocators

use alloy_primitives::{Address, U256};

use crate::{
    events::ExtenderEvent,
    journal::{JournalEntry, LogType},
    types::{AllocatorStatus, AllocatorTarget},
    utils::{
        common::checked_add,
        error::{ExtenderError, ExtenderResult},
    },
};

use super::{reconcile::reconcile_return, TreasuryExtender};

impl TreasuryExtender {
    /// Moves `amount` of the allocator's token from the treasury to the allocator.
    ///
    /// Requires the allocator to be `Activated` and the resulting holdings to
    /// stay within its allocation limit. The aggregate and the holdings are
    /// increased after the treasury releases the funds and before they are
    /// pushed to the allocator.
    pub fn request_funds<T: Into<AllocatorTarget>>(
        &self,
        caller: Address,
        target: T,
        amount: U256,
    ) -> ExtenderResult<()> {
        let target = target.into();
        let entry = self
            .entry(LogType::Funding, caller, target)
            .note(format!("Funding request of {}.", amount));

        self.atomic(entry, || {
            self.only_operator(&caller)?;
            let (id, address, allocator) = self.resolve(target)?;

            if allocator.status() != AllocatorStatus::Activated {
                return Err(ExtenderError::AllocatorOffline);
            }

            let record = self.record(id)?;
            let attempted = checked_add(record.holdings.allocated, amount, "Allocated holdings")?;
            if attempted > record.limits.allocated {
                return Err(ExtenderError::MaxAllocation(attempted, record.limits.allocated));
            }

            let token = allocator.token();
            let value = self.treasury.token_value(token, amount)?;
            self.treasury.manage(token, amount)?;

            self.update_total_value(|total| checked_add(total, value, "Total value allocated"))?;
            self.update_record(id, |record| {
                let allocated =
                    checked_add(record.holdings.allocated, amount, "Allocated holdings")?;
                if allocated > record.limits.allocated {
                    return Err(ExtenderError::MaxAllocation(
                        allocated,
                        record.limits.allocated,
                    ));
                }
                record.allocated(allocated);
                Ok(())
            })?;

            self.tokens.transfer(token, self.address(), address, amount)?;

            self.emit(ExtenderEvent::AllocatorFunded { id, amount, value });
            Ok(())
        })
    }

    /// Pulls up to `amount` of the allocator's token back into the treasury.
    ///
    /// Principal is returned first, then recorded gain; the transfer is capped
    /// at `allocated + gain`. The gain counter is only written back once the
    /// principal is fully returned.
    ///
    /// # Panics
    /// When the treasury rejects the deposit.
    pub fn return_funds<T: Into<AllocatorTarget>>(
        &self,
        caller: Address,
        target: T,
        amount: U256,
    ) -> ExtenderResult<()> {
        let target = target.into();
        let entry = self
            .entry(LogType::Withdrawal, caller, target)
            .note(format!("Return request of {}.", amount));

        self.atomic(entry, || {
            self.only_operator(&caller)?;
            let (id, address, allocator) = self.resolve(target)?;

            let record = self.record(id)?;
            let outcome = reconcile_return(
                amount,
                record.holdings.allocated,
                record.performance.gain,
            )?;
            self.update_record(id, |record| {
                record.allocated(outcome.allocated);
                if outcome.allocated.is_zero() {
                    record.gain(outcome.gain);
                }
                Ok(())
            })?;

            let token = allocator.token();
            let value = self.treasury.token_value(token, outcome.transferred)?;
            self.allow_treasury_withdrawal(token)?;
            self.tokens.transfer_from(
                token,
                self.address(),
                address,
                self.address(),
                outcome.transferred,
            )?;
            self.update_total_value(|total| Ok(total.saturating_sub(value)))?;

            self.deposit_to_treasury(token, outcome.transferred, value)?;

            self.emit(ExtenderEvent::AllocatorWithdrawal {
                id,
                amount: outcome.transferred,
                value,
            });
            Ok(())
        })
    }

    /// Sweeps up to `amount` of an incidental reward `token` from the allocator
    /// into the treasury. Holdings and performance are left untouched.
    ///
    /// # Panics
    /// When the treasury rejects the deposit.
    pub fn return_rewards<T: Into<AllocatorTarget>>(
        &self,
        caller: Address,
        target: T,
        token: Address,
        amount: U256,
    ) -> ExtenderResult<()> {
        let target = target.into();
        let entry = self
            .entry(LogType::Rewards, caller, target)
            .note(format!("Reward sweep of {} of token {}.", amount, token));

        self.atomic(entry, || {
            self.only_operator(&caller)?;
            let (id, address, _) = self.resolve(target)?;

            let balance = self.tokens.balance_of(token, address)?;
            let amount = amount.min(balance);

            let value = self.treasury.token_value(token, amount)?;
            self.allow_treasury_withdrawal(token)?;
            self.tokens
                .transfer_from(token, self.address(), address, self.address(), amount)?;

            self.deposit_to_treasury(token, amount, value)?;

            self.emit(ExtenderEvent::AllocatorRewardsWithdrawal { id, amount, value });
            Ok(())
        })
    }

    fn entry(&self, log_type: LogType, caller: Address, target: AllocatorTarget) -> JournalEntry {
        let entry = JournalEntry::new(Ok(()), log_type).caller(caller);
        match self.target_id(target) {
            Some(id) => entry.allocator(id),
            None => entry,
        }
    }
}
