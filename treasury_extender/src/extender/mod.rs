//! The allocation ledger.
//!
//! `TreasuryExtender` tracks how much of the treasury's value is delegated to
//! registered allocators and moves funds between the treasury and them. Every
//! mutating operation is all-or-nothing: it runs under the ledger lock against
//! a snapshot of the state, which is restored if the operation fails, and it
//! commits exactly one journal entry describing the outcome.

pub(crate) mod funding;
pub(crate) mod reconcile;
pub(crate) mod registration;
pub(crate) mod report;
pub(crate) mod views;

use std::{cell::RefCell, rc::Rc};

use alloy_primitives::{Address, U256};

use crate::{
    allocator::{
        data::AllocatorData,
        lock::{Lock, LockGuard},
    },
    config::ExtenderConfig,
    constants::{deposit_accepted, max_approval},
    events::ExtenderEvent,
    journal::{Journal, JournalEntry, LogType},
    ports::{Allocator, Erc20, Treasury},
    state::ExtenderState,
    types::AllocatorTarget,
    utils::error::{ExtenderError, ExtenderResult},
};

pub struct TreasuryExtender {
    config: ExtenderConfig,
    treasury: Rc<dyn Treasury>,
    tokens: Rc<dyn Erc20>,
    state: RefCell<ExtenderState>,
    lock: RefCell<Lock>,
    journal: RefCell<Journal>,
}

impl TreasuryExtender {
    pub fn new(config: ExtenderConfig, treasury: Rc<dyn Treasury>, tokens: Rc<dyn Erc20>) -> Self {
        let mut journal = Journal::with_capacity(config.journal_capacity as usize);
        journal.commit(
            JournalEntry::new(Ok(()), LogType::Info)
                .caller(config.extender)
                .note(format!(
                    "Ledger initialized with {} operator(s), re-entrancy guard {}.",
                    config.operators.len(),
                    if config.reentrancy_guard { "on" } else { "off" }
                )),
        );
        Self {
            config,
            treasury,
            tokens,
            state: RefCell::new(ExtenderState::default()),
            lock: RefCell::new(Lock::default()),
            journal: RefCell::new(journal),
        }
    }

    /// Address the ledger holds tokens as
    pub fn address(&self) -> Address {
        self.config.extender
    }

    pub fn config(&self) -> &ExtenderConfig {
        &self.config
    }

    /// Returns Err if the `caller` does not hold the operator role
    fn only_operator(&self, caller: &Address) -> ExtenderResult<()> {
        if !self.config.is_operator(caller) {
            return Err(ExtenderError::Unauthorized);
        }
        Ok(())
    }

    /// Resolves a target to a registered allocator
    fn resolve(
        &self,
        target: AllocatorTarget,
    ) -> ExtenderResult<(u64, Address, Rc<dyn Allocator>)> {
        self.state
            .borrow()
            .registry
            .resolve(target)
            .ok_or(ExtenderError::NonExistentValue)
    }

    /// Id a target refers to, if it is registered. Never calls a port.
    fn target_id(&self, target: AllocatorTarget) -> Option<u64> {
        let state = self.state.borrow();
        match target {
            AllocatorTarget::Id(id) => state.registry.address_of(id).map(|_| id),
            AllocatorTarget::Address(address) => state.registry.id_of(&address),
        }
    }

    /// Copy of the record stored for `id`
    fn record(&self, id: u64) -> ExtenderResult<AllocatorData> {
        self.state
            .borrow()
            .record(id)
            .copied()
            .ok_or(ExtenderError::NonExistentValue)
    }

    /// Applies `change` to the record currently stored for `id`
    fn update_record<R, F>(&self, id: u64, change: F) -> ExtenderResult<R>
    where
        F: FnOnce(&mut AllocatorData) -> ExtenderResult<R>,
    {
        let mut state = self.state.borrow_mut();
        let record = state.record_mut(id).ok_or(ExtenderError::NonExistentValue)?;
        change(record)
    }

    /// Replaces the aggregate value with `update(current)`
    fn update_total_value<F>(&self, update: F) -> ExtenderResult<()>
    where
        F: FnOnce(U256) -> ExtenderResult<U256>,
    {
        let mut state = self.state.borrow_mut();
        state.total_value_allocated = update(state.total_value_allocated)?;
        Ok(())
    }

    fn emit(&self, event: ExtenderEvent) {
        self.state.borrow_mut().emit(event);
    }

    /// Approves the treasury to pull `token` from the ledger, once, to the maximum
    fn allow_treasury_withdrawal(&self, token: Address) -> ExtenderResult<()> {
        let treasury = self.treasury.address();
        let allowance = self.tokens.allowance(token, self.address(), treasury)?;
        if allowance.is_zero() {
            self.tokens
                .approve(token, self.address(), treasury, max_approval())?;
        }
        Ok(())
    }

    /// Deposits `amount` of `token` with its declared `value` into the treasury.
    ///
    /// # Panics
    /// When the treasury answers with a non-accepted status: its own accounting
    /// is broken and the ledger cannot continue safely. If the panic is caught,
    /// the call's state changes are already undone and it is journaled as `Unwound`.
    fn deposit_to_treasury(&self, token: Address, amount: U256, value: U256) -> ExtenderResult<()> {
        let status = self.treasury.deposit(amount, token, value)?;
        assert!(
            status == deposit_accepted(),
            "treasury rejected the deposit of {} of token {} valued at {} with status {}",
            amount,
            token,
            value,
            status
        );
        Ok(())
    }

    /// Runs `operation` under the ledger lock and commits `entry` with its outcome.
    /// On failure the state is restored to what it was before the call.
    fn atomic<T, F>(&self, entry: JournalEntry, operation: F) -> ExtenderResult<T>
    where
        F: FnOnce() -> ExtenderResult<T>,
    {
        let mut call = AtomicCall {
            extender: self,
            snapshot: None,
            entry: Some(entry),
        };
        let result = call.run(operation);
        call.commit(&result);
        result
    }
}

/// One mutating call in flight. If the call unwinds, dropping it restores the
/// snapshot and journals the call as `Unwound`.
struct AtomicCall<'a> {
    extender: &'a TreasuryExtender,
    snapshot: Option<ExtenderState>,
    entry: Option<JournalEntry>,
}

impl AtomicCall<'_> {
    fn run<T, F>(&mut self, operation: F) -> ExtenderResult<T>
    where
        F: FnOnce() -> ExtenderResult<T>,
    {
        let _guard = LockGuard::acquire(
            &self.extender.lock,
            self.extender.config.reentrancy_guard,
        )?;
        self.snapshot = Some(self.extender.state.borrow().clone());

        let result = operation();
        if let Some(snapshot) = self.snapshot.take() {
            if result.is_err() {
                *self.extender.state.borrow_mut() = snapshot;
            }
        }
        result
    }

    fn commit<T>(&mut self, result: &ExtenderResult<T>) {
        if let Some(mut entry) = self.entry.take() {
            entry.entry = result.as_ref().map(|_| ()).map_err(Clone::clone);
            self.extender.journal.borrow_mut().commit(entry);
        }
    }
}

impl Drop for AtomicCall<'_> {
    fn drop(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            if let Ok(mut state) = self.extender.state.try_borrow_mut() {
                *state = snapshot;
            }
        }
        if let Some(mut entry) = self.entry.take() {
            if let Ok(mut journal) = self.extender.journal.try_borrow_mut() {
                entry.entry = Err(ExtenderError::Unwound);
                journal.commit(entry);
            }
        }
    }
}
