//! In-memory fakes of the treasury, token ledger and allocators for tests.

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    rc::Rc,
};

use alloy_primitives::{Address, U256};

use crate::{
    config::ExtenderConfig,
    extender::TreasuryExtender,
    ports::{Allocator, Erc20, Treasury},
    types::{AllocatorLimits, AllocatorStatus},
    utils::error::{ExtenderError, ExtenderResult},
};

pub const OPERATOR: Address = Address::repeat_byte(0x01);
pub const STRANGER: Address = Address::repeat_byte(0x02);
pub const EXTENDER: Address = Address::repeat_byte(0x0e);
pub const TREASURY: Address = Address::repeat_byte(0x0f);
pub const TOKEN: Address = Address::repeat_byte(0x70);
pub const REWARD: Address = Address::repeat_byte(0x72);

pub const RESERVE: u64 = 1_000_000;
pub const DEFAULT_PRICE: u64 = 2;
pub const LOSS_LIMIT: u64 = 50;

/// Balances and allowances for any number of tokens
#[derive(Default)]
pub struct TokenBook {
    balances: RefCell<HashMap<(Address, Address), U256>>,
    allowances: RefCell<HashMap<(Address, Address, Address), U256>>,
    approvals: Cell<usize>,
}

impl TokenBook {
    pub fn mint(&self, token: Address, owner: Address, amount: U256) {
        *self
            .balances
            .borrow_mut()
            .entry((token, owner))
            .or_default() += amount;
    }

    pub fn balance(&self, token: Address, owner: Address) -> U256 {
        self.balances
            .borrow()
            .get(&(token, owner))
            .copied()
            .unwrap_or_default()
    }

    pub fn allowance_of(&self, token: Address, owner: Address, spender: Address) -> U256 {
        self.allowances
            .borrow()
            .get(&(token, owner, spender))
            .copied()
            .unwrap_or_default()
    }

    /// Number of `approve` calls seen
    pub fn approvals(&self) -> usize {
        self.approvals.get()
    }

    fn debit(&self, token: Address, owner: Address, amount: U256) -> ExtenderResult<()> {
        let balance = self.balance(token, owner);
        let remaining = balance.checked_sub(amount).ok_or(ExtenderError::CallResult(
            token,
            "transfer amount exceeds balance".to_string(),
        ))?;
        self.balances.borrow_mut().insert((token, owner), remaining);
        Ok(())
    }
}

impl Erc20 for TokenBook {
    fn balance_of(&self, token: Address, owner: Address) -> ExtenderResult<U256> {
        Ok(self.balance(token, owner))
    }

    fn allowance(&self, token: Address, owner: Address, spender: Address) -> ExtenderResult<U256> {
        Ok(self.allowance_of(token, owner, spender))
    }

    fn approve(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
        amount: U256,
    ) -> ExtenderResult<()> {
        self.approvals.set(self.approvals.get() + 1);
        self.allowances
            .borrow_mut()
            .insert((token, owner, spender), amount);
        Ok(())
    }

    fn transfer(
        &self,
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> ExtenderResult<()> {
        self.debit(token, from, amount)?;
        self.mint(token, to, amount);
        Ok(())
    }

    fn transfer_from(
        &self,
        token: Address,
        spender: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> ExtenderResult<()> {
        let allowance = self.allowance_of(token, from, spender);
        if allowance < amount {
            return Err(ExtenderError::CallResult(
                token,
                "insufficient allowance".to_string(),
            ));
        }
        if allowance != U256::MAX {
            self.allowances
                .borrow_mut()
                .insert((token, from, spender), allowance - amount);
        }
        self.transfer(token, from, to, amount)
    }
}

/// Treasury pricing every token at a flat multiple of its amount
pub struct FakeTreasury {
    tokens: Rc<TokenBook>,
    price: Cell<u64>,
    deposit_status: Cell<u64>,
    deposits: RefCell<Vec<(U256, Address, U256)>>,
}

impl FakeTreasury {
    pub fn new(tokens: Rc<TokenBook>) -> Self {
        Self {
            tokens,
            price: Cell::new(DEFAULT_PRICE),
            deposit_status: Cell::new(0),
            deposits: RefCell::new(vec![]),
        }
    }

    pub fn value_of(&self, amount: U256) -> U256 {
        amount * U256::from(self.price.get())
    }

    pub fn set_price(&self, price: u64) {
        self.price.set(price);
    }

    pub fn set_deposit_status(&self, status: u64) {
        self.deposit_status.set(status);
    }

    /// Accepted deposits as (amount, token, value)
    pub fn deposits(&self) -> Vec<(U256, Address, U256)> {
        self.deposits.borrow().clone()
    }
}

impl Treasury for FakeTreasury {
    fn address(&self) -> Address {
        TREASURY
    }

    fn token_value(&self, _token: Address, amount: U256) -> ExtenderResult<U256> {
        Ok(self.value_of(amount))
    }

    fn manage(&self, token: Address, amount: U256) -> ExtenderResult<()> {
        self.tokens.transfer(token, TREASURY, EXTENDER, amount)
    }

    fn deposit(&self, amount: U256, token: Address, value: U256) -> ExtenderResult<U256> {
        self.tokens
            .transfer_from(token, TREASURY, EXTENDER, TREASURY, amount)?;
        self.deposits.borrow_mut().push((amount, token, value));
        Ok(U256::from(self.deposit_status.get()))
    }
}

/// Allocator whose status is driven by the test
pub struct FakeAllocator {
    address: Address,
    token: Address,
    status: Cell<AllocatorStatus>,
    id: Cell<u64>,
}

impl FakeAllocator {
    pub fn new(byte: u8, token: Address) -> Rc<Self> {
        Rc::new(Self {
            address: Address::repeat_byte(byte),
            token,
            status: Cell::new(AllocatorStatus::Offline),
            id: Cell::new(0),
        })
    }

    pub fn set_status(&self, status: AllocatorStatus) {
        self.status.set(status);
    }
}

impl Allocator for FakeAllocator {
    fn address(&self) -> Address {
        self.address
    }

    fn status(&self) -> AllocatorStatus {
        self.status.get()
    }

    fn token(&self) -> Address {
        self.token
    }

    fn id(&self) -> u64 {
        self.id.get()
    }

    fn set_id(&self, id: u64) {
        self.id.set(id);
    }
}

pub struct Fixture {
    pub extender: Rc<TreasuryExtender>,
    pub treasury: Rc<FakeTreasury>,
    pub tokens: Rc<TokenBook>,
}

impl Fixture {
    pub fn new() -> Self {
        let mut config = ExtenderConfig::default();
        config.extender(EXTENDER).operator(OPERATOR);
        Self::with_config(config)
    }

    pub fn with_config(config: ExtenderConfig) -> Self {
        let tokens = Rc::new(TokenBook::default());
        tokens.mint(TOKEN, TREASURY, U256::from(RESERVE));
        let treasury = Rc::new(FakeTreasury::new(tokens.clone()));
        let extender = Rc::new(TreasuryExtender::new(
            config,
            treasury.clone(),
            tokens.clone(),
        ));

        Self {
            extender,
            treasury,
            tokens,
        }
    }

    /// Registers an allocator, limits it, activates it and funds it with `amount`
    pub fn funded_allocator(&self, byte: u8, limit: u64, amount: u64) -> (Rc<FakeAllocator>, u64) {
        let allocator = FakeAllocator::new(byte, TOKEN);
        let id = self
            .extender
            .register_allocator(OPERATOR, allocator.clone())
            .unwrap();
        self.extender
            .set_allocator_limits(
                OPERATOR,
                id,
                AllocatorLimits {
                    allocated: U256::from(limit),
                    loss: U256::from(LOSS_LIMIT),
                },
            )
            .unwrap();
        self.tokens
            .approve(TOKEN, allocator.address(), EXTENDER, U256::MAX)
            .unwrap();
        allocator.set_status(AllocatorStatus::Activated);

        if amount > 0 {
            self.extender
                .request_funds(OPERATOR, id, U256::from(amount))
                .unwrap();
        }
        (allocator, id)
    }

    /// Simulates `amount` of yield on the allocator and reports it
    pub fn with_gain(&self, allocator: &FakeAllocator, id: u64, amount: u64) {
        self.tokens
            .mint(TOKEN, allocator.address(), U256::from(amount));
        self.extender
            .report(allocator.address(), id, U256::from(amount), U256::ZERO)
            .unwrap();
    }
}
