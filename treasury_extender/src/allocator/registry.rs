//! Allocator registry
//!
//! Registered allocators are addressable by a sequential id. Slot 0 is a
//! permanent placeholder, so id 0 never resolves to a live allocator. A side
//! index maps each allocator identity back to its id.

use std::{collections::HashMap, rc::Rc};

use alloy_primitives::Address;

use crate::{
    constants::SENTINEL_ID,
    ports::Allocator,
    types::AllocatorTarget,
    utils::error::{ExtenderError, ExtenderResult},
};

#[derive(Clone)]
pub struct AllocatorRegistry {
    slots: Vec<Option<(Address, Rc<dyn Allocator>)>>,
    ids: HashMap<Address, u64>,
}

impl Default for AllocatorRegistry {
    fn default() -> Self {
        Self {
            slots: vec![None],
            ids: HashMap::new(),
        }
    }
}

impl AllocatorRegistry {
    /// Id the next registered allocator will receive
    pub fn next_id(&self) -> u64 {
        self.slots.len() as u64
    }

    /// Appends `allocator` under `address` at the next id.
    /// Fails if the identity already occupies a slot.
    pub fn insert(
        &mut self,
        address: Address,
        allocator: Rc<dyn Allocator>,
    ) -> ExtenderResult<u64> {
        if let Some(id) = self.ids.get(&address) {
            return Err(ExtenderError::AlreadyRegistered(*id));
        }

        let id = self.next_id();
        self.slots.push(Some((address, allocator)));
        self.ids.insert(address, id);
        Ok(id)
    }

    pub fn get(&self, id: u64) -> Option<Rc<dyn Allocator>> {
        if id == SENTINEL_ID {
            return None;
        }
        self.slots
            .get(id as usize)?
            .as_ref()
            .map(|(_, allocator)| allocator.clone())
    }

    /// Identity stored at `id`
    pub fn address_of(&self, id: u64) -> Option<Address> {
        if id == SENTINEL_ID {
            return None;
        }
        self.slots
            .get(id as usize)?
            .as_ref()
            .map(|(address, _)| *address)
    }

    pub fn id_of(&self, address: &Address) -> Option<u64> {
        self.ids.get(address).copied()
    }

    /// Resolves a target to its id, identity and allocator
    pub fn resolve(&self, target: AllocatorTarget) -> Option<(u64, Address, Rc<dyn Allocator>)> {
        let id = match target {
            AllocatorTarget::Id(id) => id,
            AllocatorTarget::Address(address) => self.id_of(&address)?,
        };
        let address = self.address_of(id)?;
        self.get(id).map(|allocator| (id, address, allocator))
    }

    /// Number of registered allocators, excluding the sentinel slot
    pub fn len(&self) -> usize {
        self.slots.len() - 1
    }

    /// Identities of the registered allocators in id order
    pub fn addresses(&self) -> Vec<Address> {
        self.slots
            .iter()
            .flatten()
            .map(|(address, _)| *address)
            .collect()
    }
}
