//! Typed handles over word-addressed contract storage.
//!
//! Layout follows Solidity: a component occupies consecutive slots starting
//! at its base slot, and the entry of a mapping at slot `s` for key `k` lives
//! at `keccak256(k ‖ s)`. Handles only carry a slot, so they are cheap to
//! create and copy; the value itself is always read through a [`Host`].
use core::marker::PhantomData;

use alloy_primitives::{keccak256, B256, U256};

use crate::host::Host;

/// A value that lives in storage starting at a base slot.
pub trait StorageType: Sized {
    /// Number of consecutive slots the type occupies.
    const REQUIRED_SLOTS: usize;

    /// Creates a handle rooted at `slot`.
    fn new(slot: U256) -> Self;
}

/// A type usable as a [`StorageMap`] key.
pub trait StorageKey {
    /// Returns the slot of the entry for `self` in a mapping rooted at
    /// `root`.
    fn to_slot(&self, root: U256) -> U256;
}

impl StorageKey for B256 {
    fn to_slot(&self, root: U256) -> U256 {
        let mut preimage = [0u8; 64];
        preimage[..32].copy_from_slice(self.as_slice());
        preimage[32..].copy_from_slice(&root.to_be_bytes::<32>());
        U256::from_be_bytes(keccak256(preimage).0)
    }
}

/// Converts a slot number into the key used by the host.
#[must_use]
pub fn slot_key(slot: U256) -> B256 {
    B256::new(slot.to_be_bytes::<32>())
}

/// Returns the slot `offset` positions after `slot`.
#[must_use]
pub fn offset(slot: U256, offset: usize) -> U256 {
    slot.wrapping_add(U256::from(offset))
}

/// A boolean stored in a full word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageBool {
    slot: U256,
}

impl StorageType for StorageBool {
    const REQUIRED_SLOTS: usize = 1;

    fn new(slot: U256) -> Self {
        Self { slot }
    }
}

impl StorageBool {
    /// Reads the flag.
    #[must_use]
    pub fn get(&self, vm: &dyn Host) -> bool {
        !vm.storage_load(slot_key(self.slot)).is_zero()
    }

    /// Writes the flag. `false` resets the slot to zero.
    pub fn set(&self, vm: &mut dyn Host, value: bool) {
        let word = if value { B256::with_last_byte(1) } else { B256::ZERO };
        vm.storage_store(slot_key(self.slot), word);
    }
}

/// A 32-byte word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageB256 {
    slot: U256,
}

impl StorageType for StorageB256 {
    const REQUIRED_SLOTS: usize = 1;

    fn new(slot: U256) -> Self {
        Self { slot }
    }
}

impl StorageB256 {
    /// Reads the word.
    #[must_use]
    pub fn get(&self, vm: &dyn Host) -> B256 {
        vm.storage_load(slot_key(self.slot))
    }

    /// Writes the word.
    pub fn set(&self, vm: &mut dyn Host, value: B256) {
        vm.storage_store(slot_key(self.slot), value);
    }
}

/// A total mapping from `K` to `V`.
///
/// Every key maps to some `V`: entries are never allocated, a key that was
/// never written simply reads back zeroed storage.
#[derive(Debug)]
pub struct StorageMap<K, V> {
    slot: U256,
    marker: PhantomData<fn(K) -> V>,
}

impl<K, V> Clone for StorageMap<K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for StorageMap<K, V> {}

impl<K, V> StorageType for StorageMap<K, V> {
    const REQUIRED_SLOTS: usize = 1;

    fn new(slot: U256) -> Self {
        Self { slot, marker: PhantomData }
    }
}

impl<K: StorageKey, V: StorageType> StorageMap<K, V> {
    /// Returns the handle of the entry for `key`.
    #[must_use]
    pub fn getter(&self, key: K) -> V {
        V::new(key.to_slot(self.slot))
    }
}
