//! One-shot initialization guard.
//!
//! Contracts deployed on the ledger have no native constructor. Instead, the
//! creation transaction calls an initializer method, and the method protects
//! itself with [`Initializable::initializer`], which only passes once and
//! only inside the creation transaction.
//!
//! The flag lives at a fixed, namespaced slot rather than in the contract's
//! sequential layout, so adding fields to a contract never moves it.
use alloc::vec::Vec;

use alloy_primitives::U256;
use alloy_sol_types::SolError;
pub use sol::*;

use crate::{
    host::{self, Host},
    storage::{StorageBool, StorageType},
};

/// `keccak256("rbac.storage.Initializable")`.
pub const INITIALIZABLE_SLOT: [u8; 32] = keccak_const::Keccak256::new()
    .update(b"rbac.storage.Initializable")
    .finalize();

/// Version reported by the [`Initialized`] event.
pub const INITIAL_VERSION: u64 = 1;

#[cfg_attr(coverage_nightly, coverage(off))]
mod sol {
    use alloy_sol_macro::sol;

    sol! {
        /// Emitted when the contract has been initialized.
        #[derive(Debug, PartialEq, Eq)]
        #[allow(missing_docs)]
        event Initialized(uint64 version);
    }

    sol! {
        /// The contract is already initialized, or the initializer ran
        /// outside the creation transaction.
        #[derive(Debug, PartialEq, Eq)]
        #[allow(missing_docs)]
        error InvalidInitialization();
    }
}

/// An error that occurred in the implementation of an [`Initializable`]
/// contract.
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// The initializer already ran, or the call is not the creation
    /// transaction.
    InvalidInitialization(InvalidInitialization),
}

impl From<Error> for Vec<u8> {
    fn from(err: Error) -> Self {
        match err {
            Error::InvalidInitialization(e) => SolError::abi_encode(&e),
        }
    }
}

/// State of an [`Initializable`] contract.
#[derive(Debug, Clone, Copy)]
pub struct Initializable {
    initialized: StorageBool,
}

impl Default for Initializable {
    fn default() -> Self {
        Self {
            initialized: StorageBool::new(U256::from_be_bytes(
                INITIALIZABLE_SLOT,
            )),
        }
    }
}

impl Initializable {
    /// Returns `true` once the initializer has run.
    #[must_use]
    pub fn is_initialized(&self, vm: &dyn Host) -> bool {
        self.initialized.get(vm)
    }

    /// Marks the contract as initialized.
    ///
    /// Must be the first thing an initializer method does, before it writes
    /// anything else.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `vm` - Host of the current call.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidInitialization`] - If the contract was already
    ///   initialized.
    /// * [`Error::InvalidInitialization`] - If `vm` is not executing the
    ///   creation transaction.
    ///
    /// # Events
    ///
    /// * [`Initialized`].
    pub fn initializer(&mut self, vm: &mut dyn Host) -> Result<(), Error> {
        if !vm.is_creation() || self.is_initialized(vm) {
            return Err(Error::InvalidInitialization(InvalidInitialization {}));
        }

        self.initialized.set(vm, true);
        host::log(vm, &Initialized { version: INITIAL_VERSION });
        Ok(())
    }
}
