//! Interface between contracts and the ledger that executes them.
//!
//! A contract never touches persistent state directly. Every read, write and
//! log goes through a [`Host`], which is handed to the contract for exactly
//! one call. The host decides what "persistent" means: the ledger backs it
//! with a transaction buffer that is committed or dropped as a whole, while
//! unit tests back it with a plain in-memory map.
use alloc::vec::Vec;

use alloy_primitives::{LogData, B256};

/// A 32-byte public key identifying an account.
pub type Account = B256;

/// Execution environment of a single contract call.
pub trait Host {
    /// Returns the account that signed the call being executed.
    ///
    /// The host authenticates this identity. Contracts must not accept a
    /// caller identity from any other source.
    fn msg_sender(&self) -> Account;

    /// Returns `true` while the host executes the transaction that creates
    /// the contract.
    fn is_creation(&self) -> bool;

    /// Reads the 32-byte word stored at `key`.
    ///
    /// Words that were never written read as [`B256::ZERO`].
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the host.
    /// * `key` - Storage slot to read.
    fn storage_load(&self, key: B256) -> B256;

    /// Writes `value` at `key`.
    ///
    /// Storing [`B256::ZERO`] is indistinguishable from never having written
    /// the slot.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the host.
    /// * `key` - Storage slot to write.
    /// * `value` - New word.
    fn storage_store(&mut self, key: B256, value: B256);

    /// Appends `log` to the logs of the current call.
    fn emit_log(&mut self, log: LogData);
}

/// Emits `event` through `vm`, encoded as topics and data.
pub fn log<E: alloy_sol_types::SolEvent>(vm: &mut dyn Host, event: &E) {
    vm.emit_log(event.encode_log_data());
}

/// Entry point of a deployable contract.
///
/// The ledger calls [`Entrypoint::route`] once per transaction with the raw
/// calldata. Implementations decode the selector, run the matching method
/// and encode the result.
pub trait Entrypoint {
    /// Routes `calldata` to a contract method.
    ///
    /// Returns the ABI-encoded return data on success and the ABI-encoded
    /// revert data on failure. Calldata that does not match any method
    /// reverts with empty data.
    ///
    /// # Arguments
    ///
    /// * `vm` - Host of the call.
    /// * `calldata` - Selector followed by ABI-encoded arguments.
    ///
    /// # Errors
    ///
    /// * Revert data of the failed method.
    fn route(vm: &mut dyn Host, calldata: &[u8]) -> Result<Vec<u8>, Vec<u8>>;
}
