//! Unit-testing utilities for contracts.
use alloc::{collections::BTreeMap, vec::Vec};

use alloy_primitives::{LogData, B256};
use alloy_sol_types::SolEvent;

use crate::host::{Account, Host};

/// In-memory [`Host`] for unit tests.
///
/// Storage is a plain map that is never rolled back, the caller can be
/// switched between calls with [`TestVm::sender`], and every emitted log is
/// kept until [`TestVm::clear_logs`].
#[derive(Debug, Default)]
pub(crate) struct TestVm {
    sender: Account,
    creation: bool,
    storage: BTreeMap<B256, B256>,
    logs: Vec<LogData>,
}

impl TestVm {
    /// Sets the caller of the next calls and returns the host, so a test can
    /// write `contract.grant_role(vm.sender(alice), ...)`.
    pub(crate) fn sender(&mut self, account: Account) -> &mut Self {
        self.sender = account;
        self
    }

    /// Marks the next calls as running inside (or outside) the creation
    /// transaction.
    pub(crate) fn creation(&mut self, creation: bool) -> &mut Self {
        self.creation = creation;
        self
    }

    /// Logs emitted so far.
    pub(crate) fn logs(&self) -> &[LogData] {
        &self.logs
    }

    /// Removes all emitted logs.
    pub(crate) fn clear_logs(&mut self) {
        self.logs.clear();
    }

    /// Returns `true` if `expected` was emitted.
    pub(crate) fn emits<E: SolEvent>(&self, expected: &E) -> bool {
        let expected = expected.encode_log_data();
        self.logs.iter().rev().any(|log| *log == expected)
    }

    /// Number of non-zero storage words.
    pub(crate) fn storage_len(&self) -> usize {
        self.storage.len()
    }

    /// Copy of the whole storage.
    pub(crate) fn storage_snapshot(&self) -> BTreeMap<B256, B256> {
        self.storage.clone()
    }
}

impl Host for TestVm {
    fn msg_sender(&self) -> Account {
        self.sender
    }

    fn is_creation(&self) -> bool {
        self.creation
    }

    fn storage_load(&self, key: B256) -> B256 {
        self.storage.get(&key).copied().unwrap_or_default()
    }

    fn storage_store(&mut self, key: B256, value: B256) {
        if value.is_zero() {
            self.storage.remove(&key);
        } else {
            self.storage.insert(key, value);
        }
    }

    fn emit_log(&mut self, log: LogData) {
        self.logs.push(log);
    }
}
