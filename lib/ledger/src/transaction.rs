//! Write buffer of a single transaction.
use std::collections::BTreeMap;

use alloy_primitives::{LogData, B256};
use rbac_contracts::host::{Account, Host};

/// [`Host`] of one contract call.
///
/// Reads see the transaction's own writes first and fall back to committed
/// storage. Nothing reaches committed storage until the ledger takes the
/// buffer back with [`Transaction::into_parts`]; dropping the transaction
/// discards every write and log.
#[derive(Debug)]
pub struct Transaction<'a> {
    committed: &'a BTreeMap<B256, B256>,
    writes: BTreeMap<B256, B256>,
    logs: Vec<LogData>,
    sender: Account,
    creation: bool,
}

impl<'a> Transaction<'a> {
    /// Opens a transaction signed by `sender` over `committed`.
    #[must_use]
    pub fn new(committed: &'a BTreeMap<B256, B256>, sender: Account) -> Self {
        Self {
            committed,
            writes: BTreeMap::new(),
            logs: Vec::new(),
            sender,
            creation: false,
        }
    }

    /// Opens the creation transaction of an application.
    #[must_use]
    pub fn creation(
        committed: &'a BTreeMap<B256, B256>,
        sender: Account,
    ) -> Self {
        Self { creation: true, ..Self::new(committed, sender) }
    }

    /// Number of buffered writes, zero writes included.
    #[must_use]
    pub fn pending_writes(&self) -> usize {
        self.writes.len()
    }

    /// Closes the transaction and returns its buffered writes and logs.
    #[must_use]
    pub fn into_parts(self) -> (BTreeMap<B256, B256>, Vec<LogData>) {
        (self.writes, self.logs)
    }
}

impl Host for Transaction<'_> {
    fn msg_sender(&self) -> Account {
        self.sender
    }

    fn is_creation(&self) -> bool {
        self.creation
    }

    fn storage_load(&self, key: B256) -> B256 {
        self.writes
            .get(&key)
            .or_else(|| self.committed.get(&key))
            .copied()
            .unwrap_or_default()
    }

    fn storage_store(&mut self, key: B256, value: B256) {
        // Zero words stay in the buffer so they shadow committed values.
        self.writes.insert(key, value);
    }

    fn emit_log(&mut self, log: LogData) {
        self.logs.push(log);
    }
}

/// Applies `writes` to `storage`. Zero words delete their key.
pub(crate) fn commit(
    storage: &mut BTreeMap<B256, B256>,
    writes: BTreeMap<B256, B256>,
) {
    for (key, value) in writes {
        if value.is_zero() {
            storage.remove(&key);
        } else {
            storage.insert(key, value);
        }
    }
}
