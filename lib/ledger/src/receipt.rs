//! Outcome of a committed transaction.
use alloy_primitives::{Bytes, LogData};
use alloy_sol_types::{SolEvent, SolType, SolValue};
use rbac_contracts::host::Account;

use crate::{AppId, Error};

/// Receipt of a committed transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// Application that executed the call.
    pub app_id: AppId,
    /// Account that signed the call.
    pub sender: Account,
    /// ABI-encoded return data.
    pub return_data: Bytes,
    /// Logs emitted by the call, in emission order.
    pub logs: Vec<LogData>,
}

impl Receipt {
    /// Returns `true` if the transaction emitted `expected`.
    #[must_use]
    pub fn emits<E: SolEvent>(&self, expected: &E) -> bool {
        let expected = expected.encode_log_data();
        self.logs.iter().any(|log| *log == expected)
    }

    /// Decodes the return data as `R`.
    ///
    /// # Errors
    ///
    /// * [`Error::Decode`] - If the return data is not a valid encoding of
    ///   `R`.
    pub fn decode_return<R>(&self) -> Result<R, Error>
    where
        R: SolValue + From<<R::SolType as SolType>::RustType>,
    {
        Ok(R::abi_decode(&self.return_data)?)
    }
}
