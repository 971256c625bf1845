use alloy_primitives::Bytes;
use alloy_sol_types::SolError;

use crate::AppId;

/// Errors returned by the [`Ledger`](crate::Ledger).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No application is registered under the id.
    #[error("application {0} does not exist")]
    UnknownApp(AppId),
    /// The contract rejected the call. No state was changed.
    #[error("transaction reverted in application {app_id}: {data:?}")]
    Reverted {
        /// Application that rejected the call.
        app_id: AppId,
        /// ABI-encoded revert data, empty for undecodable calldata.
        data: Bytes,
    },
    /// Return data did not decode as the expected type.
    #[error("failed to decode return data: {0}")]
    Decode(#[from] alloy_sol_types::Error),
}

impl Error {
    /// Returns the revert data if the call was rejected by the contract.
    #[must_use]
    pub fn revert_data(&self) -> Option<&Bytes> {
        match self {
            Error::Reverted { data, .. } => Some(data),
            _ => None,
        }
    }

    /// Checks that the call reverted with exactly the ABI encoding of
    /// `expected`.
    #[must_use]
    pub fn reverted_with<E: SolError>(&self, expected: &E) -> bool {
        self.revert_data()
            .is_some_and(|data| data.as_ref() == expected.abi_encode().as_slice())
    }
}
