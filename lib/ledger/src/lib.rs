//! In-process ledger that hosts contract applications.
//!
//! Each application owns a word-addressed storage map. A call against an
//! application runs as one transaction: the contract reads and writes through
//! a [`Transaction`] buffer layered over committed storage, and the ledger
//! applies the buffer only when the contract returns successfully. A revert
//! leaves storage and logs exactly as they were before the call.
use std::{collections::BTreeMap, fmt};

use alloy_primitives::{Bytes, B256};
use alloy_sol_types::{SolCall, SolType, SolValue};
use rbac_contracts::host::{Account, Entrypoint, Host};
use tracing::{debug, info};

mod error;
mod receipt;
mod transaction;

pub use error::Error;
pub use receipt::Receipt;
pub use transaction::Transaction;

/// Identifier of a deployed application. Ids start at `1` and are never
/// reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AppId(u64);

impl AppId {
    /// Returns the numeric id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

type Route = fn(&mut dyn Host, &[u8]) -> Result<Vec<u8>, Vec<u8>>;

struct Application {
    creator: Account,
    route: Route,
    storage: BTreeMap<B256, B256>,
}

/// Registry of deployed applications and their committed storage.
#[derive(Default)]
pub struct Ledger {
    apps: BTreeMap<AppId, Application>,
    last_app_id: u64,
}

impl fmt::Debug for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ledger")
            .field("apps", &self.apps.len())
            .field("last_app_id", &self.last_app_id)
            .finish()
    }
}

impl Ledger {
    /// Deploys contract `C` signed by `creator` and runs `init_calldata` as
    /// its creation transaction.
    ///
    /// The application is registered only if the creation transaction
    /// succeeds; a failed deployment consumes no id.
    ///
    /// # Errors
    ///
    /// * [`Error::Reverted`] - If the creation transaction reverted.
    pub fn deploy<C: Entrypoint>(
        &mut self,
        creator: Account,
        init_calldata: &[u8],
    ) -> Result<Receipt, Error> {
        let app_id = AppId(self.last_app_id + 1);
        let mut app =
            Application { creator, route: C::route, storage: BTreeMap::new() };

        let receipt = execute(
            app_id,
            &mut app.storage,
            app.route,
            Caller::Creator(creator),
            init_calldata,
        )?;

        self.last_app_id = app_id.0;
        self.apps.insert(app_id, app);
        info!(%app_id, %creator, "deployed application");
        Ok(receipt)
    }

    /// Executes `calldata` against `app_id` as a transaction signed by
    /// `sender`.
    ///
    /// # Errors
    ///
    /// * [`Error::UnknownApp`] - If no application is registered under
    ///   `app_id`.
    /// * [`Error::Reverted`] - If the contract rejected the call. Storage is
    ///   left untouched.
    pub fn send(
        &mut self,
        app_id: AppId,
        sender: Account,
        calldata: &[u8],
    ) -> Result<Receipt, Error> {
        let app = self.apps.get_mut(&app_id).ok_or(Error::UnknownApp(app_id))?;
        execute(
            app_id,
            &mut app.storage,
            app.route,
            Caller::Account(sender),
            calldata,
        )
    }

    /// Executes `calldata` against `app_id` and discards every effect.
    ///
    /// # Errors
    ///
    /// * [`Error::UnknownApp`] - If no application is registered under
    ///   `app_id`.
    /// * [`Error::Reverted`] - If the contract rejected the call.
    pub fn call(
        &self,
        app_id: AppId,
        sender: Account,
        calldata: &[u8],
    ) -> Result<Bytes, Error> {
        let app = self.apps.get(&app_id).ok_or(Error::UnknownApp(app_id))?;
        let mut tx = Transaction::new(&app.storage, sender);
        (app.route)(&mut tx, calldata)
            .map(Bytes::from)
            .map_err(|data| Error::Reverted { app_id, data: data.into() })
    }

    /// ABI-encodes `call` and [sends](Self::send) it.
    ///
    /// # Errors
    ///
    /// See [`Ledger::send`].
    pub fn send_call<C: SolCall>(
        &mut self,
        app_id: AppId,
        sender: Account,
        call: &C,
    ) -> Result<Receipt, Error> {
        self.send(app_id, sender, &call.abi_encode())
    }

    /// ABI-encodes `call`, [simulates](Self::call) it and decodes the return
    /// data as `R`.
    ///
    /// # Errors
    ///
    /// * [`Error::Decode`] - If the return data is not a valid encoding of
    ///   `R`.
    /// * See [`Ledger::call`] for the rest.
    pub fn view<C, R>(
        &self,
        app_id: AppId,
        sender: Account,
        call: &C,
    ) -> Result<R, Error>
    where
        C: SolCall,
        R: SolValue + From<<R::SolType as SolType>::RustType>,
    {
        let output = self.call(app_id, sender, &call.abi_encode())?;
        Ok(R::abi_decode(&output)?)
    }

    /// Returns the committed storage of `app_id`.
    #[must_use]
    pub fn storage(&self, app_id: AppId) -> Option<&BTreeMap<B256, B256>> {
        self.apps.get(&app_id).map(|app| &app.storage)
    }

    /// Returns the account that deployed `app_id`.
    #[must_use]
    pub fn creator(&self, app_id: AppId) -> Option<Account> {
        self.apps.get(&app_id).map(|app| app.creator)
    }

    /// Returns the ids of all deployed applications in deployment order.
    pub fn app_ids(&self) -> impl Iterator<Item = AppId> + '_ {
        self.apps.keys().copied()
    }
}

/// Signer of a transaction.
#[derive(Debug, Clone, Copy)]
enum Caller {
    /// Deployer running the creation transaction.
    Creator(Account),
    /// Any account calling a deployed application.
    Account(Account),
}

fn execute(
    app_id: AppId,
    storage: &mut BTreeMap<B256, B256>,
    route: Route,
    caller: Caller,
    calldata: &[u8],
) -> Result<Receipt, Error> {
    let (mut tx, sender) = match caller {
        Caller::Creator(creator) => {
            (Transaction::creation(&*storage, creator), creator)
        }
        Caller::Account(sender) => {
            (Transaction::new(&*storage, sender), sender)
        }
    };
    match route(&mut tx, calldata) {
        Ok(output) => {
            let (writes, logs) = tx.into_parts();
            debug!(
                %app_id,
                %sender,
                writes = writes.len(),
                logs = logs.len(),
                "committing transaction"
            );
            transaction::commit(storage, writes);
            Ok(Receipt {
                app_id,
                sender,
                return_data: output.into(),
                logs,
            })
        }
        Err(data) => {
            debug!(
                %app_id,
                %sender,
                discarded = tx.pending_writes(),
                "transaction reverted, rolling back"
            );
            Err(Error::Reverted { app_id, data: data.into() })
        }
    }
}
