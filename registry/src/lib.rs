/*!
# Role registry

A deployable contract that owns role membership and the role admin
hierarchy of a ledger application.

The registry is [`AccessControl`] exposed through the ABI in [`abi`], plus a
one-time [`IRoleRegistry::initializeCall`] that makes the deployer the first
holder of [`AccessControl::DEFAULT_ADMIN_ROLE`]. Every call is a single
check-then-write against the host: to change who holds role `R`, the caller
must hold `R`'s admin role; to change `R`'s admin role, the caller must hold
the default admin role.

```ignore
use ledger::Ledger;
use role_registry::{abi::IRoleRegistry, RoleRegistry};

let mut ledger = Ledger::default();
let receipt = ledger.deploy::<RoleRegistry>(
    deployer,
    &IRoleRegistry::initializeCall {}.abi_encode(),
)?;
let app = receipt.app_id;

ledger.send_call(app, deployer, &IRoleRegistry::grantRoleCall { role, account })?;
```
*/

#![allow(clippy::module_name_repetitions)]
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(rustdoc::broken_intra_doc_links)]
extern crate alloc;

use alloc::vec::Vec;

use abi::IRoleRegistry::{self, IRoleRegistryCalls};
use alloy_primitives::{aliases::B32, U256};
use alloy_sol_types::{SolCall, SolError, SolInterface, SolValue};
use rbac_contracts::{
    access::{
        control::{
            self, AccessControlBadConfirmation,
            AccessControlUnauthorizedAccount,
        },
        AccessControl, RoleId,
    },
    host::{Account, Entrypoint, Host},
    storage::StorageType,
    utils::{
        initializable::{self, Initializable, InvalidInitialization},
        introspection::erc165::{self, IErc165},
    },
};

pub mod abi;

/// Interface id of the access-control function set: `hasRole`,
/// `getRoleAdmin`, `grantRole`, `revokeRole` and `renounceRole`.
pub const ACCESS_CONTROL_INTERFACE_ID: B32 = erc165::interface_id(&[
    IRoleRegistry::hasRoleCall::SELECTOR,
    IRoleRegistry::getRoleAdminCall::SELECTOR,
    IRoleRegistry::grantRoleCall::SELECTOR,
    IRoleRegistry::revokeRoleCall::SELECTOR,
    IRoleRegistry::renounceRoleCall::SELECTOR,
]);

/// An error that occurred in the implementation of a [`RoleRegistry`]
/// contract.
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// The caller is missing the role required to perform the mutation.
    Unauthorized(AccessControlUnauthorizedAccount),
    /// A caller tried to renounce a role on behalf of another account.
    InvalidArgument(AccessControlBadConfirmation),
    /// The registry was already initialized.
    InvalidInitialization(InvalidInitialization),
}

impl From<control::Error> for Error {
    fn from(err: control::Error) -> Self {
        match err {
            control::Error::Unauthorized(e) => Error::Unauthorized(e),
            control::Error::InvalidArgument(e) => Error::InvalidArgument(e),
        }
    }
}

impl From<initializable::Error> for Error {
    fn from(err: initializable::Error) -> Self {
        match err {
            initializable::Error::InvalidInitialization(e) => {
                Error::InvalidInitialization(e)
            }
        }
    }
}

impl From<Error> for Vec<u8> {
    fn from(err: Error) -> Self {
        match err {
            Error::Unauthorized(e) => SolError::abi_encode(&e),
            Error::InvalidArgument(e) => SolError::abi_encode(&e),
            Error::InvalidInitialization(e) => SolError::abi_encode(&e),
        }
    }
}

/// State of a [`RoleRegistry`] contract, bound to the host of one call.
pub struct RoleRegistry<'a> {
    vm: &'a mut dyn Host,
    access: AccessControl,
    initializable: Initializable,
}

impl<'a> RoleRegistry<'a> {
    /// Binds the registry's storage layout to `vm`.
    pub fn new(vm: &'a mut dyn Host) -> Self {
        Self {
            vm,
            access: AccessControl::new(U256::ZERO),
            initializable: Initializable::default(),
        }
    }

    /// Grants [`AccessControl::DEFAULT_ADMIN_ROLE`] to the caller.
    ///
    /// This is the only grant that is not gated by an admin role, so it can
    /// run only once, as part of the creation transaction. The caller is
    /// then the deployer.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidInitialization`] - If the registry was already
    ///   initialized, or the call is not the creation transaction.
    ///
    /// # Events
    ///
    /// * [`initializable::Initialized`].
    /// * [`control::RoleGranted`].
    pub fn initialize(&mut self) -> Result<(), Error> {
        self.initializable.initializer(&mut *self.vm)?;
        let deployer = self.vm.msg_sender();
        self.access._grant_role(
            &mut *self.vm,
            AccessControl::DEFAULT_ADMIN_ROLE.into(),
            deployer,
        );
        Ok(())
    }

    /// Returns 32 zero bytes, the identifier of the default admin role.
    #[must_use]
    pub fn default_admin_role(&self) -> RoleId {
        self.access.default_admin_role()
    }

    /// See [`AccessControl::has_role`].
    #[must_use]
    pub fn has_role(&self, role: RoleId, account: Account) -> bool {
        self.access.has_role(&*self.vm, role, account)
    }

    /// See [`AccessControl::get_role_admin`].
    #[must_use]
    pub fn get_role_admin(&self, role: RoleId) -> RoleId {
        self.access.get_role_admin(&*self.vm, role)
    }

    /// See [`AccessControl::grant_role`].
    ///
    /// # Errors
    ///
    /// * [`Error::Unauthorized`] - If the caller lacks `role`'s admin role.
    pub fn grant_role(
        &mut self,
        role: RoleId,
        account: Account,
    ) -> Result<(), Error> {
        Ok(self.access.grant_role(&mut *self.vm, role, account)?)
    }

    /// See [`AccessControl::revoke_role`].
    ///
    /// # Errors
    ///
    /// * [`Error::Unauthorized`] - If the caller lacks `role`'s admin role.
    pub fn revoke_role(
        &mut self,
        role: RoleId,
        account: Account,
    ) -> Result<(), Error> {
        Ok(self.access.revoke_role(&mut *self.vm, role, account)?)
    }

    /// See [`AccessControl::renounce_role`].
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidArgument`] - If `confirmation` is not the caller.
    pub fn renounce_role(
        &mut self,
        role: RoleId,
        confirmation: Account,
    ) -> Result<(), Error> {
        Ok(self.access.renounce_role(&mut *self.vm, role, confirmation)?)
    }

    /// Sets `admin_role` as `role`'s admin role.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `role` - The identifier of the role we are changing the admin to.
    /// * `admin_role` - The new admin role.
    ///
    /// # Errors
    ///
    /// * [`Error::Unauthorized`] - If the caller does not hold
    ///   [`AccessControl::DEFAULT_ADMIN_ROLE`].
    ///
    /// # Events
    ///
    /// * [`control::RoleAdminChanged`].
    pub fn set_role_admin(
        &mut self,
        role: RoleId,
        admin_role: RoleId,
    ) -> Result<(), Error> {
        self.access
            .only_role(&*self.vm, AccessControl::DEFAULT_ADMIN_ROLE.into())?;
        self.access._set_role_admin(&mut *self.vm, role, admin_role);
        Ok(())
    }

    fn dispatch(&mut self, call: IRoleRegistryCalls) -> Result<Vec<u8>, Error> {
        let output = match call {
            IRoleRegistryCalls::initialize(_) => {
                self.initialize()?;
                Vec::new()
            }
            IRoleRegistryCalls::defaultAdminRole(_) => {
                self.default_admin_role().abi_encode()
            }
            IRoleRegistryCalls::hasRole(call) => {
                self.has_role(call.role, call.account).abi_encode()
            }
            IRoleRegistryCalls::getRoleAdmin(call) => {
                self.get_role_admin(call.role).abi_encode()
            }
            IRoleRegistryCalls::grantRole(call) => {
                self.grant_role(call.role, call.account)?;
                Vec::new()
            }
            IRoleRegistryCalls::revokeRole(call) => {
                self.revoke_role(call.role, call.account)?;
                Vec::new()
            }
            IRoleRegistryCalls::renounceRole(call) => {
                self.renounce_role(call.role, call.callerConfirmation)?;
                Vec::new()
            }
            IRoleRegistryCalls::setRoleAdmin(call) => {
                self.set_role_admin(call.role, call.adminRole)?;
                Vec::new()
            }
            IRoleRegistryCalls::supportsInterface(call) => {
                self.supports_interface(call.interfaceId).abi_encode()
            }
        };
        Ok(output)
    }
}

impl IErc165 for RoleRegistry<'_> {
    fn supports_interface(&self, interface_id: B32) -> bool {
        interface_id == ACCESS_CONTROL_INTERFACE_ID
            || interface_id == erc165::INTERFACE_ID
    }
}

impl Entrypoint for RoleRegistry<'_> {
    fn route(vm: &mut dyn Host, calldata: &[u8]) -> Result<Vec<u8>, Vec<u8>> {
        let Ok(call) = IRoleRegistryCalls::abi_decode(calldata) else {
            return Err(Vec::new());
        };
        RoleRegistry::new(vm).dispatch(call).map_err(Into::into)
    }
}
