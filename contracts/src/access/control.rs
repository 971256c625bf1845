//! Contract module that allows children to implement role-based access control
//! mechanisms.
//!
//! This is a lightweight version that doesn't allow enumerating role members
//! except through off-chain means by accessing the contract event logs.
//!
//! Roles are referred to by their `bytes32` identifier. These should be exposed
//! in the external API and be unique. The best way to achieve this is by using
//! `pub const` hash digests:
//!
//! ```
//! pub const MY_ROLE: [u8; 32] =
//!     keccak_const::Keccak256::new().update(b"MY_ROLE").finalize();
//! ```
//!
//! Roles can be used to represent a set of permissions. To restrict access to a
//! function call, use [`AccessControl::only_role`]:
//!
//! ```rust,ignore
//! pub fn foo(&mut self) -> Result<(), Error> {
//!     self.access.only_role(&*self.vm, MY_ROLE.into())?;
//!     // ...
//! }
//! ```
//!
//! Roles can be granted and revoked dynamically via
//! [`AccessControl::grant_role`] and [`AccessControl::revoke_role`]. Each role
//! has an associated admin role, and only accounts that have a `role`'s
//! `admin_role` can call [`AccessControl::grant_role`] and
//! [`AccessControl::revoke_role`].
//!
//! By default, the admin role for all roles is
//! [`AccessControl::DEFAULT_ADMIN_ROLE`], which means that only accounts with
//! this role will be able to grant or revoke other roles. More complex role
//! relationships can be created by using [`AccessControl::_set_role_admin`].
//!
//! WARNING: The [`AccessControl::DEFAULT_ADMIN_ROLE`] is also its own admin: it
//! has permission to grant and revoke this role. Extra precautions should be
//! taken to secure accounts that have been granted it.
use alloc::vec::Vec;

use alloy_primitives::{B256, U256};
use alloy_sol_types::SolError;
pub use sol::*;

use crate::{
    host::{self, Account, Host},
    storage::{offset, StorageB256, StorageBool, StorageMap, StorageType},
};

/// A 32-byte role identifier.
pub type RoleId = B256;

#[cfg_attr(coverage_nightly, coverage(off))]
mod sol {
    use alloy_sol_macro::sol;

    sol! {
        /// Emitted when `newAdminRole` is set as `role`'s admin role,
        /// replacing `previousAdminRole`.
        ///
        /// `DEFAULT_ADMIN_ROLE` is the starting admin for all roles, despite
        /// `RoleAdminChanged` not being emitted signaling this.
        #[derive(Debug, PartialEq, Eq)]
        #[allow(missing_docs)]
        event RoleAdminChanged(bytes32 indexed role, bytes32 indexed previousAdminRole, bytes32 indexed newAdminRole);
        /// Emitted when `account` is granted `role`.
        ///
        /// `sender` is the account that originated the contract call. This
        /// account bears the admin role (for the granted role), except for
        /// the initial grant made while the contract is being initialized.
        #[derive(Debug, PartialEq, Eq)]
        #[allow(missing_docs)]
        event RoleGranted(bytes32 indexed role, bytes32 indexed account, bytes32 indexed sender);
        /// Emitted when `account` is revoked `role`.
        ///
        /// `sender` is the account that originated the contract call:
        ///   - if using `revoke_role`, it is the admin role bearer.
        ///   - if using `renounce_role`, it is the role bearer (i.e. `account`).
        #[derive(Debug, PartialEq, Eq)]
        #[allow(missing_docs)]
        event RoleRevoked(bytes32 indexed role, bytes32 indexed account, bytes32 indexed sender);
    }

    sol! {
        /// The `account` is missing a role.
        ///
        /// * `account` - Account that was found to not be authorized.
        /// * `neededRole` - The missing role.
        #[derive(Debug, PartialEq, Eq)]
        #[allow(missing_docs)]
        error AccessControlUnauthorizedAccount(bytes32 account, bytes32 neededRole);
        /// The caller of a function is not the expected one.
        ///
        /// NOTE: Don't confuse with [`AccessControlUnauthorizedAccount`].
        #[derive(Debug, PartialEq, Eq)]
        #[allow(missing_docs)]
        error AccessControlBadConfirmation();
    }
}

/// An error that occurred in the implementation of an [`AccessControl`]
/// contract.
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// The caller account is missing the admin role of the role it tried to
    /// mutate.
    Unauthorized(AccessControlUnauthorizedAccount),
    /// The account passed to `renounce_role` is not the caller.
    InvalidArgument(AccessControlBadConfirmation),
}

impl From<Error> for Vec<u8> {
    fn from(err: Error) -> Self {
        match err {
            Error::Unauthorized(e) => SolError::abi_encode(&e),
            Error::InvalidArgument(e) => SolError::abi_encode(&e),
        }
    }
}

/// State of a [`RoleData`] contract.
///
/// Stores information about a specific role.
#[derive(Debug, Clone, Copy)]
pub struct RoleData {
    /// Whether an account is member of a certain role.
    pub has_role: StorageMap<Account, StorageBool>,
    /// The admin role for this role.
    pub admin_role: StorageB256,
}

impl StorageType for RoleData {
    const REQUIRED_SLOTS: usize =
        StorageMap::<Account, StorageBool>::REQUIRED_SLOTS
            + StorageB256::REQUIRED_SLOTS;

    fn new(slot: U256) -> Self {
        Self {
            has_role: StorageMap::new(slot),
            admin_role: StorageB256::new(offset(
                slot,
                StorageMap::<Account, StorageBool>::REQUIRED_SLOTS,
            )),
        }
    }
}

/// State of an [`AccessControl`] contract.
#[derive(Debug, Clone, Copy)]
pub struct AccessControl {
    /// Role identifier -> Role information.
    pub(crate) roles: StorageMap<RoleId, RoleData>,
}

impl StorageType for AccessControl {
    const REQUIRED_SLOTS: usize = 1;

    fn new(slot: U256) -> Self {
        Self { roles: StorageMap::new(slot) }
    }
}

impl Default for AccessControl {
    fn default() -> Self {
        Self::new(U256::ZERO)
    }
}

impl AccessControl {
    /// The default admin role. `[0; 32]` by default.
    pub const DEFAULT_ADMIN_ROLE: [u8; 32] = [0; 32];

    /// Returns [`Self::DEFAULT_ADMIN_ROLE`] as a full 32-byte word.
    #[must_use]
    pub fn default_admin_role(&self) -> RoleId {
        Self::DEFAULT_ADMIN_ROLE.into()
    }

    /// Returns `true` if `account` has been granted `role`.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    /// * `vm` - Host of the current call.
    /// * `role` - The role identifier.
    /// * `account` - The account to check for membership.
    #[must_use]
    pub fn has_role(
        &self,
        vm: &dyn Host,
        role: RoleId,
        account: Account,
    ) -> bool {
        self.roles.getter(role).has_role.getter(account).get(vm)
    }

    /// Checks if [`Host::msg_sender`] has been granted `role`.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    /// * `vm` - Host of the current call.
    /// * `role` - The role identifier.
    ///
    /// # Errors
    ///
    /// * [`Error::Unauthorized`] - If [`Host::msg_sender`] has not been
    ///   granted `role`.
    pub fn only_role(&self, vm: &dyn Host, role: RoleId) -> Result<(), Error> {
        self._check_role(vm, role, vm.msg_sender())
    }

    /// Returns the admin role that controls `role`. See [`Self::grant_role`]
    /// and [`Self::revoke_role`].
    ///
    /// To change a role's admin, use [`Self::_set_role_admin`].
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    /// * `vm` - Host of the current call.
    /// * `role` - The role identifier.
    #[must_use]
    pub fn get_role_admin(&self, vm: &dyn Host, role: RoleId) -> RoleId {
        self.roles.getter(role).admin_role.get(vm)
    }

    /// Grants `role` to `account`.
    ///
    /// If `account` had not been already granted `role`, emits a
    /// [`RoleGranted`] event.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `vm` - Host of the current call.
    /// * `role` - The role identifier.
    /// * `account` - The account which will be granted the role.
    ///
    /// # Errors
    ///
    /// * [`Error::Unauthorized`] - If [`Host::msg_sender`] has not been
    ///   granted the admin role of `role`.
    ///
    /// # Events
    ///
    /// * [`RoleGranted`]
    pub fn grant_role(
        &mut self,
        vm: &mut dyn Host,
        role: RoleId,
        account: Account,
    ) -> Result<(), Error> {
        let admin_role = self.get_role_admin(vm, role);
        self.only_role(vm, admin_role)?;
        self._grant_role(vm, role, account);
        Ok(())
    }

    /// Revokes `role` from `account`.
    ///
    /// If `account` had been granted `role`, emits a [`RoleRevoked`] event.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `vm` - Host of the current call.
    /// * `role` - The role identifier.
    /// * `account` - The account which will be revoked the role.
    ///
    /// # Errors
    ///
    /// * [`Error::Unauthorized`] - If [`Host::msg_sender`] has not been
    ///   granted the admin role of `role`.
    ///
    /// # Events
    ///
    /// * [`RoleRevoked`].
    pub fn revoke_role(
        &mut self,
        vm: &mut dyn Host,
        role: RoleId,
        account: Account,
    ) -> Result<(), Error> {
        let admin_role = self.get_role_admin(vm, role);
        self.only_role(vm, admin_role)?;
        self._revoke_role(vm, role, account);
        Ok(())
    }

    /// Revokes `role` from the calling account.
    ///
    /// Roles are often managed via [`Self::grant_role`] and
    /// [`Self::revoke_role`]: this function's purpose is to provide a mechanism
    /// for accounts to lose their privileges if they are compromised (such as
    /// when a trusted device is misplaced).
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `vm` - Host of the current call.
    /// * `role` - The role identifier.
    /// * `confirmation` - The account which will be revoked the role.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidArgument`] - If [`Host::msg_sender`] is not the
    ///   `confirmation` account.
    ///
    /// # Events
    ///
    /// * [`RoleRevoked`] - If the calling account has its `role` revoked.
    pub fn renounce_role(
        &mut self,
        vm: &mut dyn Host,
        role: RoleId,
        confirmation: Account,
    ) -> Result<(), Error> {
        if vm.msg_sender() != confirmation {
            return Err(Error::InvalidArgument(
                AccessControlBadConfirmation {},
            ));
        }

        self._revoke_role(vm, role, confirmation);
        Ok(())
    }

    /// Sets `new_admin_role` as `role`'s admin role.
    ///
    /// Internal function without access restriction.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `vm` - Host of the current call.
    /// * `role` - The identifier of the role we are changing the admin to.
    /// * `new_admin_role` - The new admin role.
    ///
    /// # Events
    ///
    /// * [`RoleAdminChanged`].
    pub fn _set_role_admin(
        &mut self,
        vm: &mut dyn Host,
        role: RoleId,
        new_admin_role: RoleId,
    ) {
        let previous_admin_role = self.get_role_admin(vm, role);
        self.roles.getter(role).admin_role.set(vm, new_admin_role);
        host::log(
            vm,
            &RoleAdminChanged {
                role,
                previousAdminRole: previous_admin_role,
                newAdminRole: new_admin_role,
            },
        );
    }

    /// Checks if `account` has been granted `role`.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    /// * `vm` - Host of the current call.
    /// * `role` - The role identifier.
    /// * `account` - The account to check for membership.
    ///
    /// # Errors
    ///
    /// * [`Error::Unauthorized`] - If `account` has not been granted `role`.
    pub fn _check_role(
        &self,
        vm: &dyn Host,
        role: RoleId,
        account: Account,
    ) -> Result<(), Error> {
        if !self.has_role(vm, role, account) {
            return Err(Error::Unauthorized(
                AccessControlUnauthorizedAccount { account, neededRole: role },
            ));
        }

        Ok(())
    }

    /// Attempts to grant `role` to `account` and returns a boolean indicating
    /// if `role` was granted.
    ///
    /// Internal function without access restriction.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `vm` - Host of the current call.
    /// * `role` - The role identifier.
    /// * `account` - The account which will be granted the role.
    ///
    /// # Events
    ///
    /// * [`RoleGranted`].
    pub fn _grant_role(
        &mut self,
        vm: &mut dyn Host,
        role: RoleId,
        account: Account,
    ) -> bool {
        if self.has_role(vm, role, account) {
            false
        } else {
            self.roles.getter(role).has_role.getter(account).set(vm, true);
            let sender = vm.msg_sender();
            host::log(vm, &RoleGranted { role, account, sender });
            true
        }
    }

    /// Attempts to revoke `role` from `account` and returns a boolean
    /// indicating if `role` was revoked.
    ///
    /// Internal function without access restriction.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `vm` - Host of the current call.
    /// * `role` - The role identifier.
    /// * `account` - The account which will be revoked the role.
    ///
    /// # Events
    ///
    /// * [`RoleRevoked`].
    pub fn _revoke_role(
        &mut self,
        vm: &mut dyn Host,
        role: RoleId,
        account: Account,
    ) -> bool {
        if self.has_role(vm, role, account) {
            self.roles.getter(role).has_role.getter(account).set(vm, false);
            let sender = vm.msg_sender();
            host::log(vm, &RoleRevoked { role, account, sender });
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{hex, B256};
    use proptest::prelude::*;

    use super::*;
    use crate::test_utils::TestVm;

    /// Shorthand for declaring variables converted from a hex literal to a
    /// fixed 32-byte slice;
    macro_rules! roles {
        ($($var:ident = $hex:literal);* $(;)?) => {
            $(
                const $var: [u8; 32] = hex!($hex);
            )*
        };
    }

    roles! {
        ROLE       = "ed9ea7bc2a13bc59432ab07436e7f7f5450f82d4b48c401bed177bfaf36b1873";
        OTHER_ROLE = "879ce0d4bfd332649ca3552efe772a38d64a315eb70ab69689fd309c735946b5";
    }

    const DEFAULT_ADMIN_ROLE: [u8; 32] = AccessControl::DEFAULT_ADMIN_ROLE;

    const ALICE: Account = B256::repeat_byte(0xa1);
    const BOB: Account = B256::repeat_byte(0xb0);

    #[test]
    fn default_admin_role_is_32_zero_bytes() {
        let contract = AccessControl::default();
        assert_eq!(contract.default_admin_role(), B256::ZERO);
        assert_eq!(contract.default_admin_role().as_slice(), &[0u8; 32]);
    }

    #[test]
    fn default_role_is_default_admin() {
        let vm = TestVm::default();
        let contract = AccessControl::default();
        let role_admin = contract.get_role_admin(&vm, ROLE.into());
        assert_eq!(role_admin, DEFAULT_ADMIN_ROLE);
    }

    #[test]
    fn default_admin_roles_admin_is_itself() {
        let vm = TestVm::default();
        let contract = AccessControl::default();
        let role_admin =
            contract.get_role_admin(&vm, DEFAULT_ADMIN_ROLE.into());
        assert_eq!(role_admin, DEFAULT_ADMIN_ROLE);
    }

    #[test]
    fn non_admin_cannot_grant_role_to_others() {
        let mut vm = TestVm::default();
        let mut contract = AccessControl::default();

        let err = contract
            .grant_role(vm.sender(ALICE), ROLE.into(), BOB)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Unauthorized(AccessControlUnauthorizedAccount {
                account,
                neededRole
            })
            if account == ALICE && neededRole == DEFAULT_ADMIN_ROLE
        ));
        assert!(!contract.has_role(&vm, ROLE.into(), BOB));
        assert!(vm.logs().is_empty());
    }

    #[test]
    fn accounts_can_be_granted_roles_multiple_times() {
        let mut vm = TestVm::default();
        let mut contract = AccessControl::default();
        contract._grant_role(vm.sender(ALICE), DEFAULT_ADMIN_ROLE.into(), ALICE);

        contract.grant_role(vm.sender(ALICE), ROLE.into(), BOB).unwrap();
        vm.clear_logs();
        contract.grant_role(vm.sender(ALICE), ROLE.into(), BOB).unwrap();

        assert!(contract.has_role(&vm, ROLE.into(), BOB));
        assert!(vm.logs().is_empty());
    }

    #[test]
    fn grant_role_emits_role_granted() {
        let mut vm = TestVm::default();
        let mut contract = AccessControl::default();
        contract._grant_role(vm.sender(ALICE), DEFAULT_ADMIN_ROLE.into(), ALICE);

        contract.grant_role(vm.sender(ALICE), ROLE.into(), BOB).unwrap();

        assert!(vm.emits(&RoleGranted {
            role: ROLE.into(),
            account: BOB,
            sender: ALICE,
        }));
    }

    #[test]
    fn not_granted_roles_can_be_revoked() {
        let mut vm = TestVm::default();
        let mut contract = AccessControl::default();
        contract._grant_role(vm.sender(ALICE), DEFAULT_ADMIN_ROLE.into(), ALICE);

        assert!(!contract.has_role(&vm, ROLE.into(), BOB));
        contract.revoke_role(vm.sender(ALICE), ROLE.into(), BOB).unwrap();
        assert!(!contract.has_role(&vm, ROLE.into(), BOB));
    }

    #[test]
    fn admin_can_revoke_role() {
        let mut vm = TestVm::default();
        let mut contract = AccessControl::default();
        contract._grant_role(vm.sender(ALICE), DEFAULT_ADMIN_ROLE.into(), ALICE);
        contract.grant_role(vm.sender(ALICE), ROLE.into(), BOB).unwrap();

        assert!(contract.has_role(&vm, ROLE.into(), BOB));
        contract.revoke_role(vm.sender(ALICE), ROLE.into(), BOB).unwrap();
        assert!(!contract.has_role(&vm, ROLE.into(), BOB));
        assert!(vm.emits(&RoleRevoked {
            role: ROLE.into(),
            account: BOB,
            sender: ALICE,
        }));
    }

    #[test]
    fn non_admin_cannot_revoke_role() {
        let mut vm = TestVm::default();
        let mut contract = AccessControl::default();
        contract._grant_role(vm.sender(BOB), ROLE.into(), BOB);

        assert!(contract.has_role(&vm, ROLE.into(), BOB));
        let err = contract
            .revoke_role(vm.sender(ALICE), ROLE.into(), BOB)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Unauthorized(AccessControlUnauthorizedAccount {
                account,
                neededRole,
            }) if account == ALICE && neededRole == DEFAULT_ADMIN_ROLE
        ));
        assert!(contract.has_role(&vm, ROLE.into(), BOB));
    }

    #[test]
    fn roles_can_be_revoked_multiple_times() {
        let mut vm = TestVm::default();
        let mut contract = AccessControl::default();
        contract._grant_role(vm.sender(ALICE), DEFAULT_ADMIN_ROLE.into(), ALICE);

        contract.revoke_role(vm.sender(ALICE), ROLE.into(), BOB).unwrap();
        contract.revoke_role(vm.sender(ALICE), ROLE.into(), BOB).unwrap();
        assert!(!contract.has_role(&vm, ROLE.into(), BOB));
    }

    #[test]
    fn bearer_can_renounce_role() {
        let mut vm = TestVm::default();
        let mut contract = AccessControl::default();
        contract._grant_role(vm.sender(ALICE), ROLE.into(), ALICE);

        assert!(contract.has_role(&vm, ROLE.into(), ALICE));
        contract.renounce_role(vm.sender(ALICE), ROLE.into(), ALICE).unwrap();
        assert!(!contract.has_role(&vm, ROLE.into(), ALICE));
        assert!(vm.emits(&RoleRevoked {
            role: ROLE.into(),
            account: ALICE,
            sender: ALICE,
        }));
    }

    #[test]
    fn only_sender_can_renounce() {
        let mut vm = TestVm::default();
        let mut contract = AccessControl::default();
        contract._grant_role(vm.sender(ALICE), ROLE.into(), BOB);

        let err = contract
            .renounce_role(vm.sender(ALICE), ROLE.into(), BOB)
            .unwrap_err();
        assert_eq!(
            err,
            Error::InvalidArgument(AccessControlBadConfirmation {})
        );
        assert!(contract.has_role(&vm, ROLE.into(), BOB));
    }

    #[test]
    fn roles_can_be_renounced_multiple_times() {
        let mut vm = TestVm::default();
        let mut contract = AccessControl::default();
        contract._grant_role(vm.sender(ALICE), ROLE.into(), ALICE);

        contract.renounce_role(vm.sender(ALICE), ROLE.into(), ALICE).unwrap();
        contract.renounce_role(vm.sender(ALICE), ROLE.into(), ALICE).unwrap();
        assert!(!contract.has_role(&vm, ROLE.into(), ALICE));
    }

    #[test]
    fn a_roles_admin_role_can_change() {
        let mut vm = TestVm::default();
        let mut contract = AccessControl::default();
        contract._set_role_admin(
            vm.sender(ALICE),
            ROLE.into(),
            OTHER_ROLE.into(),
        );

        let admin_role = contract.get_role_admin(&vm, ROLE.into());
        assert_eq!(admin_role, OTHER_ROLE);
        assert!(vm.emits(&RoleAdminChanged {
            role: ROLE.into(),
            previousAdminRole: DEFAULT_ADMIN_ROLE.into(),
            newAdminRole: OTHER_ROLE.into(),
        }));
    }

    #[test]
    fn the_new_admin_can_grant_roles() {
        let mut vm = TestVm::default();
        let mut contract = AccessControl::default();
        contract._set_role_admin(
            vm.sender(ALICE),
            ROLE.into(),
            OTHER_ROLE.into(),
        );
        contract._grant_role(vm.sender(ALICE), OTHER_ROLE.into(), ALICE);

        contract.grant_role(vm.sender(ALICE), ROLE.into(), BOB).unwrap();
        assert!(contract.has_role(&vm, ROLE.into(), BOB));
    }

    #[test]
    fn the_new_admin_can_revoke_roles() {
        let mut vm = TestVm::default();
        let mut contract = AccessControl::default();
        contract._set_role_admin(
            vm.sender(ALICE),
            ROLE.into(),
            OTHER_ROLE.into(),
        );
        contract._grant_role(vm.sender(ALICE), OTHER_ROLE.into(), ALICE);
        contract._grant_role(vm.sender(ALICE), ROLE.into(), BOB);

        contract.revoke_role(vm.sender(ALICE), ROLE.into(), BOB).unwrap();
        assert!(!contract.has_role(&vm, ROLE.into(), BOB));
    }

    #[test]
    fn previous_admins_no_longer_grant_roles() {
        let mut vm = TestVm::default();
        let mut contract = AccessControl::default();
        contract._grant_role(vm.sender(ALICE), DEFAULT_ADMIN_ROLE.into(), ALICE);
        contract._set_role_admin(
            vm.sender(ALICE),
            ROLE.into(),
            OTHER_ROLE.into(),
        );

        let err = contract
            .grant_role(vm.sender(ALICE), ROLE.into(), BOB)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Unauthorized(AccessControlUnauthorizedAccount {
                account,
                neededRole,
            }) if account == ALICE && neededRole == OTHER_ROLE
        ));
    }

    #[test]
    fn previous_admins_no_longer_revoke_roles() {
        let mut vm = TestVm::default();
        let mut contract = AccessControl::default();
        contract._grant_role(vm.sender(ALICE), DEFAULT_ADMIN_ROLE.into(), ALICE);
        contract._set_role_admin(
            vm.sender(ALICE),
            ROLE.into(),
            OTHER_ROLE.into(),
        );

        let err = contract
            .revoke_role(vm.sender(ALICE), ROLE.into(), BOB)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Unauthorized(AccessControlUnauthorizedAccount {
                account,
                neededRole,
            }) if account == ALICE && neededRole == OTHER_ROLE
        ));
    }

    #[test]
    fn does_not_revert_if_sender_has_role() {
        let mut vm = TestVm::default();
        let mut contract = AccessControl::default();
        contract._grant_role(vm.sender(ALICE), ROLE.into(), ALICE);

        contract._check_role(&vm, ROLE.into(), ALICE).unwrap();
        contract.only_role(vm.sender(ALICE), ROLE.into()).unwrap();
    }

    #[test]
    fn reverts_if_sender_doesnt_have_role() {
        let vm = TestVm::default();
        let contract = AccessControl::default();

        let err = contract._check_role(&vm, ROLE.into(), ALICE).unwrap_err();
        assert!(matches!(
            err,
            Error::Unauthorized(AccessControlUnauthorizedAccount {
                account,
                neededRole,
            }) if account == ALICE && neededRole == ROLE
        ));
    }

    #[test]
    fn internal_grant_role_true_if_no_role() {
        let mut vm = TestVm::default();
        let mut contract = AccessControl::default();
        assert!(contract._grant_role(vm.sender(ALICE), ROLE.into(), BOB));
    }

    #[test]
    fn internal_grant_role_false_if_role() {
        let mut vm = TestVm::default();
        let mut contract = AccessControl::default();
        contract._grant_role(vm.sender(ALICE), ROLE.into(), BOB);

        assert!(!contract._grant_role(vm.sender(ALICE), ROLE.into(), BOB));
    }

    #[test]
    fn internal_revoke_role_true_if_role() {
        let mut vm = TestVm::default();
        let mut contract = AccessControl::default();
        contract._grant_role(vm.sender(ALICE), ROLE.into(), BOB);

        assert!(contract._revoke_role(vm.sender(ALICE), ROLE.into(), BOB));
    }

    #[test]
    fn internal_revoke_role_false_if_no_role() {
        let mut vm = TestVm::default();
        let mut contract = AccessControl::default();
        assert!(!contract._revoke_role(vm.sender(ALICE), ROLE.into(), BOB));
    }

    #[test]
    fn revoked_membership_leaves_no_storage_behind() {
        let mut vm = TestVm::default();
        let mut contract = AccessControl::default();
        contract._grant_role(vm.sender(ALICE), ROLE.into(), BOB);
        contract._revoke_role(vm.sender(ALICE), ROLE.into(), BOB);

        assert_eq!(vm.storage_len(), 0);
    }

    #[test]
    fn admin_role_follows_membership_map() {
        use crate::storage::{slot_key, StorageKey};

        assert_eq!(RoleData::REQUIRED_SLOTS, 2);

        let mut vm = TestVm::default();
        let mut contract = AccessControl::default();
        contract._set_role_admin(
            vm.sender(ALICE),
            ROLE.into(),
            OTHER_ROLE.into(),
        );

        let base = B256::from(ROLE).to_slot(U256::ZERO);
        assert_eq!(
            vm.storage_snapshot().get(&slot_key(offset(base, 1))),
            Some(&B256::from(OTHER_ROLE))
        );
        assert_eq!(vm.storage_len(), 1);
    }

    #[test]
    fn errors_encode_as_custom_errors() {
        let unauthorized: Vec<u8> =
            Error::Unauthorized(AccessControlUnauthorizedAccount {
                account: ALICE,
                neededRole: ROLE.into(),
            })
            .into();
        assert_eq!(
            &unauthorized[..4],
            AccessControlUnauthorizedAccount::SELECTOR.as_slice()
        );
        assert_eq!(unauthorized.len(), 4 + 2 * 32);

        let bad_confirmation: Vec<u8> =
            Error::InvalidArgument(AccessControlBadConfirmation {}).into();
        assert_eq!(
            bad_confirmation,
            AccessControlBadConfirmation::SELECTOR.to_vec()
        );
    }

    fn account() -> impl Strategy<Value = Account> {
        any::<[u8; 32]>().prop_map(B256::from)
    }

    proptest! {
        #[test]
        fn fresh_state_denies_everything(role in account(), who in account()) {
            let vm = TestVm::default();
            let contract = AccessControl::default();
            prop_assert!(!contract.has_role(&vm, role, who));
            prop_assert_eq!(contract.get_role_admin(&vm, role), B256::ZERO);
        }

        #[test]
        fn outsiders_cannot_mutate_membership(
            role in account(),
            outsider in account(),
            target in account(),
        ) {
            prop_assume!(outsider != ALICE);
            prop_assume!(role != B256::ZERO);
            let mut vm = TestVm::default();
            let mut contract = AccessControl::default();
            contract._grant_role(vm.sender(ALICE), DEFAULT_ADMIN_ROLE.into(), ALICE);
            contract._grant_role(vm.sender(ALICE), role, target);
            let before = vm.storage_snapshot();

            let grant = contract.grant_role(vm.sender(outsider), role, outsider);
            let revoke = contract.revoke_role(vm.sender(outsider), role, target);

            prop_assert!(matches!(grant, Err(Error::Unauthorized(_))));
            prop_assert!(matches!(revoke, Err(Error::Unauthorized(_))));
            prop_assert_eq!(vm.storage_snapshot(), before);
        }
    }
}
