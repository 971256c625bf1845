//! Solidity ABI of the [`RoleRegistry`](crate::RoleRegistry) contract.
//!
//! Accounts and roles are both `bytes32`: accounts are 32-byte public keys,
//! not 20-byte addresses.
#![allow(missing_docs)]
#![cfg_attr(coverage_nightly, coverage(off))]

use alloy_sol_macro::sol;

sol! {
    interface IRoleRegistry {
        function initialize() external;

        function defaultAdminRole() external view returns (bytes32 role);
        function hasRole(bytes32 role, bytes32 account) external view returns (bool hasRole);
        function getRoleAdmin(bytes32 role) external view returns (bytes32 role);
        function grantRole(bytes32 role, bytes32 account) external;
        function revokeRole(bytes32 role, bytes32 account) external;
        function renounceRole(bytes32 role, bytes32 callerConfirmation) external;

        function setRoleAdmin(bytes32 role, bytes32 adminRole) external;

        function supportsInterface(bytes4 interfaceId) external view returns (bool supported);
    }
}
