/*!
# Role-based access control contracts

Reusable contract components for ledgers whose accounts are 32-byte public
keys. A contract is a set of typed storage handles plus methods that run
against a [`host::Host`], the narrow interface through which the executing
ledger exposes storage, logs and the authenticated caller.

The central component is [`access::control::AccessControl`]: accounts hold
roles, every role has an admin role, and only holders of a role's admin role
may grant or revoke it. The all-zero role is the default admin of every role,
including itself.

```ignore
use rbac_contracts::{access::control::AccessControl, host::Host};

fn mint(vm: &mut dyn Host, access: &AccessControl) -> Result<(), Vec<u8>> {
    access.only_role(vm, MINTER_ROLE.into())?;
    // ...
    Ok(())
}
```

> Contracts in this crate do not persist anything on their own. Atomicity of
> a call, i.e. discarding every write when a method fails, is the job of the
> host.
*/

#![allow(clippy::module_name_repetitions)]
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(rustdoc::broken_intra_doc_links)]
extern crate alloc;

pub mod access;
pub mod host;
pub mod storage;
pub mod utils;

#[cfg(test)]
mod test_utils;
