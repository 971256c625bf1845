//! Contracts implementing access control mechanisms.
pub mod control;

pub use control::{AccessControl, RoleId};
